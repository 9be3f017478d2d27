pub mod auth;
pub mod discover;
pub mod movies;
pub mod recommendations;
pub mod usermovies;
pub mod users;
