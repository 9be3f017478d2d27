pub mod cache;
pub mod db;
pub mod moviedb;
pub mod recommendationdb;
pub mod userdb;
pub mod usermoviedb;

pub use userdb::UserExt;
