pub mod gemini;
pub mod recommender;
pub mod tmdb;
