pub mod moviemodel;
pub mod recommendationmodel;
pub mod usermodel;
pub mod usermoviemodel;
