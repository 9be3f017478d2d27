pub mod discoverdtos;
pub mod moviedtos;
pub mod recommendationdtos;
pub mod userdtos;
pub mod usermoviedtos;
