pub mod assess;
pub mod compare;
pub mod init;
pub mod validate;
