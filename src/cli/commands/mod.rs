pub mod context;
pub mod generate;
pub mod init;
