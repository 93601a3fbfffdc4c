//! Command-line operations

pub mod init;
pub mod list;
pub mod new;
