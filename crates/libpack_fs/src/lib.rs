mod file_system;
mod os;

pub use crate::{file_system::FileSystem, os::OsFileSystem};
