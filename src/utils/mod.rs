pub mod download;
pub mod file_size;
