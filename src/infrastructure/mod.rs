// Infrastructure: concrete service implementations
pub mod file_system;

pub use file_system::TokioFileSystemService;
