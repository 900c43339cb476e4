pub mod dir_archive_repository;
pub mod file_progress_repository;
pub mod paths;
pub mod storage;

pub use crate::dir_archive_repository::DirArchiveRepository;
pub use crate::file_progress_repository::FileProgressRepository;
