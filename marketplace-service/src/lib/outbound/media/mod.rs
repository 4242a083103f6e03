pub mod fs;

pub use fs::FsPhotoStore;
