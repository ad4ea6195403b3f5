//! I/O layer: `storage` backends that persist originals and thumbnails, and
//! `writers` that encode rasters to JPEG, PNG, GIF, BMP and TIFF.
pub mod storage;
pub use storage::{FileSystemStorage, MemoryStorage, Storage};

pub mod writers;
