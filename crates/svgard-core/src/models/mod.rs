pub mod asset;
pub mod image;

pub use asset::{extension_of, TagSet, UploadedAsset};
pub use image::{RecordError, StoredImageRecord, ThumbnailAsset};
