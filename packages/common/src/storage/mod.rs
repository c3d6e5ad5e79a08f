mod error;
mod naming;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use naming::{is_image_file, sanitize_file_name};
pub use traits::{ImageStore, StoredImage};
