mod error;
mod photo_ref;
mod traits;

pub mod filesystem;

pub use error::StorageError;
pub use photo_ref::{PhotoRef, extension_hint};
pub use traits::{BoxReader, PhotoStore};
