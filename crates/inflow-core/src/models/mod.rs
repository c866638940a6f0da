//! Domain models shared by the pipeline stages.

pub mod metadata;
pub mod notification;
pub mod upload;

pub use metadata::TextMetadata;
pub use notification::{decode_object_key, ObjectNotification};
pub use upload::{preview_of, ContentUpload, NewContentUpload};
