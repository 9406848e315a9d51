//! Filesystem adapters.

mod cap_std_image_store;

pub use cap_std_image_store::{CapStdImageStore, UPLOADS_DIR};
