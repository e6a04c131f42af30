//! Presentation library access.
//!
//! Finds documents in a library folder by the songbook naming convention,
//! and reads and writes them through a [`DocumentCodec`].

pub mod codec;
pub mod library;
pub mod naming;

pub use codec::{DocumentCodec, JsonCodec};
pub use library::Library;
pub use naming::{
    extract_number, matches_number, output_file_name, title_from_stem, PRESENTATION_EXTENSION,
};
