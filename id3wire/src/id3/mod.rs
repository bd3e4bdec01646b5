//! ID3 specific items
//!
//! Only ID3v2 tags can be read and written. ID3v1 tags are recognized by
//! [`detect_id3_version`], but never decoded.

mod detect;
pub mod v2;

pub use detect::{Id3Variant, detect_id3_version};
