//! Read and write ID3v2.2, ID3v2.3, and ID3v2.4 tags.
//!
//! A tag is decoded into an [`Id3v2Tag`](id3::v2::Id3v2Tag), which holds the common fields
//! (title, artist, album, year, comment, track number/total, and a picture). The same tag
//! can be written as any ID3v2 version.
//!
//! # Examples
//!
//! ## Reading a tag
//!
//! ```rust,no_run
//! # fn main() -> id3wire::error::Result<()> {
//! use id3wire::config::ParseOptions;
//! use id3wire::id3::detect_id3_version;
//! use id3wire::id3::v2::Id3v2Tag;
//! use id3wire::tag::Accessor;
//!
//! let data = std::fs::read("test.mp3")?;
//!
//! // The version has to be known before the tag can be read
//! let variant = detect_id3_version(&data)?;
//! if let Some(version) = variant.id3v2_version() {
//! 	let tag = Id3v2Tag::read_from(&mut &data[..], version, ParseOptions::new())?;
//! 	println!("Title: {:?}", tag.title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Writing a tag
//!
//! ```rust
//! # fn main() -> id3wire::error::Result<()> {
//! use id3wire::TextEncoding;
//! use id3wire::config::WriteOptions;
//! use id3wire::id3::v2::{Id3v2Tag, Id3v2Version};
//! use id3wire::tag::Accessor;
//!
//! let mut tag = Id3v2Tag::new();
//! tag.set_title(String::from("Title"));
//! tag.set_track(1);
//! tag.set_track_total(10);
//!
//! let write_options = WriteOptions::new()
//! 	.version(Id3v2Version::V3)
//! 	.text_encoding(TextEncoding::Latin1);
//!
//! let mut bytes = Vec::new();
//! tag.dump_to(&mut bytes, write_options)?;
//! assert!(bytes.starts_with(b"ID3\x03\x00"));
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod id3;
pub(crate) mod macros;
pub mod picture;
pub mod tag;
mod util;

pub use util::text::TextEncoding;
