//! ID3v2 items and utilities
//!
//! All three versions (ID3v2.2, ID3v2.3, and ID3v2.4) are read into, and written from, the
//! same [`Id3v2Tag`]. The version is always chosen by the caller, see [`Id3v2Version`].
//!
//! ## Important notes
//!
//! See:
//!
//! * [`Id3v2Tag`]
//! * [`Frame`]

mod frame;
pub(crate) mod header;
mod items;
pub(crate) mod read;
mod restrictions;
pub(crate) mod tag;
pub mod util;
pub(crate) mod write;

// Exports

pub use header::{FrameSizeEncoding, Id3v2TagFlags, Id3v2Version};
pub use util::registry::FrameRegistry;

pub use tag::Id3v2Tag;

pub use items::*;

pub use frame::header::{FrameHeader, FrameId};
pub use frame::{Frame, FrameFlags};

pub use restrictions::{
	ImageSizeRestrictions, TagRestrictions, TagSizeRestrictions, TextSizeRestrictions,
};
