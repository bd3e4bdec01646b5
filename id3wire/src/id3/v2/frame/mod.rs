pub(super) mod content;
pub(super) mod header;
pub(super) mod read;

use super::items::{AttachedPictureFrame, CommentFrame, TextInformationFrame};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use header::FrameId;

macro_rules! define_frames {
	(
		$(#[$meta:meta])*
		pub enum Frame<'a> {
			$(
				$(#[$field_meta:meta])+
				$variant:ident($type:ty),
			)*
		}
	) => {
		$(#[$meta])*
		pub enum Frame<'a> {
			$(
				$(#[$field_meta])+
				$variant($type),
			)*
		}

		impl<'a> Frame<'a> {
			/// Get the ID of the frame
			pub fn id(&self) -> &FrameId<'a> {
				match self {
					$(
						Frame::$variant(frame) => &frame.header.id,
					)*
				}
			}

			/// Get the flags for the frame
			pub fn flags(&self) -> FrameFlags {
				match self {
					$(
						Frame::$variant(frame) => frame.header.flags,
					)*
				}
			}

			/// Set the flags for the frame
			pub fn set_flags(&mut self, flags: FrameFlags) {
				match self {
					$(
						Frame::$variant(frame) => frame.header.flags = flags,
					)*
				}
			}

			// Frames are created with their ID3v2.3/4 ID, this is used when writing ID3v2.2
			pub(crate) fn with_id(mut self, id: FrameId<'a>) -> Self {
				match &mut self {
					$(
						Frame::$variant(frame) => frame.header.id = id,
					)*
				}

				self
			}
		}

		$(
			impl<'a> From<$type> for Frame<'a> {
				fn from(value: $type) -> Self {
					Frame::$variant(value)
				}
			}
		)*
	}
}

define_frames! {
	/// Represents an ID3v2 frame
	///
	/// Only the frames that map to a tag field are decoded, everything else is skipped while
	/// reading.
	#[non_exhaustive]
	#[derive(Clone, Debug, PartialEq, Eq, Hash)]
	pub enum Frame<'a> {
		/// Represents a "COMM" or "COM" frame
		Comment(CommentFrame<'a>),
		/// Represents a "T..." (excluding TXXX) frame
		Text(TextInformationFrame<'a>),
		/// Represents an "APIC" or "PIC" frame
		Picture(AttachedPictureFrame<'a>),
	}
}

impl Frame<'_> {
	/// Convert the frame's content to bytes, excluding the frame header
	///
	/// # Errors
	///
	/// * The frame content cannot be encoded (see the individual frame types)
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		match self {
			Frame::Comment(frame) => frame.as_bytes(write_options),
			Frame::Text(frame) => frame.as_bytes(write_options),
			Frame::Picture(frame) => frame.as_bytes(write_options),
		}
	}
}

/// Various flags to describe the content of an item
///
/// The bit layout differs between ID3v2.3 and ID3v2.4. ID3v2.2 frames have no flags.
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[allow(clippy::struct_excessive_bools)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The group identifier the frame belongs to
	///
	/// All frames with the same group identifier byte belong to the same group.
	pub grouping_identity: Option<u8>,
	/// Frame is zlib compressed
	///
	/// id3wire never decompresses frames, compressed frames are skipped while reading.
	pub compression: bool,
	/// Frame encryption method symbol
	///
	/// NOTE: Since the encryption method is unknown, id3wire cannot do anything with these frames
	pub encryption: Option<u8>,
	/// Frame is unsynchronised (ID3v2.4 only)
	///
	/// This is only recorded, the frame content is never resynchronised.
	pub unsynchronisation: bool,
	/// Frame has a data length indicator
	///
	/// In ID3v2.3, this holds the decompressed size of a compressed frame.
	pub data_length_indicator: Option<u32>,
}

impl FrameFlags {
	/// Parse the flags from a frame of `version`
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`, their
	/// actual values follow the frame header:
	/// * `grouping_identity`
	/// * `encryption`
	/// * `data_length_indicator`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::id3::v2::{FrameFlags, Id3v2Version};
	///
	/// let flags = FrameFlags::parse(Id3v2Version::V4, 0x4040);
	/// assert!(flags.tag_alter_preservation);
	/// assert_eq!(flags.grouping_identity, Some(0));
	///
	/// // The same bits mean something else in ID3v2.3
	/// let flags = FrameFlags::parse(Id3v2Version::V3, 0x4040);
	/// assert!(flags.file_alter_preservation);
	/// assert_eq!(flags.encryption, Some(0));
	/// ```
	pub fn parse(version: Id3v2Version, flags: u16) -> Self {
		match version {
			Id3v2Version::V2 => FrameFlags::default(),
			Id3v2Version::V3 => FrameFlags {
				tag_alter_preservation: flags & 0x8000 == 0x8000,
				file_alter_preservation: flags & 0x4000 == 0x4000,
				read_only: flags & 0x2000 == 0x2000,
				grouping_identity: (flags & 0x0020 == 0x0020).then_some(0),
				compression: flags & 0x0080 == 0x0080,
				encryption: (flags & 0x0040 == 0x0040).then_some(0),
				unsynchronisation: false,
				data_length_indicator: (flags & 0x0080 == 0x0080).then_some(0),
			},
			Id3v2Version::V4 => FrameFlags {
				tag_alter_preservation: flags & 0x4000 == 0x4000,
				file_alter_preservation: flags & 0x2000 == 0x2000,
				read_only: flags & 0x1000 == 0x1000,
				grouping_identity: (flags & 0x0040 == 0x0040).then_some(0),
				compression: flags & 0x0008 == 0x0008,
				encryption: (flags & 0x0004 == 0x0004).then_some(0),
				unsynchronisation: flags & 0x0002 == 0x0002,
				data_length_indicator: (flags & 0x0001 == 0x0001).then_some(0),
			},
		}
	}

	/// Get the byte representation of the flags for `version`
	///
	/// ID3v2.2 has no frame flags, so this is always `0`.
	pub fn as_bytes(&self, version: Id3v2Version) -> u16 {
		let mut flags = 0;

		if *self == FrameFlags::default() {
			return flags;
		}

		match version {
			Id3v2Version::V2 => {},
			Id3v2Version::V3 => {
				if self.tag_alter_preservation {
					flags |= 0x8000
				}

				if self.file_alter_preservation {
					flags |= 0x4000
				}

				if self.read_only {
					flags |= 0x2000
				}

				if self.compression {
					flags |= 0x0080
				}

				if self.encryption.is_some() {
					flags |= 0x0040
				}

				if self.grouping_identity.is_some() {
					flags |= 0x0020
				}
			},
			Id3v2Version::V4 => {
				if self.tag_alter_preservation {
					flags |= 0x4000
				}

				if self.file_alter_preservation {
					flags |= 0x2000
				}

				if self.read_only {
					flags |= 0x1000
				}

				if self.grouping_identity.is_some() {
					flags |= 0x0040
				}

				if self.compression {
					flags |= 0x0008
				}

				if self.encryption.is_some() {
					flags |= 0x0004
				}

				if self.unsynchronisation {
					flags |= 0x0002
				}

				if self.data_length_indicator.is_some() {
					flags |= 0x0001
				}
			},
		}

		flags
	}
}
