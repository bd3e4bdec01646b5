use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader, FrameId};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use byteorder::ReadBytesExt;

use std::borrow::Cow;
use std::io::Read;

/// An ID3v2 text frame
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextInformationFrame<'a> {
	pub(crate) header: FrameHeader<'a>,
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The text itself
	pub value: Cow<'a, str>,
}

impl<'a> TextInformationFrame<'a> {
	/// Create a new [`TextInformationFrame`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::TextEncoding;
	/// use id3wire::id3::v2::{FrameId, TextInformationFrame};
	///
	/// # fn main() -> id3wire::error::Result<()> {
	/// let frame = TextInformationFrame::new(FrameId::new("TIT2")?, TextEncoding::UTF8, "Title");
	/// assert_eq!(frame.value, "Title");
	/// # Ok(()) }
	/// ```
	pub fn new(id: FrameId<'a>, encoding: TextEncoding, value: impl Into<Cow<'a, str>>) -> Self {
		let header = FrameHeader::new(id, FrameFlags::default());
		Self {
			header,
			encoding,
			value: value.into(),
		}
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId<'_> {
		&self.header.id
	}

	/// Get the flags for the frame
	pub fn flags(&self) -> FrameFlags {
		self.header.flags
	}

	/// Set the flags for the frame
	pub fn set_flags(&mut self, flags: FrameFlags) {
		self.header.flags = flags;
	}

	/// Read a [`TextInformationFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// Trailing nulls and whitespace are trimmed from the value. Returns `None` if the frame
	/// is empty.
	///
	/// # Errors
	///
	/// * The encoding is not supported by `version`
	/// * Unable to decode the text
	pub fn parse<R>(
		reader: &mut R,
		id: FrameId<'a>,
		frame_flags: FrameFlags,
		version: Id3v2Version,
	) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Ok(encoding_byte) = reader.read_u8() else {
			return Ok(None);
		};

		let encoding = verify_encoding(encoding_byte, version)?;
		let mut value = decode_text(reader, TextDecodeOptions::new().encoding(encoding))?.content;

		let trimmed_len = value
			.trim_end_matches(|c: char| c == '\0' || c.is_whitespace())
			.len();
		value.truncate(trimmed_len);

		let header = FrameHeader::new(id, frame_flags);
		Ok(Some(TextInformationFrame {
			header,
			encoding,
			value: Cow::Owned(value),
		}))
	}

	/// Convert a [`TextInformationFrame`] to a byte vec
	///
	/// The value is written as-is, it is **not** null terminated.
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let encoding = write_options.effective_encoding(self.encoding);

		let mut content = encoding.encode(&self.value, false, write_options.lossy_text_encoding)?;
		content.insert(0, encoding as u8);
		Ok(content)
	}
}
