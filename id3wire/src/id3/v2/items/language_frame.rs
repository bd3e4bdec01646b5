use crate::config::WriteOptions;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader, FrameId};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::borrow::Cow;
use std::io::Read;

use byteorder::ReadBytesExt;

const FRAME_ID: FrameId<'static> = FrameId::from_static("COMM");

/// An ID3v2 comment frame
///
/// The language is an ISO-639-2 code of 2 or 3 lowercase ASCII letters. 2 letter codes are
/// padded with a null byte when written.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommentFrame<'a> {
	pub(crate) header: FrameHeader<'a>,
	/// The encoding of the description and comment text
	pub encoding: TextEncoding,
	/// ISO-639-2 language code
	pub language: Cow<'a, str>,
	/// Unique content description
	pub description: Cow<'a, str>,
	/// The actual frame content
	pub content: Cow<'a, str>,
}

impl<'a> CommentFrame<'a> {
	/// Create a new [`CommentFrame`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::TextEncoding;
	/// use id3wire::id3::v2::CommentFrame;
	///
	/// let frame = CommentFrame::new(TextEncoding::UTF8, "eng", "Comment", "Some comment");
	/// assert_eq!(frame.id().as_str(), "COMM");
	/// ```
	pub fn new(
		encoding: TextEncoding,
		language: impl Into<Cow<'a, str>>,
		description: impl Into<Cow<'a, str>>,
		content: impl Into<Cow<'a, str>>,
	) -> Self {
		let header = FrameHeader::new(FRAME_ID, FrameFlags::default());
		Self {
			header,
			encoding,
			language: language.into(),
			description: description.into(),
			content: content.into(),
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

	/// Read a [`CommentFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// The description ends at the first terminator for the encoding, everything after it is the
	/// comment. Returns `None` if the frame is empty.
	///
	/// # Errors
	///
	/// * The encoding is not supported by `version`
	/// * The frame is too short to hold a language code
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

		let mut language = [0; 3];
		reader.read_exact(&mut language)?;

		// 2 letter codes are null padded
		let language = language
			.iter()
			.take_while(|b| **b != 0)
			.map(|b| char::from(*b))
			.collect::<String>();

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;

		// A UTF-16 comment without its own BOM uses the description's
		let content = decode_text(
			reader,
			TextDecodeOptions::new()
				.encoding(encoding)
				.bom(description.bom),
		)?
		.content;

		let header = FrameHeader::new(id, frame_flags);
		Ok(Some(Self {
			header,
			encoding,
			language: Cow::Owned(language),
			description: Cow::Owned(description.content),
			content: Cow::Owned(content),
		}))
	}

	/// Convert a [`CommentFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * `language` is not 2-3 lowercase ASCII letters
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let language = language_bytes(&self.language)?;
		let encoding = write_options.effective_encoding(self.encoding);

		let mut bytes = vec![encoding as u8];
		bytes.extend(language);
		bytes.extend(encoding.encode(
			&self.description,
			true,
			write_options.lossy_text_encoding,
		)?);
		bytes.extend(encoding.encode(
			&self.content,
			false,
			write_options.lossy_text_encoding,
		)?);

		Ok(bytes)
	}
}

// Languages must match `^[a-z]{2,3}$`
fn language_bytes(language: &str) -> Result<[u8; 3]> {
	let valid = (2..=3).contains(&language.len())
		&& language.bytes().all(|b| b.is_ascii_lowercase());
	if !valid {
		return Err(Id3v2Error::new(Id3v2ErrorKind::InvalidLanguageCode(language.to_owned())).into());
	}

	let mut bytes = [0; 3];
	bytes[..language.len()].copy_from_slice(language.as_bytes());
	Ok(bytes)
}
