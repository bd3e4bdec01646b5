//! Contains the errors that can arise within id3wire
//!
//! The primary error is [`Id3Error`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Id3Error>`
pub type Result<T> = std::result::Result<T, Id3Error>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	// Input related errors
	/// No ID3 tag could be classified in the provided buffer
	NoTag,

	// Data related errors
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,
	/// Errors that arise while decoding text
	TextDecode(&'static str),
	/// Errors that arise while encoding text
	TextEncode(TextEncodingError),
	/// Errors that arise while reading/writing ID3v2 tags
	Id3v2(Id3v2Error),

	// Conversions for external errors
	/// Unable to parse an integer out of a text frame
	ParseInt(std::num::ParseIntError),
	/// Unable to convert bytes to a String
	StringFromUtf8(std::string::FromUtf8Error),
	/// Unable to convert bytes to a str
	StrFromUtf8(std::str::Utf8Error),
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
}

/// The types of errors that can occur while interacting with ID3v2 tags
#[derive(Debug)]
#[non_exhaustive]
pub enum Id3v2ErrorKind {
	// Header
	/// Arises when the tag doesn't start with "ID3"
	InvalidIdentifier([u8; 3]),
	/// Arises when the version bytes don't match the version being decoded (major, revision)
	InvalidVersion(u8, u8),
	/// Arises when the tag header declares a size of 0
	InvalidSize,
	/// Arises when a compressed ID3v2.2 tag is encountered
	///
	/// At the time ID3v2.2 was written, a compression scheme wasn't decided.
	/// As such, it is recommended to ignore the tag entirely.
	V2Compression,
	/// Arises when an extended header has an invalid size (must be >= 6 bytes and less than the total tag size)
	BadExtendedHeaderSize,

	// Frame
	/// Arises when a text encoding byte isn't valid for the tag version
	UnsupportedEncoding(u8),
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	/// or if the ID is the wrong length for the tag version.
	InvalidFrameId(Vec<u8>),
	/// Arises when a frame declares more data than the tag has left
	BadFrameLength,
	/// Arises when a frame with no content is parsed with [ParsingMode::Strict](crate::config::ParsingMode::Strict)
	EmptyFrame(String),
	/// Arises when an ID3v2.2 picture carries an image format that isn't 3 characters long
	BadPictureFormat(String),

	// Writing
	/// Arises when attempting to write a comment with a language that isn't 2-3 lowercase ASCII letters
	InvalidLanguageCode(String),
	/// Arises when attempting to write a negative track number or track total
	InvalidTrackNumber(i32),
}

impl Display for Id3v2ErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			// Header
			Self::InvalidIdentifier(ident) => {
				write!(f, "Expected an \"ID3\" identifier, found {ident:?}")
			},
			Self::InvalidVersion(major, revision) => {
				write!(f, "Found an unexpected version (v2.{major}.{revision})")
			},
			Self::InvalidSize => write!(f, "Tag header declares a size of 0"),
			Self::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),
			Self::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},

			// Frame
			Self::UnsupportedEncoding(byte) => {
				write!(f, "Encountered an unsupported text encoding ({byte})")
			},
			Self::InvalidFrameId(frame_id) => {
				write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}")
			},
			Self::BadFrameLength => write!(
				f,
				"Frame declares more data than is available in the tag"
			),
			Self::EmptyFrame(id) => write!(f, "Frame `{id}` is empty"),
			Self::BadPictureFormat(format) => {
				write!(f, "Picture: Found unexpected format \"{format}\"")
			},

			// Writing
			Self::InvalidLanguageCode(lang) => write!(
				f,
				"Invalid frame language found: {lang:?} (expected 2-3 lowercase ascii letters)"
			),
			Self::InvalidTrackNumber(n) => {
				write!(f, "Track numbers cannot be negative (found {n})")
			},
		}
	}
}

/// An error that arises while interacting with an ID3v2 tag
pub struct Id3v2Error {
	kind: Id3v2ErrorKind,
}

impl Id3v2Error {
	/// Create a new `Id3v2Error` from an [`Id3v2ErrorKind`]
	#[must_use]
	pub const fn new(kind: Id3v2ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`Id3v2ErrorKind`]
	pub fn kind(&self) -> &Id3v2ErrorKind {
		&self.kind
	}
}

impl Debug for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {:?}", self.kind)
	}
}

impl Display for Id3v2Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2: {}", self.kind)
	}
}

/// Errors that could occur within id3wire
pub struct Id3Error {
	pub(crate) kind: ErrorKind,
}

impl Id3Error {
	/// Create an `Id3Error` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::error::{ErrorKind, Id3Error};
	///
	/// let no_tag = Id3Error::new(ErrorKind::NoTag);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::error::{ErrorKind, Id3Error};
	///
	/// let no_tag = Id3Error::new(ErrorKind::NoTag);
	/// if let ErrorKind::NoTag = no_tag.kind() {
	/// 	println!("Nothing to read here");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}
}

impl std::error::Error for Id3Error {}

impl Debug for Id3Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<Id3v2Error> for Id3Error {
	fn from(input: Id3v2Error) -> Self {
		Self {
			kind: ErrorKind::Id3v2(input),
		}
	}
}

impl From<Id3v2ErrorKind> for Id3Error {
	fn from(input: Id3v2ErrorKind) -> Self {
		Self {
			kind: ErrorKind::Id3v2(Id3v2Error::new(input)),
		}
	}
}

impl From<TextEncodingError> for Id3Error {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::TextEncode(input),
		}
	}
}

impl From<std::io::Error> for Id3Error {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<std::num::ParseIntError> for Id3Error {
	fn from(input: std::num::ParseIntError) -> Self {
		Self {
			kind: ErrorKind::ParseInt(input),
		}
	}
}

impl From<std::string::FromUtf8Error> for Id3Error {
	fn from(input: std::string::FromUtf8Error) -> Self {
		Self {
			kind: ErrorKind::StringFromUtf8(input),
		}
	}
}

impl From<std::str::Utf8Error> for Id3Error {
	fn from(input: std::str::Utf8Error) -> Self {
		Self {
			kind: ErrorKind::StrFromUtf8(input),
		}
	}
}

impl From<std::collections::TryReserveError> for Id3Error {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl Display for Id3Error {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::ParseInt(ref err) => write!(f, "{err}"),
			ErrorKind::StringFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::StrFromUtf8(ref err) => write!(f, "{err}"),
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::NoTag => write!(f, "No ID3 tag could be found in the provided data"),
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),
			ErrorKind::TextDecode(message) => write!(f, "Text decoding: {message}"),
			ErrorKind::TextEncode(message) => write!(f, "Text encoding: {message}"),
			ErrorKind::Id3v2(ref id3v2_err) => write!(f, "{id3v2_err}"),
		}
	}
}
