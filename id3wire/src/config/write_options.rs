use crate::id3::v2::Id3v2Version;
use crate::util::text::TextEncoding;

/// Options to control how id3wire writes a tag
///
/// This is best used as an application global config that gets set once.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) version: Id3v2Version,
	pub(crate) text_encoding: TextEncoding,
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) lossy_text_encoding: bool,
}

impl WriteOptions {
	/// Default ID3v2 version to write
	pub const DEFAULT_VERSION: Id3v2Version = Id3v2Version::V4;

	/// Default text encoding, available in every ID3v2 version
	pub const DEFAULT_TEXT_ENCODING: TextEncoding = TextEncoding::UTF16;

	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			version: Self::DEFAULT_VERSION,
			text_encoding: Self::DEFAULT_TEXT_ENCODING,
			preferred_padding: None,
			lossy_text_encoding: false,
		}
	}

	/// The ID3v2 version to write
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::config::WriteOptions;
	/// use id3wire::id3::v2::Id3v2Version;
	///
	/// // My player only understands ID3v2.3
	/// let options = WriteOptions::new().version(Id3v2Version::V3);
	/// ```
	pub fn version(mut self, version: Id3v2Version) -> Self {
		self.version = version;
		self
	}

	/// The text encoding to use for every frame
	///
	/// NOTE: [`TextEncoding::UTF8`] and [`TextEncoding::UTF16BE`] only exist in ID3v2.4. When writing
	/// an older version, [`TextEncoding::UTF16`] is used instead.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::TextEncoding;
	/// use id3wire::config::WriteOptions;
	///
	/// let options = WriteOptions::new().text_encoding(TextEncoding::UTF8);
	/// ```
	pub fn text_encoding(mut self, text_encoding: TextEncoding) -> Self {
		self.text_encoding = text_encoding;
		self
	}

	/// Set the preferred padding size in bytes
	///
	/// The padding is written as zeroes after the last frame.
	///
	/// NOTES:
	///
	/// * ID3v2.4 tags with a footer never have padding, the preferred size is ignored
	/// * The padding is never shrunk to fit. If it pushes the tag past the maximum tag size
	///   (256 MiB), writing fails with [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData)
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::config::WriteOptions;
	///
	/// // Leave some room for the tag to grow
	/// let options = WriteOptions::new().preferred_padding(2048);
	///
	/// // ...Or I don't want padding under any circumstances!
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		match preferred_padding {
			0 => self.preferred_padding = None,
			_ => self.preferred_padding = Some(preferred_padding),
		}
		self
	}

	/// Whether to replace characters that can't be encoded
	///
	/// This only affects [`TextEncoding::Latin1`], where any character above `U+00FF` is
	/// replaced with `?`. When disabled, such characters cause an
	/// [`ErrorKind::TextEncode`](crate::error::ErrorKind::TextEncode) error.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::TextEncoding;
	/// use id3wire::config::WriteOptions;
	///
	/// let options = WriteOptions::new()
	/// 	.text_encoding(TextEncoding::Latin1)
	/// 	.lossy_text_encoding(true);
	/// ```
	pub fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}

	/// The encoding that will actually be written, after substitutions for the target version
	pub(crate) fn effective_encoding(&self, encoding: TextEncoding) -> TextEncoding {
		match self.version {
			Id3v2Version::V4 => encoding,
			Id3v2Version::V2 | Id3v2Version::V3 => encoding.to_id3v23(),
		}
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	version: Id3v2Version::V4,
	/// 	text_encoding: TextEncoding::UTF16,
	/// 	preferred_padding: None,
	/// 	lossy_text_encoding: false,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
