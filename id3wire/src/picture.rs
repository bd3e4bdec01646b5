//! Attached picture handling

use std::borrow::Cow;
use std::fmt::{Debug, Display, Formatter};

/// MIME types for pictures.
///
/// Only the exact, canonical MIME strings map to a known variant. Anything else is kept verbatim
/// in [`MimeType::Unknown`] so it can be written back unchanged.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum MimeType {
	/// PNG image
	Png,
	/// JPEG image
	Jpeg,
	/// TIFF image
	Tiff,
	/// BMP image
	Bmp,
	/// GIF image
	Gif,
	/// Some unknown MIME type
	Unknown(String),
}

impl MimeType {
	/// Get a `MimeType` from a string
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::picture::MimeType;
	///
	/// let jpeg_mimetype_str = "image/jpeg";
	/// assert_eq!(MimeType::from_str(jpeg_mimetype_str), MimeType::Jpeg);
	///
	/// // Non-canonical spellings are preserved
	/// assert_eq!(MimeType::from_str("image/jpg"), MimeType::Unknown(String::from("image/jpg")));
	/// ```
	#[must_use]
	#[allow(clippy::should_implement_trait)] // Infallible in contrast to FromStr
	pub fn from_str(mime_type: &str) -> Self {
		match mime_type {
			"image/jpeg" => Self::Jpeg,
			"image/png" => Self::Png,
			"image/tiff" => Self::Tiff,
			"image/bmp" => Self::Bmp,
			"image/gif" => Self::Gif,
			_ => Self::Unknown(mime_type.to_owned()),
		}
	}

	/// Get a &str from a `MimeType`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::picture::MimeType;
	///
	/// let jpeg_mimetype = MimeType::Jpeg;
	/// assert_eq!(jpeg_mimetype.as_str(), "image/jpeg")
	/// ```
	#[must_use]
	pub fn as_str(&self) -> &str {
		match self {
			MimeType::Jpeg => "image/jpeg",
			MimeType::Png => "image/png",
			MimeType::Tiff => "image/tiff",
			MimeType::Bmp => "image/bmp",
			MimeType::Gif => "image/gif",
			MimeType::Unknown(unknown) => unknown,
		}
	}

	/// Get a `MimeType` from an ID3v2.2 image format
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::picture::MimeType;
	///
	/// assert_eq!(MimeType::from_id3v22_format(*b"JPG"), MimeType::Jpeg);
	/// ```
	pub fn from_id3v22_format(format: [u8; 3]) -> Self {
		match &format {
			b"PNG" => Self::Png,
			b"JPG" => Self::Jpeg,
			b"TIF" => Self::Tiff,
			b"BMP" => Self::Bmp,
			b"GIF" => Self::Gif,
			_ => Self::Unknown(String::from_utf8_lossy(&format).into_owned()),
		}
	}

	/// Get the ID3v2.2 image format for this `MimeType`
	///
	/// Returns `None` for [`MimeType::Unknown`] values that aren't exactly 3 ASCII characters.
	pub fn as_id3v22_format(&self) -> Option<[u8; 3]> {
		match self {
			MimeType::Png => Some(*b"PNG"),
			MimeType::Jpeg => Some(*b"JPG"),
			MimeType::Tiff => Some(*b"TIF"),
			MimeType::Bmp => Some(*b"BMP"),
			MimeType::Gif => Some(*b"GIF"),
			MimeType::Unknown(unknown) => match unknown.as_bytes() {
				[a, b, c] if unknown.is_ascii() => Some([*a, *b, *c]),
				_ => None,
			},
		}
	}
}

impl Display for MimeType {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The picture type, according to ID3v2 APIC
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum PictureType {
	Other,
	Icon,
	OtherIcon,
	CoverFront,
	CoverBack,
	Leaflet,
	Media,
	LeadArtist,
	Artist,
	Conductor,
	Band,
	Composer,
	Lyricist,
	RecordingLocation,
	DuringRecording,
	DuringPerformance,
	ScreenCapture,
	BrightFish,
	Illustration,
	BandLogo,
	PublisherLogo,
	Undefined(u8),
}

impl PictureType {
	/// Get a `u8` from a `PictureType` according to ID3v2 APIC
	pub fn as_u8(&self) -> u8 {
		match self {
			Self::Other => 0,
			Self::Icon => 1,
			Self::OtherIcon => 2,
			Self::CoverFront => 3,
			Self::CoverBack => 4,
			Self::Leaflet => 5,
			Self::Media => 6,
			Self::LeadArtist => 7,
			Self::Artist => 8,
			Self::Conductor => 9,
			Self::Band => 10,
			Self::Composer => 11,
			Self::Lyricist => 12,
			Self::RecordingLocation => 13,
			Self::DuringRecording => 14,
			Self::DuringPerformance => 15,
			Self::ScreenCapture => 16,
			Self::BrightFish => 17,
			Self::Illustration => 18,
			Self::BandLogo => 19,
			Self::PublisherLogo => 20,
			Self::Undefined(i) => *i,
		}
	}

	/// Get a `PictureType` from a u8 according to ID3v2 APIC
	pub fn from_u8(byte: u8) -> Self {
		match byte {
			0 => Self::Other,
			1 => Self::Icon,
			2 => Self::OtherIcon,
			3 => Self::CoverFront,
			4 => Self::CoverBack,
			5 => Self::Leaflet,
			6 => Self::Media,
			7 => Self::LeadArtist,
			8 => Self::Artist,
			9 => Self::Conductor,
			10 => Self::Band,
			11 => Self::Composer,
			12 => Self::Lyricist,
			13 => Self::RecordingLocation,
			14 => Self::DuringRecording,
			15 => Self::DuringPerformance,
			16 => Self::ScreenCapture,
			17 => Self::BrightFish,
			18 => Self::Illustration,
			19 => Self::BandLogo,
			20 => Self::PublisherLogo,
			i => Self::Undefined(i),
		}
	}
}

/// Builder for a [`Picture`]
///
/// This is created through [`Picture::unchecked()`].
pub struct PictureBuilder {
	pic_type: PictureType,
	mime_type: Option<MimeType>,
	description: Option<Cow<'static, str>>,
	data: Cow<'static, [u8]>,
}

impl PictureBuilder {
	fn new(data: Cow<'static, [u8]>) -> Self {
		Self {
			pic_type: PictureType::Other,
			mime_type: None,
			description: None,
			data,
		}
	}

	/// Set the [`PictureType`] for this picture
	pub fn pic_type(mut self, pic_type: PictureType) -> Self {
		self.pic_type = pic_type;
		self
	}

	/// Set the [`MimeType`] for this picture
	pub fn mime_type(mut self, mime_type: MimeType) -> Self {
		self.mime_type = Some(mime_type);
		self
	}

	/// Set the description for this picture
	///
	/// An empty description is the same as no description.
	pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
		let description = description.into();
		self.description = (!description.is_empty()).then_some(description);
		self
	}

	/// Build the [`Picture`]
	pub fn build(self) -> Picture {
		Picture {
			pic_type: self.pic_type,
			mime_type: self.mime_type,
			description: self.description,
			data: self.data,
		}
	}
}

/// Represents a picture.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Picture {
	/// The picture type according to ID3v2 APIC
	pub(crate) pic_type: PictureType,
	/// The picture's mimetype
	pub(crate) mime_type: Option<MimeType>,
	/// The picture's description
	pub(crate) description: Option<Cow<'static, str>>,
	/// The binary data of the picture
	pub(crate) data: Cow<'static, [u8]>,
}

impl Debug for Picture {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Picture")
			.field("pic_type", &self.pic_type)
			.field("mime_type", &self.mime_type)
			.field("description", &self.description)
			.field("data", &format!("<{} bytes>", self.data.len()))
			.finish()
	}
}

impl Picture {
	/// Create a new `Picture` with no verification
	///
	/// This will **not** verify `data`'s signature.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::picture::{MimeType, Picture, PictureType};
	///
	/// let picture = Picture::unchecked(vec![0x89, b'P', b'N', b'G'])
	/// 	.pic_type(PictureType::Band)
	/// 	.mime_type(MimeType::Png)
	/// 	.description("The band on stage")
	/// 	.build();
	///
	/// assert_eq!(picture.pic_type(), PictureType::Band);
	/// assert_eq!(picture.description(), Some("The band on stage"));
	/// ```
	pub fn unchecked(data: Vec<u8>) -> PictureBuilder {
		PictureBuilder::new(Cow::Owned(data))
	}

	/// Returns the [`PictureType`]
	pub fn pic_type(&self) -> PictureType {
		self.pic_type
	}

	/// Sets the [`PictureType`]
	pub fn set_pic_type(&mut self, pic_type: PictureType) {
		self.pic_type = pic_type
	}

	/// Returns the [`MimeType`]
	pub fn mime_type(&self) -> Option<&MimeType> {
		self.mime_type.as_ref()
	}

	/// Sets the [`MimeType`]
	pub fn set_mime_type(&mut self, mime_type: Option<MimeType>) {
		self.mime_type = mime_type
	}

	/// Returns the description
	pub fn description(&self) -> Option<&str> {
		self.description.as_deref()
	}

	/// Sets the description
	///
	/// An empty description is the same as no description.
	pub fn set_description(&mut self, description: Option<String>) {
		self.description = description.filter(|d| !d.is_empty()).map(Cow::from);
	}

	/// Returns the [`Picture`] data as borrowed bytes.
	pub fn data(&self) -> &[u8] {
		&self.data
	}

	/// Consumes a [`Picture`], returning the data as [`Vec`] without clones or allocation.
	pub fn into_data(self) -> Vec<u8> {
		self.data.into_owned()
	}
}

impl From<Picture> for Cow<'_, Picture> {
	fn from(pic: Picture) -> Self {
		Cow::Owned(pic)
	}
}

impl<'a> From<&'a Picture> for Cow<'a, Picture> {
	fn from(pic: &'a Picture) -> Self {
		Cow::Borrowed(pic)
	}
}
