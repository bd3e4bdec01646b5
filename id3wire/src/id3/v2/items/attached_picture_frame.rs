use crate::config::WriteOptions;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::{FrameFlags, FrameHeader, FrameId};
use crate::macros::err;
use crate::picture::{MimeType, Picture, PictureType};
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::borrow::Cow;
use std::io::{Read, Write as _};

use byteorder::{ReadBytesExt as _, WriteBytesExt as _};

const FRAME_ID: FrameId<'static> = FrameId::from_static("APIC");

/// An ID3v2 attached picture frame
///
/// This is used for both "APIC" (ID3v2.3/4) and "PIC" (ID3v2.2) frames. The only difference
/// is that "PIC" frames store a 3 character image format instead of a MIME type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachedPictureFrame<'a> {
	pub(crate) header: FrameHeader<'a>,
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The picture contained in the frame
	pub picture: Cow<'a, Picture>,
}

impl<'a> AttachedPictureFrame<'a> {
	/// Create a new [`AttachedPictureFrame`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::TextEncoding;
	/// use id3wire::id3::v2::AttachedPictureFrame;
	/// use id3wire::picture::{MimeType, Picture, PictureType};
	///
	/// let picture = Picture::unchecked(vec![0xFF, 0xD8, 0xFF])
	/// 	.pic_type(PictureType::CoverFront)
	/// 	.mime_type(MimeType::Jpeg)
	/// 	.build();
	///
	/// let frame = AttachedPictureFrame::new(TextEncoding::UTF8, picture);
	/// assert_eq!(frame.id().as_str(), "APIC");
	/// ```
	pub fn new(encoding: TextEncoding, picture: impl Into<Cow<'a, Picture>>) -> Self {
		let header = FrameHeader::new(FRAME_ID, FrameFlags::default());
		Self {
			header,
			encoding,
			picture: picture.into(),
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

	/// Get an [`AttachedPictureFrame`] from ID3v2 A/PIC bytes
	///
	/// NOTE: This expects *only* the frame content
	///
	/// # Errors
	///
	/// * There isn't enough data present
	/// * The encoding is not supported by `version`
	/// * Unable to decode the MIME type or description
	pub fn parse<R>(
		reader: &mut R,
		id: FrameId<'a>,
		frame_flags: FrameFlags,
		version: Id3v2Version,
	) -> Result<Self>
	where
		R: Read,
	{
		let encoding = verify_encoding(reader.read_u8()?, version)?;

		let mime_type = if version == Id3v2Version::V2 {
			let mut format = [0; 3];
			reader.read_exact(&mut format)?;

			(format != [0; 3]).then(|| MimeType::from_id3v22_format(format))
		} else {
			let mime_type_str = decode_text(
				reader,
				TextDecodeOptions::new()
					.encoding(TextEncoding::Latin1)
					.terminated(true),
			)?
			.content;

			(!mime_type_str.is_empty()).then(|| MimeType::from_str(&mime_type_str))
		};

		let pic_type = PictureType::from_u8(reader.read_u8()?);

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?
		.content;

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		let picture = Picture {
			pic_type,
			mime_type,
			description: (!description.is_empty()).then(|| Cow::Owned(description)),
			data: Cow::Owned(data),
		};

		let header = FrameHeader::new(id, frame_flags);
		Ok(Self {
			header,
			encoding,
			picture: Cow::Owned(picture),
		})
	}

	/// Convert an [`AttachedPictureFrame`] to A/PIC bytes
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the description cannot be encoded in the specified [`TextEncoding`].
	/// * Writing ID3v2.2, and the MIME type has no 3 character image format
	/// * Writing ID3v2.3/4, and the MIME type isn't plain ASCII
	/// * The picture is too large to fit in a frame
	pub fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		let encoding = write_options.effective_encoding(self.encoding);

		let mut data = vec![encoding as u8];

		if write_options.version == Id3v2Version::V2 {
			let format = match &self.picture.mime_type {
				Some(mime_type) => match mime_type.as_id3v22_format() {
					Some(format) => format,
					None => {
						return Err(Id3v2Error::new(Id3v2ErrorKind::BadPictureFormat(
							mime_type.to_string(),
						))
						.into());
					},
				},
				None => [0; 3],
			};

			data.write_all(&format)?;
		} else {
			if let Some(mime_type) = &self.picture.mime_type {
				// Read back as a terminated Latin-1 string
				let mime_str = mime_type.as_str();
				if !mime_str.is_ascii() || mime_str.contains('\0') {
					return Err(Id3v2Error::new(Id3v2ErrorKind::BadPictureFormat(
						mime_str.to_owned(),
					))
					.into());
				}

				data.write_all(mime_str.as_bytes())?;
			}
			data.write_u8(0)?;
		}

		data.write_u8(self.picture.pic_type.as_u8())?;

		match &self.picture.description {
			Some(description) => data.write_all(&encoding.encode(
				description,
				true,
				write_options.lossy_text_encoding,
			)?)?,
			None => data.write_all(encoding.terminator())?,
		}

		data.write_all(&self.picture.data)?;

		if data.len() as u64 > u64::from(write_options.version.frame_size_encoding().max_size()) {
			err!(TooMuchData);
		}

		Ok(data)
	}
}
