use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::items::{AttachedPictureFrame, CommentFrame, TextInformationFrame};
use crate::id3::v2::{Frame, FrameFlags, FrameId};
use crate::macros::id3v2_err;
use crate::util::text::TextEncoding;

use std::io::Read;

#[rustfmt::skip]
pub(super) fn parse_content<R: Read>(
	reader: &mut R,
	id: FrameId<'static>,
	flags: FrameFlags,
	version: Id3v2Version,
	parse_options: ParseOptions,
) -> Result<Option<Frame<'static>>> {
	log::trace!("Parsing frame content for ID: {}", id);

	Ok(match (version, id.as_str()) {
		(Id3v2Version::V2, "PIC") | (Id3v2Version::V3 | Id3v2Version::V4, "APIC") => {
			if !parse_options.read_cover_art {
				log::trace!("Skipping cover art");
				return Ok(None);
			}

			Some(Frame::Picture(AttachedPictureFrame::parse(reader, id, flags, version)?))
		},
		(Id3v2Version::V2, "COM") | (Id3v2Version::V3 | Id3v2Version::V4, "COMM") => {
			CommentFrame::parse(reader, id, flags, version)?.map(Frame::Comment)
		},
		(_, i) if is_text_frame(i) => TextInformationFrame::parse(reader, id, flags, version)?.map(Frame::Text),
		_ => None,
	})
}

/// Whether `id` is a frame [`parse_content`] decodes for `version`
///
/// Anything else can be skipped without reading its content.
pub(super) fn has_content_parser(id: &str, version: Id3v2Version) -> bool {
	match (version, id) {
		(Id3v2Version::V2, "PIC" | "COM") => true,
		(Id3v2Version::V3 | Id3v2Version::V4, "APIC" | "COMM") => true,
		(_, i) => is_text_frame(i),
	}
}

// User defined text frames carry a description, they aren't plain text
fn is_text_frame(id: &str) -> bool {
	id.starts_with('T') && !matches!(id, "TXX" | "TXXX")
}

/// Get the [`TextEncoding`] for an encoding byte, only allowing those supported by `version`
pub(in crate::id3::v2) fn verify_encoding(
	encoding: u8,
	version: Id3v2Version,
) -> Result<TextEncoding> {
	match TextEncoding::from_u8(encoding) {
		Some(e) if version.supports_encoding(e) => Ok(e),
		_ => id3v2_err!(UnsupportedEncoding(encoding)),
	}
}

#[cfg(test)]
mod tests {
	use super::{has_content_parser, verify_encoding};
	use crate::TextEncoding;
	use crate::id3::v2::Id3v2Version;

	#[test_log::test]
	fn supported_encodings() {
		for version in [Id3v2Version::V2, Id3v2Version::V3] {
			assert_eq!(verify_encoding(0, version).unwrap(), TextEncoding::Latin1);
			assert_eq!(verify_encoding(1, version).unwrap(), TextEncoding::UTF16);
			assert!(verify_encoding(2, version).is_err());
			assert!(verify_encoding(3, version).is_err());
		}

		assert_eq!(
			verify_encoding(2, Id3v2Version::V4).unwrap(),
			TextEncoding::UTF16BE
		);
		assert_eq!(
			verify_encoding(3, Id3v2Version::V4).unwrap(),
			TextEncoding::UTF8
		);
		assert!(verify_encoding(4, Id3v2Version::V4).is_err());
	}

	#[test_log::test]
	fn parsed_frame_ids() {
		assert!(has_content_parser("PIC", Id3v2Version::V2));
		assert!(!has_content_parser("PIC", Id3v2Version::V3));
		assert!(has_content_parser("APIC", Id3v2Version::V4));
		assert!(has_content_parser("COM", Id3v2Version::V2));
		assert!(has_content_parser("TIT2", Id3v2Version::V3));
		assert!(has_content_parser("TT2", Id3v2Version::V2));

		assert!(!has_content_parser("TXXX", Id3v2Version::V4));
		assert!(!has_content_parser("TXX", Id3v2Version::V2));
		assert!(!has_content_parser("PRIV", Id3v2Version::V4));
		assert!(!has_content_parser("GEOB", Id3v2Version::V3));
	}
}
