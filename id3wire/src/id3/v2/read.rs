use super::frame::read::ParsedFrame;
use super::header::{ID3V2_HEADER_LEN, Id3v2Header};
use super::tag::Id3v2Tag;
use super::util::registry::FrameRegistry;
use crate::config::ParseOptions;
use crate::error::Result;

use std::io::Read;

pub(crate) fn parse_id3v2<R>(
	bytes: &mut R,
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag>
where
	R: Read,
{
	log::debug!(
		"Parsing ID3v2 tag, size: {} ({} with header), version: {:?}",
		header.size,
		header.full_tag_size(),
		header.version
	);

	if header.flags.unsynchronisation {
		log::warn!("Tag is unsynchronised, frames will be read as-is");
	}

	let mut tag = Id3v2Tag::default();
	tag.original_version = header.version;
	tag.set_flags(header.flags);

	let registry = FrameRegistry::global();
	let mut size_left = header.size - header.extended_size;

	loop {
		match ParsedFrame::read(
			bytes,
			header.version,
			&mut size_left,
			parse_options,
			registry,
		)? {
			ParsedFrame::Next(frame) => tag.apply_frame(frame)?,
			ParsedFrame::Skip => continue,
			ParsedFrame::Eof => break,
		}
	}

	if header.flags.footer {
		read_footer(bytes)?;
	}

	Ok(tag)
}

// The footer is a copy of the header, there's nothing to keep from it
fn read_footer<R>(bytes: &mut R) -> Result<()>
where
	R: Read,
{
	let mut footer = [0; ID3V2_HEADER_LEN as usize];
	bytes.read_exact(&mut footer)?;

	if &footer[..3] != b"3DI" {
		log::warn!("Expected a tag footer, found {:?}", &footer[..3]);
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::config::{ParseOptions, ParsingMode};
	use crate::error::{ErrorKind, Id3v2ErrorKind};
	use crate::id3::v2::{Id3v2Tag, Id3v2Version};
	use crate::tag::Accessor;

	fn read(bytes: &[u8], version: Id3v2Version) -> crate::error::Result<Id3v2Tag> {
		Id3v2Tag::read_from(&mut &bytes[..], version, ParseOptions::new())
	}

	#[test_log::test]
	fn v3_frames_with_padding() {
		let mut bytes = b"ID3\x03\x00\x00\x00\x00\x00\x30".to_vec();
		bytes.extend_from_slice(b"TIT2\x00\x00\x00\x06\x00\x00\x00Title");
		bytes.extend_from_slice(b"TRCK\x00\x00\x00\x04\x00\x00\x002/5");
		bytes.extend_from_slice(&[0; 0x30 - 16 - 14]);

		let tag = read(&bytes, Id3v2Version::V3).unwrap();
		assert_eq!(tag.title().as_deref(), Some("Title"));
		assert_eq!(tag.track(), Some(2));
		assert_eq!(tag.track_total(), Some(5));
		assert_eq!(tag.original_version(), Id3v2Version::V3);
	}

	#[test_log::test]
	fn unknown_frames_are_dropped() {
		let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x1A".to_vec();
		bytes.extend_from_slice(b"PRIV\x00\x00\x00\x04\x00\x00abcd");
		bytes.extend_from_slice(b"TPE1\x00\x00\x00\x02\x00\x00\x00A");

		let tag = read(&bytes, Id3v2Version::V4).unwrap();
		assert_eq!(tag.artist().as_deref(), Some("A"));
		assert!(tag.title().is_none());
	}

	#[test_log::test]
	fn extended_header_is_skipped() {
		let mut bytes = b"ID3\x03\x00\x40\x00\x00\x00\x1A".to_vec();
		// Size (6, excluding itself), flags, padding size
		bytes.extend_from_slice(&[0, 0, 0, 6, 0, 0, 0, 0, 0, 0]);
		bytes.extend_from_slice(b"TALB\x00\x00\x00\x06\x00\x00\x00Album");

		let tag = read(&bytes, Id3v2Version::V3).unwrap();
		assert!(tag.flags().extended_header);
		assert_eq!(tag.album().as_deref(), Some("Album"));
	}

	#[test_log::test]
	fn footer_is_consumed() {
		let mut bytes = b"ID3\x04\x00\x10\x00\x00\x00\x0F".to_vec();
		bytes.extend_from_slice(b"TIT2\x00\x00\x00\x05\x00\x00\x03Song");
		bytes.extend_from_slice(b"3DI\x04\x00\x10\x00\x00\x00\x0F");
		bytes.push(0xFF);

		let mut reader = &bytes[..];
		let tag = Id3v2Tag::read_from(&mut reader, Id3v2Version::V4, ParseOptions::new())
			.unwrap();

		assert!(tag.flags().footer);
		assert_eq!(tag.title().as_deref(), Some("Song"));
		assert_eq!(reader, &[0xFF]);
	}

	#[test_log::test]
	fn truncated_tag() {
		// Declares 0x20 bytes, but the frame ends early
		let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x20".to_vec();
		bytes.extend_from_slice(b"TIT2\x00\x00\x00\x10\x00\x00\x00Ti");

		let err = read(&bytes, Id3v2Version::V4).unwrap_err();
		assert!(
			matches!(err.kind(), ErrorKind::Io(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
		);
	}

	#[test_log::test]
	fn frame_larger_than_tag() {
		let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x10".to_vec();
		bytes.extend_from_slice(b"TIT2\x00\x00\x01\x00\x00\x00\x00Title");

		let err = read(&bytes, Id3v2Version::V4).unwrap_err();
		assert!(matches!(
			err.kind(),
			ErrorKind::Id3v2(e) if matches!(e.kind(), Id3v2ErrorKind::BadFrameLength)
		));
	}

	#[test_log::test]
	fn strict_mode_rejects_bad_ids() {
		let mut bytes = b"ID3\x04\x00\x00\x00\x00\x00\x0B".to_vec();
		bytes.extend_from_slice(b"T!T2\x00\x00\x00\x01\x00\x00\x00");

		assert!(read(&bytes, Id3v2Version::V4).unwrap().is_empty());

		let err = Id3v2Tag::read_from(
			&mut &bytes[..],
			Id3v2Version::V4,
			ParseOptions::new().parsing_mode(ParsingMode::Strict),
		)
		.unwrap_err();
		assert!(matches!(
			err.kind(),
			ErrorKind::Id3v2(e) if matches!(e.kind(), Id3v2ErrorKind::InvalidFrameId(_))
		));
	}
}
