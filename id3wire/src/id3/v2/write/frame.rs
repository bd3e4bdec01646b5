use crate::config::WriteOptions;
use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::util::registry::FrameRegistry;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::id3::v2::{Frame, FrameFlags, Id3v2Version};
use crate::macros::err;

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

pub(in crate::id3::v2) fn create_items<'a, W>(
	writer: &mut W,
	frames: impl Iterator<Item = Frame<'a>>,
	write_options: WriteOptions,
	registry: &FrameRegistry,
) -> Result<()>
where
	W: Write,
{
	for frame in frames {
		write_frame(writer, &frame, write_options, registry)?;
	}

	Ok(())
}

/// Write a single frame (header, flag data, and content) for `write_options.version`
pub(crate) fn write_frame<W>(
	writer: &mut W,
	frame: &Frame<'_>,
	write_options: WriteOptions,
	registry: &FrameRegistry,
) -> Result<()>
where
	W: Write,
{
	let version = write_options.version;
	let id = frame.id();
	if !id.is_valid_for(version) {
		return Err(Id3v2Error::new(Id3v2ErrorKind::InvalidFrameId(
			id.as_str().as_bytes().to_vec(),
		))
		.into());
	}

	let value = frame.as_bytes(write_options)?;
	let flags = writable_flags(frame, value.len() as u32);

	let prefix = flag_prefix(flags, version);
	let len = prefix.len() + value.len();
	if len as u64 > u64::from(version.frame_size_encoding().max_size()) {
		err!(TooMuchData);
	}

	log::trace!(
		"Writing frame `{}` ({}), size: {}",
		id,
		registry.describe(version, id.as_str()),
		len
	);

	write_frame_header(writer, id.as_str(), len as u32, flags, version)?;
	writer.write_all(&prefix)?;
	writer.write_all(&value)?;

	Ok(())
}

// Frame content is always written decoded, so the compression, encryption and
// unsynchronisation flags no longer apply.
fn writable_flags(frame: &Frame<'_>, content_len: u32) -> FrameFlags {
	let mut flags = frame.flags();

	if flags.compression || flags.encryption.is_some() || flags.unsynchronisation {
		log::warn!(
			"Frame `{}` content is written as-is, clearing compression/encryption flags",
			frame.id()
		);

		flags.compression = false;
		flags.encryption = None;
		flags.unsynchronisation = false;
	}

	if flags.data_length_indicator.is_some() {
		flags.data_length_indicator = Some(content_len);
	}

	flags
}

// The inverse of the flag data read after the frame header, see `frame::read`.
// Compression and encryption are cleared by `writable_flags`, so only the group
// identifier and data length indicator remain.
fn flag_prefix(flags: FrameFlags, version: Id3v2Version) -> Vec<u8> {
	let mut prefix = Vec::new();

	match version {
		Id3v2Version::V2 => {},
		Id3v2Version::V3 => {
			if let Some(group) = flags.grouping_identity {
				prefix.push(group);
			}
		},
		Id3v2Version::V4 => {
			if let Some(group) = flags.grouping_identity {
				prefix.push(group);
			}

			if let Some(len) = flags.data_length_indicator {
				prefix.extend(len.synch().to_be_bytes());
			}
		},
	}

	prefix
}

fn write_frame_header<W>(
	writer: &mut W,
	name: &str,
	len: u32,
	flags: FrameFlags,
	version: Id3v2Version,
) -> Result<()>
where
	W: Write,
{
	writer.write_all(name.as_bytes())?;

	match version {
		Id3v2Version::V2 => writer.write_u24::<BigEndian>(len)?,
		Id3v2Version::V3 => {
			writer.write_u32::<BigEndian>(len)?;
			writer.write_u16::<BigEndian>(flags.as_bytes(version))?;
		},
		Id3v2Version::V4 => {
			writer.write_u32::<BigEndian>(len.synch())?;
			writer.write_u16::<BigEndian>(flags.as_bytes(version))?;
		},
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::write_frame;
	use crate::TextEncoding;
	use crate::config::{ParseOptions, WriteOptions};
	use crate::error::{ErrorKind, Id3v2ErrorKind};
	use crate::id3::v2::frame::read::ParsedFrame;
	use crate::id3::v2::util::registry::FrameRegistry;
	use crate::id3::v2::{Frame, FrameFlags, FrameId, Id3v2Version, TextInformationFrame};

	fn text_frame(id: &'static str) -> Frame<'static> {
		Frame::Text(TextInformationFrame::new(
			FrameId::new(id).unwrap(),
			TextEncoding::Latin1,
			"Title",
		))
	}

	fn write(frame: &Frame<'_>, version: Id3v2Version) -> Vec<u8> {
		let mut bytes = Vec::new();
		write_frame(
			&mut bytes,
			frame,
			WriteOptions::new().version(version),
			FrameRegistry::global(),
		)
		.unwrap();
		bytes
	}

	#[test_log::test]
	fn header_layouts() {
		assert_eq!(
			write(&text_frame("TT2"), Id3v2Version::V2),
			b"TT2\x00\x00\x06\x00Title"
		);
		assert_eq!(
			write(&text_frame("TIT2"), Id3v2Version::V3),
			b"TIT2\x00\x00\x00\x06\x00\x00\x00Title"
		);
		assert_eq!(
			write(&text_frame("TIT2"), Id3v2Version::V4),
			b"TIT2\x00\x00\x00\x06\x00\x00\x00Title"
		);
	}

	#[test_log::test]
	fn v4_size_is_synchsafe() {
		// 1 encoding byte + 199 characters
		let frame = Frame::Text(TextInformationFrame::new(
			FrameId::new("TIT2").unwrap(),
			TextEncoding::Latin1,
			"a".repeat(199),
		));

		let bytes = write(&frame, Id3v2Version::V4);
		assert_eq!(&bytes[4..8], &[0x00, 0x00, 0x01, 0x48]);

		let bytes = write(&frame, Id3v2Version::V3);
		assert_eq!(&bytes[4..8], &[0x00, 0x00, 0x00, 0xC8]);
	}

	#[test_log::test]
	fn id_must_match_version() {
		let mut bytes = Vec::new();
		let err = write_frame(
			&mut bytes,
			&text_frame("TIT2"),
			WriteOptions::new().version(Id3v2Version::V2),
			FrameRegistry::global(),
		)
		.unwrap_err();

		assert!(matches!(
			err.kind(),
			ErrorKind::Id3v2(e) if matches!(e.kind(), Id3v2ErrorKind::InvalidFrameId(id) if id == b"TIT2")
		));
		assert!(bytes.is_empty());
	}

	#[test_log::test]
	fn prefixes_are_read_back() {
		for version in [Id3v2Version::V3, Id3v2Version::V4] {
			let mut frame = text_frame("TIT2");
			frame.set_flags(FrameFlags {
				grouping_identity: Some(9),
				data_length_indicator: Some(0),
				..FrameFlags::default()
			});

			let bytes = write(&frame, version);
			let mut size_left = bytes.len() as u32;
			let ParsedFrame::Next(Frame::Text(parsed)) = ParsedFrame::read(
				&mut &bytes[..],
				version,
				&mut size_left,
				ParseOptions::new(),
				FrameRegistry::global(),
			)
			.unwrap() else {
				panic!("Expected a text frame");
			};

			assert_eq!(parsed.value, "Title");
			assert_eq!(parsed.flags().grouping_identity, Some(9));
			assert_eq!(size_left, 0);

			// ID3v2.3 has no data length indicator outside of compression
			if version == Id3v2Version::V4 {
				assert_eq!(parsed.flags().data_length_indicator, Some(6));
			}
		}
	}
}
