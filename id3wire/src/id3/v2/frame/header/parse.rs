use crate::error::Result;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::id3::v2::{FrameFlags, FrameSizeEncoding, Id3v2Version};

use std::io::Read;

/// A frame header as it appears in the tag, before the ID is verified
pub(crate) struct RawFrameHeader {
	id: [u8; 4],
	id_len: usize,
	pub(crate) size: u32,
	pub(crate) flags: FrameFlags,
}

impl RawFrameHeader {
	pub(crate) fn id(&self) -> &[u8] {
		&self.id[..self.id_len]
	}
}

/// Read a frame header of `version`
///
/// Returns `None` if the header is the start of padding.
pub(crate) fn parse_header<R>(reader: &mut R, version: Id3v2Version) -> Result<Option<RawFrameHeader>>
where
	R: Read,
{
	let mut header = [0; 10];
	let header = &mut header[..version.frame_header_len()];
	reader.read_exact(header)?;

	// Assume we just started reading padding
	if header[0] == 0 {
		return Ok(None);
	}

	let id_len = version.frame_id_len();
	let mut id = [0; 4];
	id[..id_len].copy_from_slice(&header[..id_len]);

	let size_bytes = &header[id_len..id_len + version.frame_size_encoding().len()];
	let size = match version.frame_size_encoding() {
		FrameSizeEncoding::BigEndian24 => {
			u32::from_be_bytes([0, size_bytes[0], size_bytes[1], size_bytes[2]])
		},
		FrameSizeEncoding::BigEndian32 => {
			u32::from_be_bytes([size_bytes[0], size_bytes[1], size_bytes[2], size_bytes[3]])
		},
		FrameSizeEncoding::Synchsafe32 => {
			u32::from_be_bytes([size_bytes[0], size_bytes[1], size_bytes[2], size_bytes[3]]).unsynch()
		},
	};

	// V2 doesn't store flags
	let flags = match version {
		Id3v2Version::V2 => FrameFlags::default(),
		Id3v2Version::V3 | Id3v2Version::V4 => {
			FrameFlags::parse(version, u16::from_be_bytes([header[8], header[9]]))
		},
	};

	Ok(Some(RawFrameHeader {
		id,
		id_len,
		size,
		flags,
	}))
}
