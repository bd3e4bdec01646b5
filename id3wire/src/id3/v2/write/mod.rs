pub(crate) mod frame;

use super::Id3v2TagFlags;
use super::header::{ID3V2_HEADER_LEN, Id3v2Version};
use super::tag::Id3v2Tag;
use super::util::registry::FrameRegistry;
use super::util::synchsafe::{SynchsafeInteger, encode_synchsafe};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::macros::{err, try_vec};

use std::io::Write;
use std::ops::Not;
use std::sync::OnceLock;

use byteorder::{BigEndian, WriteBytesExt};

// The largest size that fits in the synchsafe tag size
const MAX_TAG_SIZE: usize = 0x0FFF_FFFF;

// In the very rare chance someone wants to write a CRC in their extended header
fn crc_32_table() -> &'static [u32; 256] {
	static INSTANCE: OnceLock<[u32; 256]> = OnceLock::new();
	INSTANCE.get_or_init(|| {
		let mut crc32_table = [0; 256];

		for n in 0..256 {
			crc32_table[n as usize] = (0..8).fold(n as u32, |acc, _| match acc & 1 {
				1 => 0xEDB8_8320 ^ (acc >> 1),
				_ => acc >> 1,
			});
		}

		crc32_table
	})
}

/// Serialise `tag` as a complete ID3v2 tag of `write_options.version`
///
/// Nothing is produced if the tag can't be written, callers never see a partial tag.
pub(super) fn create_tag(tag: &Id3v2Tag, write_options: WriteOptions) -> Result<Vec<u8>> {
	tag.verify_track_numbers()?;

	let version = write_options.version;
	let flags = *tag.flags();

	log::debug!("Writing ID3v2.{} tag", version.major());

	let mut body = Vec::new();
	frame::create_items(
		&mut body,
		tag.frames(write_options).into_iter(),
		write_options,
		FrameRegistry::global(),
	)?;
	let frames_len = body.len();

	// https://mutagen-specs.readthedocs.io/en/latest/id3/id3v2.4.0-structure.html#padding:
	//
	// "[A tag] MUST NOT have any padding when a tag footer is added to the tag"
	let has_footer = version == Id3v2Version::V4 && flags.footer;
	let padding_len = match write_options.preferred_padding {
		Some(padding) if has_footer => {
			log::warn!("Footer requested, not padding tag (requested {padding} bytes)");
			0
		},
		Some(padding) => padding as usize,
		None => 0,
	};

	if padding_len > 0 {
		log::trace!("Padding tag with {} bytes", padding_len);
		body.extend(try_vec![0; padding_len, MAX_TAG_SIZE]);
	}

	let extended_header = create_extended_header(flags, version, &body, frames_len)?;

	let size = extended_header.len() + body.len();
	if size > MAX_TAG_SIZE {
		err!(TooMuchData);
	}

	let mut id3v2 =
		Vec::with_capacity(size + ID3V2_HEADER_LEN as usize * if has_footer { 2 } else { 1 });

	id3v2.write_all(b"ID3")?;
	id3v2.write_all(&[version.major(), 0])?;
	id3v2.write_u8(flags.as_byte(version))?;
	id3v2.write_u32::<BigEndian>((size as u32).synch())?;

	id3v2.write_all(&extended_header)?;
	id3v2.write_all(&body)?;

	if has_footer {
		log::trace!("Writing footer");

		// The footer is the same as the header, but with the identifier reversed
		let header_without_identifier = id3v2[3..ID3V2_HEADER_LEN as usize].to_vec();
		id3v2.write_all(b"3DI")?;
		id3v2.write_all(&header_without_identifier)?;
	}

	log::debug!("Created ID3v2.{} tag, size: {}", version.major(), id3v2.len());

	Ok(id3v2)
}

// `body` is the frames followed by the padding
fn create_extended_header(
	flags: Id3v2TagFlags,
	version: Id3v2Version,
	body: &[u8],
	frames_len: usize,
) -> Result<Vec<u8>> {
	let mut header = Vec::new();
	if !flags.has_extended_header(version) {
		return Ok(header);
	}

	match version {
		Id3v2Version::V2 => {},
		// Structure of an ID3v2.3 extended header:
		//
		// Size (4) (excluding itself, 6 or 10)
		// Flags (2)
		// Padding size (4)
		// CRC (4) (if the CRC flag is set)
		Id3v2Version::V3 => {
			let padding_len = (body.len() - frames_len) as u32;

			if flags.crc {
				header.write_u32::<BigEndian>(10)?;
				header.write_u16::<BigEndian>(0x8000)?;
				header.write_u32::<BigEndian>(padding_len)?;
				// The CRC excludes the padding
				header.write_u32::<BigEndian>(calculate_crc(&body[..frames_len]))?;
			} else {
				header.write_u32::<BigEndian>(6)?;
				header.write_u16::<BigEndian>(0)?;
				header.write_u32::<BigEndian>(padding_len)?;
			}
		},
		// Structure of an ID3v2.4 extended header:
		//
		// Size (4) (synchsafe, including itself)
		// Number of flag bytes (1) (As of ID3v2.4, this will *always* be 1)
		// Flags (1)
		// Followed by the data for each set flag, prefixed with its length
		Id3v2Version::V4 => {
			let mut ext_flags = 0_u8;
			let mut flag_data = Vec::new();

			if flags.update {
				ext_flags |= 0x40;
				flag_data.push(0);
			}

			if flags.crc {
				ext_flags |= 0x20;
				flag_data.push(5);
				flag_data.extend(encode_synchsafe(u64::from(calculate_crc(body)), 5));
			}

			if let Some(restrictions) = flags.restrictions {
				ext_flags |= 0x10;
				flag_data.push(1);
				flag_data.push(restrictions.as_byte());
			}

			let size = 6 + flag_data.len() as u32;
			header.write_u32::<BigEndian>(size.synch())?;
			header.write_u8(1)?;
			header.write_u8(ext_flags)?;
			header.extend(flag_data);
		},
	}

	log::trace!("Created a {} byte extended header", header.len());

	Ok(header)
}

fn calculate_crc(content: &[u8]) -> u32 {
	let crc: u32 = content
		.iter()
		.fold(!0, |crc, octet| {
			(crc >> 8) ^ crc_32_table()[(((crc & 0xFF) ^ u32::from(*octet)) & 0xFF) as usize]
		})
		.not();

	crc
}
