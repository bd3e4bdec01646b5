use super::Frame;
use super::content::{has_content_parser, parse_content};
use super::header::parse::parse_header;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::registry::FrameRegistry;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::id3::v2::{FrameFlags, FrameId};
use crate::macros::{id3v2_err, parse_mode_choice, try_vec};
use crate::util::io::skip;

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

pub(crate) enum ParsedFrame<'a> {
	Next(Frame<'a>),
	Skip,
	Eof,
}

impl ParsedFrame<'_> {
	/// Read the next frame, keeping `size_left` up to date
	///
	/// `size_left` is the number of bytes left in the tag. A frame that doesn't fit in it
	/// is an error, the reader is never read past the end of the tag.
	pub(crate) fn read<R>(
		reader: &mut R,
		version: Id3v2Version,
		size_left: &mut u32,
		parse_options: ParseOptions,
		registry: &FrameRegistry,
	) -> Result<Self>
	where
		R: Read,
	{
		let header_len = version.frame_header_len() as u32;

		// Too small to be a frame, this can only be padding
		if *size_left < header_len {
			log::trace!("Skipping {} trailing bytes", *size_left);

			skip(reader, u64::from(*size_left))?;
			*size_left = 0;
			return Ok(Self::Eof);
		}

		let Some(raw_header) = parse_header(reader, version)? else {
			log::debug!("Found {} bytes of padding", *size_left);

			// The header we just read is part of the padding
			skip(reader, u64::from(*size_left - header_len))?;
			*size_left = 0;
			return Ok(Self::Eof);
		};

		*size_left -= header_len;

		let size = raw_header.size;
		if size > *size_left {
			log::error!(
				"Frame declares a size of {size}, but only {} bytes are left in the tag",
				*size_left
			);
			id3v2_err!(BadFrameLength);
		}

		*size_left -= size;

		let parsing_mode = parse_options.parsing_mode;
		let id = match FrameId::from_bytes(raw_header.id()) {
			Ok(id) => id,
			Err(err) => parse_mode_choice!(
				parsing_mode,
				STRICT: return Err(err),
				DEFAULT: {
					log::warn!("Failed to read frame header, skipping: {}", err);

					// Skip this frame and continue reading
					skip(reader, u64::from(size))?;
					return Ok(Self::Skip);
				}
			),
		};

		log::trace!(
			"Found frame `{}` ({}), size: {}",
			id,
			registry.describe(version, id.as_str()),
			size
		);

		if size == 0 {
			parse_mode_choice!(
				parsing_mode,
				STRICT: id3v2_err!(EmptyFrame(id.to_string())),
				DEFAULT: {
					log::debug!("Encountered a zero length frame, skipping");
					return Ok(Self::Skip);
				}
			);
		}

		if !has_content_parser(id.as_str(), version) {
			log::trace!("Skipping unsupported frame `{}`", id);

			skip(reader, u64::from(size))?;
			return Ok(Self::Skip);
		}

		let mut content = try_vec![0; size as usize, parse_options.allocation_limit];
		reader.read_exact(&mut content)?;

		let mut flags = raw_header.flags;
		let mut content_reader = &content[..];
		read_flag_prefixes(&mut content_reader, version, &mut flags)?;

		// Frames must have at least 1 byte, *after* all of the additional data flags can provide
		if content_reader.is_empty() {
			id3v2_err!(BadFrameLength);
		}

		if flags.compression || flags.encryption.is_some() {
			log::warn!(
				"Frame `{}` is {}, skipping",
				id,
				if flags.compression {
					"compressed"
				} else {
					"encrypted"
				}
			);

			return Ok(Self::Skip);
		}

		match parse_content(&mut content_reader, id, flags, version, parse_options)? {
			Some(frame) => Ok(Self::Next(frame)),
			None => Ok(Self::Skip),
		}
	}
}

// The data some flags add between the frame header and content.
//
// These are counted in the frame size, in the order:
//
// ID3v2.3: decompressed size, encryption method, group identifier
// ID3v2.4: group identifier, encryption method, data length indicator
fn read_flag_prefixes(
	content: &mut &[u8],
	version: Id3v2Version,
	flags: &mut FrameFlags,
) -> Result<()> {
	match version {
		Id3v2Version::V2 => {},
		Id3v2Version::V3 => {
			if flags.compression {
				log::trace!("Reading decompressed size");
				ensure_remaining(content, 4)?;
				flags.data_length_indicator = Some(content.read_u32::<BigEndian>()?);
			}

			if let Some(enc) = flags.encryption.as_mut() {
				log::trace!("Reading encryption method symbol");
				ensure_remaining(content, 1)?;
				*enc = content.read_u8()?;
			}

			if let Some(group) = flags.grouping_identity.as_mut() {
				log::trace!("Reading group identifier");
				ensure_remaining(content, 1)?;
				*group = content.read_u8()?;
			}
		},
		Id3v2Version::V4 => {
			if let Some(group) = flags.grouping_identity.as_mut() {
				log::trace!("Reading group identifier");
				ensure_remaining(content, 1)?;
				*group = content.read_u8()?;
			}

			if let Some(enc) = flags.encryption.as_mut() {
				log::trace!("Reading encryption method symbol");
				ensure_remaining(content, 1)?;
				*enc = content.read_u8()?;
			}

			if flags.data_length_indicator.is_some() {
				log::trace!("Reading data length indicator");
				ensure_remaining(content, 4)?;
				flags.data_length_indicator = Some(content.read_u32::<BigEndian>()?.unsynch());
			}
		},
	}

	Ok(())
}

fn ensure_remaining(content: &[u8], len: usize) -> Result<()> {
	if content.len() < len {
		id3v2_err!(BadFrameLength);
	}

	Ok(())
}
