use crate::error::Result;
use crate::id3::v2::restrictions::TagRestrictions;
use crate::id3::v2::util::synchsafe::{SynchsafeInteger, decode_synchsafe};
use crate::macros::id3v2_err;
use crate::util::io::skip;
use crate::util::text::TextEncoding;

use std::io::Read;

use byteorder::{BigEndian, ByteOrder, ReadBytesExt};

/// The length of the tag header (and footer)
pub(crate) const ID3V2_HEADER_LEN: u32 = 10;

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

/// How a frame's size field is stored
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum FrameSizeEncoding {
	/// 3 bytes, big endian (ID3v2.2)
	BigEndian24,
	/// 4 bytes, big endian (ID3v2.3)
	BigEndian32,
	/// 4 bytes, synchsafe (ID3v2.4)
	Synchsafe32,
}

impl FrameSizeEncoding {
	/// The number of bytes the size occupies in the frame header
	pub fn len(self) -> usize {
		match self {
			Self::BigEndian24 => 3,
			Self::BigEndian32 | Self::Synchsafe32 => 4,
		}
	}

	/// The largest frame size that can be stored
	pub fn max_size(self) -> u32 {
		match self {
			Self::BigEndian24 => 0x00FF_FFFF,
			Self::BigEndian32 => u32::MAX,
			Self::Synchsafe32 => 0x0FFF_FFFF,
		}
	}
}

impl Id3v2Version {
	/// Get the version from the major version byte of a tag header
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::id3::v2::Id3v2Version;
	///
	/// assert_eq!(Id3v2Version::from_major(3), Some(Id3v2Version::V3));
	/// assert_eq!(Id3v2Version::from_major(5), None);
	/// ```
	pub fn from_major(major: u8) -> Option<Self> {
		match major {
			2 => Some(Self::V2),
			3 => Some(Self::V3),
			4 => Some(Self::V4),
			_ => None,
		}
	}

	/// The major version byte written in the tag header
	pub fn major(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}

	/// The length of a frame identifier
	pub fn frame_id_len(self) -> usize {
		match self {
			Self::V2 => 3,
			Self::V3 | Self::V4 => 4,
		}
	}

	/// The length of a frame header (identifier, size, and flags)
	pub fn frame_header_len(self) -> usize {
		match self {
			Self::V2 => 6,
			Self::V3 | Self::V4 => 10,
		}
	}

	/// How frame sizes are stored in this version
	pub fn frame_size_encoding(self) -> FrameSizeEncoding {
		match self {
			Self::V2 => FrameSizeEncoding::BigEndian24,
			Self::V3 => FrameSizeEncoding::BigEndian32,
			Self::V4 => FrameSizeEncoding::Synchsafe32,
		}
	}

	/// Whether a [`TextEncoding`] can appear in this version
	///
	/// ID3v2.2 and ID3v2.3 only support [`TextEncoding::Latin1`] and [`TextEncoding::UTF16`]
	pub fn supports_encoding(self, encoding: TextEncoding) -> bool {
		match self {
			Self::V2 | Self::V3 => matches!(encoding, TextEncoding::Latin1 | TextEncoding::UTF16),
			Self::V4 => true,
		}
	}
}

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised
	///
	/// This is only recorded. Content is never unsynchronised by id3wire.
	pub unsynchronisation: bool,
	/// Whether the tag has an extended header (ID3v2.3 and ID3v2.4 only)
	///
	/// When writing, this is implied by [`Id3v2TagFlags::crc`], [`Id3v2TagFlags::update`], and
	/// [`Id3v2TagFlags::restrictions`].
	pub extended_header: bool,
	/// Indicates if the tag is in an experimental stage (ID3v2.3 and ID3v2.4 only)
	pub experimental: bool,
	/// Indicates that the tag includes a footer (ID3v2.4 only)
	///
	/// A footer will be created if the tag is written
	pub footer: bool,
	/// Whether the tag is an update of an earlier tag (ID3v2.4 extended header only)
	pub update: bool,
	/// Whether or not to include a CRC-32 in the extended header
	///
	/// This is calculated if the tag is written, but never verified when reading
	pub crc: bool,
	/// Restrictions on the tag, written in the extended header (ID3v2.4 only)
	pub restrictions: Option<TagRestrictions>,
}

impl Id3v2TagFlags {
	/// Get the byte representation of the flags for `version`
	///
	/// Flags that `version` doesn't define are left out.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::id3::v2::{Id3v2TagFlags, Id3v2Version};
	///
	/// let flags = Id3v2TagFlags {
	/// 	experimental: true,
	/// 	footer: true,
	/// 	..Id3v2TagFlags::default()
	/// };
	///
	/// assert_eq!(flags.as_byte(Id3v2Version::V4), 0x30);
	/// assert_eq!(flags.as_byte(Id3v2Version::V3), 0x20);
	/// assert_eq!(flags.as_byte(Id3v2Version::V2), 0x00);
	/// ```
	pub fn as_byte(&self, version: Id3v2Version) -> u8 {
		let mut byte = 0;

		if self.unsynchronisation {
			byte |= 0x80;
		}

		if version == Id3v2Version::V2 {
			return byte;
		}

		if self.has_extended_header(version) {
			byte |= 0x40;
		}

		if self.experimental {
			byte |= 0x20;
		}

		if version == Id3v2Version::V4 && self.footer {
			byte |= 0x10;
		}

		byte
	}

	/// Whether an extended header will be written for `version`
	pub(crate) fn has_extended_header(&self, version: Id3v2Version) -> bool {
		match version {
			Id3v2Version::V2 => false,
			Id3v2Version::V3 => self.extended_header || self.crc,
			Id3v2Version::V4 => {
				self.extended_header || self.crc || self.update || self.restrictions.is_some()
			},
		}
	}
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub flags: Id3v2TagFlags,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
	/// The number of bytes consumed by the extended header, including its size field
	pub extended_size: u32,
}

impl Id3v2Header {
	/// Parse the tag header (and extended header, if present)
	///
	/// The tag must be of `expected` version, there is no detection done here.
	pub(crate) fn parse<R>(bytes: &mut R, expected: Id3v2Version) -> Result<Self>
	where
		R: Read,
	{
		log::debug!("Parsing ID3v2 header");

		let mut header = [0; ID3V2_HEADER_LEN as usize];
		bytes.read_exact(&mut header)?;

		if &header[..3] != b"ID3" {
			id3v2_err!(InvalidIdentifier([header[0], header[1], header[2]]));
		}

		let (major, revision) = (header[3], header[4]);
		if major != expected.major() || revision != 0 {
			id3v2_err!(InvalidVersion(major, revision));
		}

		let version = expected;
		let flags = header[5];

		// Compression was a flag only used in ID3v2.2 (bit 2).
		// At the time ID3v2.2 was written, a compression scheme wasn't decided.
		// ID3v2.2 recommends just ignoring the tag in this case.
		if version == Id3v2Version::V2 && flags & 0x40 == 0x40 {
			id3v2_err!(V2Compression);
		}

		let is_v2 = version == Id3v2Version::V2;
		let mut flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & 0x80 == 0x80,
			extended_header: !is_v2 && flags & 0x40 == 0x40,
			experimental: !is_v2 && flags & 0x20 == 0x20,
			footer: version == Id3v2Version::V4 && flags & 0x10 == 0x10,
			..Id3v2TagFlags::default()
		};

		let size = BigEndian::read_u32(&header[6..]).unsynch();
		if size == 0 {
			id3v2_err!(InvalidSize);
		}

		log::debug!(
			"Found an ID3v2.{} tag, size: {size}, flags: {flags:#04x}",
			version.major()
		);

		let mut extended_size = 0;
		if flags_parsed.extended_header {
			extended_size = match version {
				Id3v2Version::V3 => parse_v3_extended_header(bytes, &mut flags_parsed)?,
				_ => parse_v4_extended_header(bytes, &mut flags_parsed)?,
			};

			if extended_size >= size {
				id3v2_err!(BadExtendedHeaderSize);
			}

			log::trace!("Consumed {extended_size} bytes of extended header");
		}

		Ok(Id3v2Header {
			version,
			flags: flags_parsed,
			size,
			extended_size,
		})
	}

	/// The total size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> u32 {
		self.size + ID3V2_HEADER_LEN + if self.flags.footer { ID3V2_HEADER_LEN } else { 0 }
	}
}

// ID3v2.3 extended header:
//
// Size          $xx xx xx xx (excludes itself, 6 or 10)
// Flags         %x0000000 00000000
// Padding size  $xx xx xx xx
// [CRC          $xx xx xx xx]
fn parse_v3_extended_header<R>(bytes: &mut R, flags: &mut Id3v2TagFlags) -> Result<u32>
where
	R: Read,
{
	let extended_size = bytes.read_u32::<BigEndian>()?;
	if extended_size < 6 {
		id3v2_err!(BadExtendedHeaderSize);
	}

	let extended_flags = bytes.read_u16::<BigEndian>()?;
	let padding_size = bytes.read_u32::<BigEndian>()?;
	log::trace!("ID3v2.3 extended header declares {padding_size} bytes of padding");

	let mut consumed = 6;
	if extended_flags & 0x8000 == 0x8000 {
		if extended_size < 10 {
			id3v2_err!(BadExtendedHeaderSize);
		}

		flags.crc = true;

		// We don't verify the CRC
		let _crc = bytes.read_u32::<BigEndian>()?;
		consumed += 4;
	}

	skip(bytes, u64::from(extended_size - consumed))?;

	// The size doesn't include itself
	extended_size
		.checked_add(4)
		.ok_or_else(|| crate::error::Id3v2ErrorKind::BadExtendedHeaderSize.into())
}

// ID3v2.4 extended header:
//
// Size                  4 * %0xxxxxxx (includes itself)
// Number of flag bytes  $01
// Extended flags        %0bcd0000
//
// Followed by the data for each set flag, in order, each prefixed with its length:
//
// b - Update            $00
// c - CRC               $05 + 5 * %0xxxxxxx
// d - Restrictions      $01 + %ppqrrstt
fn parse_v4_extended_header<R>(bytes: &mut R, flags: &mut Id3v2TagFlags) -> Result<u32>
where
	R: Read,
{
	let extended_size = bytes.read_u32::<BigEndian>()?.unsynch();
	if extended_size < 6 {
		id3v2_err!(BadExtendedHeaderSize);
	}

	// Useless byte since there's only 1 byte for flags
	let _num_flag_bytes = bytes.read_u8()?;
	let extended_flags = bytes.read_u8()?;

	let mut consumed = 6_u32;

	if extended_flags & 0x40 == 0x40 {
		flags.update = true;

		let data_length = bytes.read_u8()?;
		skip(bytes, u64::from(data_length))?;
		consumed += 1 + u32::from(data_length);
	}

	if extended_flags & 0x20 == 0x20 {
		flags.crc = true;

		let data_length = bytes.read_u8()?;
		let mut crc = [0; 5];
		let crc_len = usize::from(data_length).min(crc.len());
		bytes.read_exact(&mut crc[..crc_len])?;
		log::trace!("Extended header CRC: {:#x}", decode_synchsafe(&crc[..crc_len]));

		skip(bytes, u64::from(data_length) - crc_len as u64)?;
		consumed += 1 + u32::from(data_length);
	}

	if extended_flags & 0x10 == 0x10 {
		let data_length = bytes.read_u8()?;
		if data_length == 0 {
			id3v2_err!(BadExtendedHeaderSize);
		}

		flags.restrictions = Some(TagRestrictions::from_byte(bytes.read_u8()?));

		skip(bytes, u64::from(data_length) - 1)?;
		consumed += 1 + u32::from(data_length);
	}

	if consumed > extended_size {
		id3v2_err!(BadExtendedHeaderSize);
	}

	skip(bytes, u64::from(extended_size - consumed))?;

	Ok(extended_size)
}

#[cfg(test)]
mod tests {
	use crate::error::{ErrorKind, Id3v2ErrorKind};
	use crate::id3::v2::header::Id3v2Header;
	use crate::id3::v2::{Id3v2TagFlags, Id3v2Version, TagRestrictions, TagSizeRestrictions};

	fn header_bytes(major: u8, flags: u8, size: [u8; 4]) -> Vec<u8> {
		let mut bytes = b"ID3".to_vec();
		bytes.extend_from_slice(&[major, 0, flags]);
		bytes.extend_from_slice(&size);
		bytes
	}

	fn id3v2_kind(err: &crate::error::Id3Error) -> &Id3v2ErrorKind {
		match err.kind() {
			ErrorKind::Id3v2(e) => e.kind(),
			other => panic!("Expected an ID3v2 error, got {other:?}"),
		}
	}

	#[test_log::test]
	fn parse_basic_header() {
		let bytes = header_bytes(4, 0x00, [0x00, 0x00, 0x02, 0x01]);
		let header = Id3v2Header::parse(&mut &bytes[..], Id3v2Version::V4).unwrap();

		assert_eq!(header.version, Id3v2Version::V4);
		assert_eq!(header.size, 0x101);
		assert_eq!(header.extended_size, 0);
		assert_eq!(header.flags, Id3v2TagFlags::default());
		assert_eq!(header.full_tag_size(), 0x101 + 10);
	}

	#[test_log::test]
	fn bad_identifier() {
		let mut bytes = header_bytes(4, 0, [0, 0, 0, 1]);
		bytes[..3].copy_from_slice(b"TAG");

		let err = Id3v2Header::parse(&mut &bytes[..], Id3v2Version::V4).unwrap_err();
		assert!(matches!(
			id3v2_kind(&err),
			Id3v2ErrorKind::InvalidIdentifier([b'T', b'A', b'G'])
		));
	}

	#[test_log::test]
	fn mismatched_version() {
		let bytes = header_bytes(3, 0, [0, 0, 0, 1]);

		let err = Id3v2Header::parse(&mut &bytes[..], Id3v2Version::V4).unwrap_err();
		assert!(matches!(id3v2_kind(&err), Id3v2ErrorKind::InvalidVersion(3, 0)));

		let mut bytes = header_bytes(4, 0, [0, 0, 0, 1]);
		bytes[4] = 1;
		let err = Id3v2Header::parse(&mut &bytes[..], Id3v2Version::V4).unwrap_err();
		assert!(matches!(id3v2_kind(&err), Id3v2ErrorKind::InvalidVersion(4, 1)));
	}

	#[test_log::test]
	fn zero_size() {
		let bytes = header_bytes(3, 0, [0, 0, 0, 0]);

		let err = Id3v2Header::parse(&mut &bytes[..], Id3v2Version::V3).unwrap_err();
		assert!(matches!(id3v2_kind(&err), Id3v2ErrorKind::InvalidSize));
	}

	#[test_log::test]
	fn v2_compression() {
		let bytes = header_bytes(2, 0x40, [0, 0, 0, 1]);

		let err = Id3v2Header::parse(&mut &bytes[..], Id3v2Version::V2).unwrap_err();
		assert!(matches!(id3v2_kind(&err), Id3v2ErrorKind::V2Compression));
	}

	#[test_log::test]
	fn v3_extended_header_with_crc() {
		let mut bytes = header_bytes(3, 0x40, [0, 0, 0, 0x20]);
		// Size (10, excluding itself), flags (CRC), padding size, CRC
		bytes.extend_from_slice(&[0, 0, 0, 10, 0x80, 0x00, 0, 0, 0, 4, 1, 2, 3, 4]);
		bytes.push(0xAA);

		let mut reader = &bytes[..];
		let header = Id3v2Header::parse(&mut reader, Id3v2Version::V3).unwrap();

		assert!(header.flags.extended_header);
		assert!(header.flags.crc);
		assert_eq!(header.extended_size, 14);
		// The reader should be positioned right after the extended header
		assert_eq!(reader, &[0xAA]);
	}

	#[test_log::test]
	fn v3_extended_header_too_small() {
		let mut bytes = header_bytes(3, 0x40, [0, 0, 0, 0x20]);
		bytes.extend_from_slice(&[0, 0, 0, 5, 0, 0, 0, 0, 0, 0]);

		let err = Id3v2Header::parse(&mut &bytes[..], Id3v2Version::V3).unwrap_err();
		assert!(matches!(id3v2_kind(&err), Id3v2ErrorKind::BadExtendedHeaderSize));
	}

	#[test_log::test]
	fn v4_extended_header() {
		let mut bytes = header_bytes(4, 0x40, [0, 0, 0, 0x40]);
		// Size (15, including itself), 1 flag byte, update | CRC | restrictions
		bytes.extend_from_slice(&[0, 0, 0, 15, 1, 0x70]);
		// Update
		bytes.push(0);
		// CRC
		bytes.extend_from_slice(&[5, 0x0D, 0x75, 0x36, 0x7D, 0x6F]);
		// Restrictions
		bytes.extend_from_slice(&[1, 0xC0]);
		bytes.push(0xBB);

		let mut reader = &bytes[..];
		let header = Id3v2Header::parse(&mut reader, Id3v2Version::V4).unwrap();

		assert!(header.flags.update);
		assert!(header.flags.crc);
		assert_eq!(
			header.flags.restrictions,
			Some(TagRestrictions {
				size: TagSizeRestrictions::S_32F_4K,
				..TagRestrictions::default()
			})
		);
		assert_eq!(header.extended_size, 15);
		assert_eq!(reader, &[0xBB]);
	}

	#[test_log::test]
	fn extended_header_larger_than_tag() {
		let mut bytes = header_bytes(4, 0x40, [0, 0, 0, 6]);
		bytes.extend_from_slice(&[0, 0, 0, 6, 1, 0]);

		let err = Id3v2Header::parse(&mut &bytes[..], Id3v2Version::V4).unwrap_err();
		assert!(matches!(id3v2_kind(&err), Id3v2ErrorKind::BadExtendedHeaderSize));
	}

	#[test_log::test]
	fn truncated_header() {
		let err = Id3v2Header::parse(&mut &b"ID3\x04"[..], Id3v2Version::V4).unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::Io(_)));
	}

	#[test_log::test]
	fn version_layouts() {
		assert_eq!(Id3v2Version::V2.frame_id_len(), 3);
		assert_eq!(Id3v2Version::V2.frame_header_len(), 6);
		assert_eq!(Id3v2Version::V3.frame_header_len(), 10);
		assert_eq!(Id3v2Version::V4.frame_size_encoding().max_size(), 0x0FFF_FFFF);
	}
}
