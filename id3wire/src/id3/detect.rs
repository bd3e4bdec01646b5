use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::macros::err;

const ID3V1_TAG_LEN: usize = 128;
const ID3V1_TAG_MARKER: &[u8; 3] = b"TAG";
const ID3V2_TAG_MARKER: &[u8; 3] = b"ID3";

/// The kind of ID3 tag found in a buffer
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Id3Variant {
	/// An ID3v1 tag, in the last 128 bytes
	Id3v1,
	/// An ID3v1.1 tag (ID3v1 with a track number), in the last 128 bytes
	Id3v1_1,
	/// An ID3v2 tag at the start of the buffer
	Id3v2(Id3v2Version),
}

impl Id3Variant {
	/// The ID3v2 version, if this is an ID3v2 tag
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::id3::Id3Variant;
	/// use id3wire::id3::v2::Id3v2Version;
	///
	/// assert_eq!(
	/// 	Id3Variant::Id3v2(Id3v2Version::V3).id3v2_version(),
	/// 	Some(Id3v2Version::V3)
	/// );
	/// assert_eq!(Id3Variant::Id3v1.id3v2_version(), None);
	/// ```
	pub fn id3v2_version(self) -> Option<Id3v2Version> {
		match self {
			Self::Id3v2(version) => Some(version),
			Self::Id3v1 | Self::Id3v1_1 => None,
		}
	}
}

/// Classify the ID3 tag in `data`
///
/// An ID3v1 tag in the last 128 bytes takes precedence over an ID3v2 tag at the start. Nothing
/// is decoded, the result is only meant to pick a codec.
///
/// NOTE: Any buffer shorter than 128 bytes is rejected, even if it starts with a valid ID3v2 header.
///
/// # Errors
///
/// * `data` is shorter than 128 bytes
/// * No tag marker is found
///
/// # Examples
///
/// ```rust
/// use id3wire::id3::v2::Id3v2Version;
/// use id3wire::id3::{Id3Variant, detect_id3_version};
///
/// # fn main() -> id3wire::error::Result<()> {
/// let mut data = b"ID3\x04\x00\x00\x00\x00\x00\x00".to_vec();
/// data.resize(128, 0);
///
/// assert_eq!(detect_id3_version(&data)?, Id3Variant::Id3v2(Id3v2Version::V4));
/// # Ok(()) }
/// ```
pub fn detect_id3_version(data: &[u8]) -> Result<Id3Variant> {
	if data.len() < ID3V1_TAG_LEN {
		log::debug!("Buffer is too short for an ID3 tag ({} bytes)", data.len());
		err!(NoTag);
	}

	let id3v1 = &data[data.len() - ID3V1_TAG_LEN..];
	if id3v1.starts_with(ID3V1_TAG_MARKER) {
		// ID3v1.1 uses the last 2 bytes of the comment for a zero byte and a track number
		if id3v1[125] == 0 && id3v1[126] != 0 {
			return Ok(Id3Variant::Id3v1_1);
		}

		return Ok(Id3Variant::Id3v1);
	}

	if data.starts_with(ID3V2_TAG_MARKER) {
		if let Some(version) = Id3v2Version::from_major(data[3]) {
			return Ok(Id3Variant::Id3v2(version));
		}

		log::debug!("Found an ID3v2 tag with an unknown major version ({})", data[3]);
	}

	err!(NoTag)
}

#[cfg(test)]
mod tests {
	use super::{Id3Variant, detect_id3_version};
	use crate::error::ErrorKind;
	use crate::id3::v2::Id3v2Version;

	fn id3v1(track: u8) -> Vec<u8> {
		let mut data = vec![0; 300];
		let start = data.len() - 128;
		data[start..start + 3].copy_from_slice(b"TAG");
		data[start + 3..start + 8].copy_from_slice(b"Title");
		data[start + 126] = track;
		data
	}

	fn id3v2(major: u8) -> Vec<u8> {
		let mut data = b"ID3".to_vec();
		data.extend_from_slice(&[major, 0, 0, 0, 0, 0, 0x10]);
		data.resize(128, 0);
		data
	}

	#[test_log::test]
	fn id3v1_variants() {
		assert_eq!(detect_id3_version(&id3v1(0)).unwrap(), Id3Variant::Id3v1);
		assert_eq!(detect_id3_version(&id3v1(5)).unwrap(), Id3Variant::Id3v1_1);

		// A non-zero byte before the track means it's still part of the comment
		let mut data = id3v1(5);
		let len = data.len();
		data[len - 3] = b'x';
		assert_eq!(detect_id3_version(&data).unwrap(), Id3Variant::Id3v1);
	}

	#[test_log::test]
	fn id3v2_versions() {
		assert_eq!(
			detect_id3_version(&id3v2(2)).unwrap(),
			Id3Variant::Id3v2(Id3v2Version::V2)
		);
		assert_eq!(
			detect_id3_version(&id3v2(3)).unwrap(),
			Id3Variant::Id3v2(Id3v2Version::V3)
		);
		assert_eq!(
			detect_id3_version(&id3v2(4)).unwrap(),
			Id3Variant::Id3v2(Id3v2Version::V4)
		);
	}

	#[test_log::test]
	fn id3v1_wins() {
		let mut data = id3v2(3);
		data.extend(id3v1(1));
		assert_eq!(detect_id3_version(&data).unwrap(), Id3Variant::Id3v1_1);
	}

	#[test_log::test]
	fn no_tag() {
		for data in [id3v2(4)[..127].to_vec(), id3v2(5), vec![0; 256]] {
			let err = detect_id3_version(&data).unwrap_err();
			assert!(matches!(err.kind(), ErrorKind::NoTag));
		}
	}
}
