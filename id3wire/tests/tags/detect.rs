use crate::{sample_tag, write};

use id3wire::config::{ParseOptions, WriteOptions};
use id3wire::id3::v2::{Id3v2Tag, Id3v2Version};
use id3wire::id3::{Id3Variant, detect_id3_version};
use id3wire::tag::Accessor;

#[test_log::test]
fn detect_then_read() {
	for version in [Id3v2Version::V2, Id3v2Version::V3, Id3v2Version::V4] {
		let mut bytes = write(&sample_tag(), WriteOptions::new().version(version));
		// Some audio data
		bytes.extend_from_slice(&[0xFF; 512]);

		let variant = detect_id3_version(&bytes).unwrap();
		assert_eq!(variant, Id3Variant::Id3v2(version));

		let version = variant.id3v2_version().unwrap();
		let tag = Id3v2Tag::read_from(&mut &bytes[..], version, ParseOptions::new()).unwrap();
		assert_eq!(tag.title().as_deref(), Some("Title"));
	}
}

#[test_log::test]
fn short_tag_is_not_detected() {
	let mut tag = Id3v2Tag::new();
	tag.set_title(String::from("T"));

	let bytes = write(&tag, WriteOptions::new());
	assert!(bytes.len() < 128);
	assert!(detect_id3_version(&bytes).is_err());
}
