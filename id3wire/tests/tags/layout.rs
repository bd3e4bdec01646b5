use crate::{read, sample_tag, write};

use id3wire::TextEncoding;
use id3wire::config::WriteOptions;
use id3wire::id3::v2::Id3v2Version;
use id3wire::tag::Accessor;

#[test_log::test]
fn utf8_v4_bytes() {
	let write_options = WriteOptions::new()
		.version(Id3v2Version::V4)
		.text_encoding(TextEncoding::UTF8);

	let bytes = write(&sample_tag(), write_options);

	let mut expected = b"ID3\x04\x00\x00\x00\x00\x00\x76".to_vec();
	expected.extend_from_slice(b"TIT2\x00\x00\x00\x06\x00\x00\x03Title");
	expected.extend_from_slice(b"TPE1\x00\x00\x00\x0C\x00\x00\x03Artist Name");
	expected.extend_from_slice(b"TALB\x00\x00\x00\x0B\x00\x00\x03Album Name");
	expected.extend_from_slice(b"TYER\x00\x00\x00\x05\x00\x00\x032023");
	expected.extend_from_slice(b"COMM\x00\x00\x00\x13\x00\x00\x03engComment\x00Comment");
	expected.extend_from_slice(b"TRCK\x00\x00\x00\x05\x00\x00\x031/10");

	assert_eq!(bytes, expected);

	let tag = read(&bytes, Id3v2Version::V4);
	assert_eq!(tag.title().as_deref(), Some("Title"));
	assert_eq!(tag.artist().as_deref(), Some("Artist Name"));
	assert_eq!(tag.album().as_deref(), Some("Album Name"));
	assert_eq!(tag.year().as_deref(), Some("2023"));
	assert_eq!(tag.comment().as_deref(), Some("Comment"));
	assert_eq!(tag.track(), Some(1));
	assert_eq!(tag.track_total(), Some(10));
}

#[test_log::test]
fn latin1_v2_bytes() {
	let mut tag = id3wire::id3::v2::Id3v2Tag::new();
	tag.set_title(String::from("Hi"));
	tag.set_track(3);

	let write_options = WriteOptions::new()
		.version(Id3v2Version::V2)
		.text_encoding(TextEncoding::Latin1);

	let bytes = write(&tag, write_options);
	assert_eq!(
		bytes,
		b"ID3\x02\x00\x00\x00\x00\x00\x11TT2\x00\x00\x03\x00HiTRK\x00\x00\x02\x003"
	);
}

#[test_log::test]
fn utf16_has_bom() {
	let mut tag = id3wire::id3::v2::Id3v2Tag::new();
	tag.set_album(String::from("A"));

	let bytes = write(&tag, WriteOptions::new().version(Id3v2Version::V3));
	assert_eq!(&bytes[10..], b"TALB\x00\x00\x00\x05\x00\x00\x01\xFE\xFF\x00A");
}

#[test_log::test]
fn v4_only_encodings_are_substituted() {
	let mut tag = id3wire::id3::v2::Id3v2Tag::new();
	tag.set_title(String::from("A"));

	let write_options = WriteOptions::new()
		.version(Id3v2Version::V3)
		.text_encoding(TextEncoding::UTF8);

	let bytes = write(&tag, write_options);
	// Encoding byte is UTF-16
	assert_eq!(bytes[20], 1);
}

#[test_log::test]
fn size_is_synchsafe() {
	let mut tag = id3wire::id3::v2::Id3v2Tag::new();
	tag.set_comment("c".repeat(200));

	let bytes = write(
		&tag,
		WriteOptions::new()
			.version(Id3v2Version::V3)
			.text_encoding(TextEncoding::Latin1),
	);

	// 10 + 1 + 3 + 8 ("Comment\0") + 200 = 222
	assert_eq!(&bytes[6..10], &[0, 0, 0x01, 0x5E]);
	// ID3v2.3 frame sizes aren't synchsafe
	assert_eq!(&bytes[14..18], &[0, 0, 0, 212]);
}
