use crate::{sample_tag, write};

use id3wire::TextEncoding;
use id3wire::config::{ParseOptions, WriteOptions};
use id3wire::error::{ErrorKind, Id3v2ErrorKind};
use id3wire::id3::v2::{Id3v2Tag, Id3v2Version};
use id3wire::tag::Accessor;

fn id3v2_kind(err: &id3wire::error::Id3Error) -> &Id3v2ErrorKind {
	match err.kind() {
		ErrorKind::Id3v2(e) => e.kind(),
		other => panic!("Expected an ID3v2 error, got {other:?}"),
	}
}

#[test_log::test]
fn invalid_identifier() {
	let mut bytes = write(&sample_tag(), WriteOptions::new());
	bytes[..3].copy_from_slice(b"ID4");

	let err = Id3v2Tag::read_from(&mut &bytes[..], Id3v2Version::V4, ParseOptions::new())
		.unwrap_err();
	assert!(matches!(
		id3v2_kind(&err),
		Id3v2ErrorKind::InvalidIdentifier([b'I', b'D', b'4'])
	));
}

#[test_log::test]
fn invalid_size() {
	let bytes = b"ID3\x03\x00\x00\x00\x00\x00\x00";

	let err = Id3v2Tag::read_from(&mut &bytes[..], Id3v2Version::V3, ParseOptions::new())
		.unwrap_err();
	assert!(matches!(id3v2_kind(&err), Id3v2ErrorKind::InvalidSize));
}

#[test_log::test]
fn wrong_version() {
	let bytes = write(&sample_tag(), WriteOptions::new().version(Id3v2Version::V3));

	let err = Id3v2Tag::read_from(&mut &bytes[..], Id3v2Version::V4, ParseOptions::new())
		.unwrap_err();
	assert!(matches!(id3v2_kind(&err), Id3v2ErrorKind::InvalidVersion(3, 0)));
}

#[test_log::test]
fn negative_track_leaves_writer_untouched() {
	for (track, total) in [(-1, 10), (1, -10)] {
		let mut tag = sample_tag();
		tag.set_track(track);
		tag.set_track_total(total);

		let mut bytes = Vec::new();
		let err = tag.dump_to(&mut bytes, WriteOptions::new()).unwrap_err();

		assert!(matches!(
			id3v2_kind(&err),
			Id3v2ErrorKind::InvalidTrackNumber(n) if *n < 0
		));
		assert!(bytes.is_empty());
	}
}

#[test_log::test]
fn unencodable_latin1() {
	let mut tag = Id3v2Tag::new();
	tag.set_artist(String::from("曲"));

	let mut bytes = Vec::new();
	let err = tag
		.dump_to(
			&mut bytes,
			WriteOptions::new().text_encoding(TextEncoding::Latin1),
		)
		.unwrap_err();

	assert!(matches!(err.kind(), ErrorKind::TextEncode(_)));
	assert!(bytes.is_empty());
}

#[test_log::test]
fn unsupported_encoding_in_v3() {
	// UTF-8 (3) doesn't exist in ID3v2.3
	let mut bytes = b"ID3\x03\x00\x00\x00\x00\x00\x10".to_vec();
	bytes.extend_from_slice(b"TIT2\x00\x00\x00\x06\x00\x00\x03Title");

	let err = Id3v2Tag::read_from(&mut &bytes[..], Id3v2Version::V3, ParseOptions::new())
		.unwrap_err();
	assert!(matches!(
		id3v2_kind(&err),
		Id3v2ErrorKind::UnsupportedEncoding(3)
	));
}

#[test_log::test]
fn allocation_limit() {
	let mut bytes = b"ID3\x04\x00\x00\x00\x01\x00\x0A".to_vec();
	bytes.extend_from_slice(b"APIC\x00\x00\x01\x00\x00\x00");
	bytes.resize(bytes.len() + 128, 0);

	let err = Id3v2Tag::read_from(
		&mut &bytes[..],
		Id3v2Version::V4,
		ParseOptions::new().allocation_limit(64),
	)
	.unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::TooMuchData));
}
