use crate::{read, sample_tag, write};

use id3wire::TextEncoding;
use id3wire::config::WriteOptions;
use id3wire::id3::v2::{Id3v2Tag, Id3v2TagFlags, Id3v2Version, TagRestrictions};
use id3wire::picture::{MimeType, Picture, PictureType};
use id3wire::tag::Accessor;

const ALL_ENCODINGS: [TextEncoding; 4] = [
	TextEncoding::Latin1,
	TextEncoding::UTF16,
	TextEncoding::UTF16BE,
	TextEncoding::UTF8,
];

fn assert_fields(tag: &Id3v2Tag) {
	assert_eq!(tag.title().as_deref(), Some("Title"));
	assert_eq!(tag.artist().as_deref(), Some("Artist Name"));
	assert_eq!(tag.album().as_deref(), Some("Album Name"));
	assert_eq!(tag.year().as_deref(), Some("2023"));
	assert_eq!(tag.comment().as_deref(), Some("Comment"));
	assert_eq!(tag.track(), Some(1));
	assert_eq!(tag.track_total(), Some(10));
}

#[test_log::test]
fn every_version_and_encoding() {
	let tag = sample_tag();

	for version in [Id3v2Version::V2, Id3v2Version::V3, Id3v2Version::V4] {
		for encoding in ALL_ENCODINGS {
			let write_options = WriteOptions::new()
				.version(version)
				.text_encoding(encoding);

			let bytes = write(&tag, write_options);
			assert_eq!(bytes[3], version.major());

			let read_back = read(&bytes, version);
			assert_fields(&read_back);
			assert_eq!(read_back.original_version(), version);
		}
	}
}

#[test_log::test]
fn track_without_total() {
	let mut tag = Id3v2Tag::new();
	tag.set_track(7);

	let read_back = read(&write(&tag, WriteOptions::new()), Id3v2Version::V4);
	assert_eq!(read_back.track(), Some(7));
	assert_eq!(read_back.track_total(), None);
}

#[test_log::test]
fn non_ascii_text() {
	let mut tag = Id3v2Tag::new();
	tag.set_title(String::from("Ünïcödé 曲"));
	tag.set_comment(String::from("コメント"));

	for version in [Id3v2Version::V2, Id3v2Version::V3, Id3v2Version::V4] {
		let bytes = write(&tag, WriteOptions::new().version(version));
		let read_back = read(&bytes, version);

		assert_eq!(read_back.title().as_deref(), Some("Ünïcödé 曲"));
		assert_eq!(read_back.comment().as_deref(), Some("コメント"));
	}
}

#[test_log::test]
fn lossy_latin1() {
	let mut tag = Id3v2Tag::new();
	tag.set_title(String::from("Café 曲"));

	let write_options = WriteOptions::new()
		.text_encoding(TextEncoding::Latin1)
		.lossy_text_encoding(true);

	let read_back = read(&write(&tag, write_options), Id3v2Version::V4);
	assert_eq!(read_back.title().as_deref(), Some("Café ?"));
}

#[test_log::test]
fn picture_every_encoding() {
	let picture = Picture::unchecked(vec![0x89, b'P', b'N', b'G', 0, 0, 1, 2])
		.pic_type(PictureType::CoverBack)
		.mime_type(MimeType::Png)
		.description("Back cover")
		.build();

	let mut tag = Id3v2Tag::new();
	tag.set_picture(picture.clone());

	for version in [Id3v2Version::V2, Id3v2Version::V3, Id3v2Version::V4] {
		for encoding in ALL_ENCODINGS {
			let write_options = WriteOptions::new()
				.version(version)
				.text_encoding(encoding);

			let read_back = read(&write(&tag, write_options), version);
			assert_eq!(read_back.picture(), Some(&picture));
		}
	}
}

#[test_log::test]
fn flags_survive() {
	let flags = Id3v2TagFlags {
		experimental: true,
		crc: true,
		restrictions: Some(TagRestrictions::from_byte(0x45)),
		..Id3v2TagFlags::default()
	};

	let mut tag = sample_tag();
	tag.set_flags(flags);

	let bytes = write(&tag, WriteOptions::new().preferred_padding(64));
	let read_back = read(&bytes, Id3v2Version::V4);

	assert!(read_back.flags().experimental);
	assert!(read_back.flags().extended_header);
	assert!(read_back.flags().crc);
	assert_eq!(read_back.flags().restrictions, flags.restrictions);
	assert_fields(&read_back);
}

#[test_log::test]
fn padding_and_footer() {
	let tag = sample_tag();

	let padded = write(&tag, WriteOptions::new().preferred_padding(1024));
	assert_fields(&read(&padded, Id3v2Version::V4));

	let mut with_footer = sample_tag();
	with_footer.set_flags(Id3v2TagFlags {
		footer: true,
		..Id3v2TagFlags::default()
	});

	let bytes = write(&with_footer, WriteOptions::new().preferred_padding(1024));
	assert!(bytes.len() < padded.len());

	let read_back = read(&bytes, Id3v2Version::V4);
	assert!(read_back.flags().footer);
	assert_fields(&read_back);
}

#[test_log::test]
fn rewrite_as_other_version() {
	let bytes = write(&sample_tag(), WriteOptions::new().version(Id3v2Version::V2));
	let v2 = read(&bytes, Id3v2Version::V2);

	let bytes = write(&v2, WriteOptions::new().version(Id3v2Version::V4));
	let v4 = read(&bytes, Id3v2Version::V4);

	assert_fields(&v4);
	assert_eq!(v4.original_version(), Id3v2Version::V4);
}
