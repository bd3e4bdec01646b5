//! Integration tests for ID3v2 tag reading and writing.

mod detect;
mod errors;
mod layout;
mod round_trip;

use id3wire::config::{ParseOptions, WriteOptions};
use id3wire::id3::v2::{Id3v2Tag, Id3v2Version};
use id3wire::tag::Accessor;

fn sample_tag() -> Id3v2Tag {
	let mut tag = Id3v2Tag::new();
	tag.set_title(String::from("Title"));
	tag.set_artist(String::from("Artist Name"));
	tag.set_album(String::from("Album Name"));
	tag.set_year(String::from("2023"));
	tag.set_comment(String::from("Comment"));
	tag.set_track(1);
	tag.set_track_total(10);
	tag
}

fn write(tag: &Id3v2Tag, write_options: WriteOptions) -> Vec<u8> {
	let mut bytes = Vec::new();
	tag.dump_to(&mut bytes, write_options).unwrap();
	bytes
}

fn read(bytes: &[u8], version: Id3v2Version) -> Id3v2Tag {
	Id3v2Tag::read_from(&mut &bytes[..], version, ParseOptions::new()).unwrap()
}
