#![allow(missing_docs)]

use id3wire::TextEncoding;
use id3wire::config::WriteOptions;
use id3wire::id3::v2::util::synchsafe::decode_synchsafe;
use id3wire::id3::v2::{Id3v2Tag, Id3v2Version};
use id3wire::tag::Accessor;

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "tag_writer", about = "A simple ID3v2 tag writer example")]
struct Opt {
	#[structopt(short, long)]
	title: Option<String>,

	#[structopt(short, long)]
	artist: Option<String>,

	#[structopt(short = "A", long)]
	album: Option<String>,

	#[structopt(short, long)]
	year: Option<String>,

	#[structopt(short, long)]
	comment: Option<String>,

	#[structopt(short = "n", long)]
	track: Option<i32>,

	#[structopt(short = "N", long)]
	track_total: Option<i32>,

	/// The ID3v2 minor version to write (2, 3, or 4)
	#[structopt(long, default_value = "4", parse(try_from_str = parse_version))]
	version: Id3v2Version,

	/// Write text as UTF-8 (ID3v2.4 only) instead of UTF-16
	#[structopt(long)]
	utf8: bool,

	#[structopt(parse(from_os_str))]
	path: PathBuf,
}

fn parse_version(version: &str) -> Result<Id3v2Version, String> {
	version
		.parse::<u8>()
		.ok()
		.and_then(Id3v2Version::from_major)
		.ok_or_else(|| format!("Unknown ID3v2 version: {version}"))
}

// The length of an existing ID3v2 tag at the start of `data`, including the header and footer
fn existing_tag_len(data: &[u8]) -> usize {
	if data.len() < 10 || !data.starts_with(b"ID3") {
		return 0;
	}

	let has_footer = data[3] == 4 && data[5] & 0x10 == 0x10;
	let size = decode_synchsafe(&data[6..10]) as usize;

	(10 + size + if has_footer { 10 } else { 0 }).min(data.len())
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	if let Opt {
		title: None,
		artist: None,
		album: None,
		year: None,
		comment: None,
		track: None,
		track_total: None,
		..
	} = opt
	{
		eprintln!("ERROR: No options provided!");
		std::process::exit(1);
	}

	let mut tag = Id3v2Tag::new();

	if let Some(title) = opt.title {
		tag.set_title(title)
	}

	if let Some(artist) = opt.artist {
		tag.set_artist(artist)
	}

	if let Some(album) = opt.album {
		tag.set_album(album)
	}

	if let Some(year) = opt.year {
		tag.set_year(year)
	}

	if let Some(comment) = opt.comment {
		tag.set_comment(comment)
	}

	if let Some(track) = opt.track {
		tag.set_track(track)
	}

	if let Some(track_total) = opt.track_total {
		tag.set_track_total(track_total)
	}

	let mut write_options = WriteOptions::new().version(opt.version);
	if opt.utf8 {
		write_options = write_options.text_encoding(TextEncoding::UTF8);
	}

	let mut file_content = std::fs::read(&opt.path).unwrap_or_default();
	let old_tag_len = existing_tag_len(&file_content);
	if old_tag_len > 0 {
		println!("INFO: Replacing an existing {old_tag_len} byte tag");
	}

	let mut new_content = Vec::with_capacity(file_content.len());
	tag.dump_to(&mut new_content, write_options)
		.expect("ERROR: Failed to create the tag!");
	new_content.extend(file_content.drain(old_tag_len..));

	std::fs::write(&opt.path, new_content).expect("ERROR: Failed to write the tag!");

	println!("INFO: Tag successfully written!");
}
