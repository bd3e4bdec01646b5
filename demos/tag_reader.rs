#![allow(missing_docs)]

use id3wire::config::ParseOptions;
use id3wire::id3::v2::Id3v2Tag;
use id3wire::id3::{Id3Variant, detect_id3_version};
use id3wire::tag::Accessor;

use structopt::StructOpt;

use std::path::PathBuf;

#[derive(Debug, StructOpt)]
#[structopt(name = "tag_reader", about = "A simple ID3v2 tag reader example")]
struct Opt {
	/// Skip reading APIC/PIC frames
	#[structopt(long)]
	no_cover_art: bool,

	#[structopt(parse(from_os_str))]
	path: PathBuf,
}

fn main() {
	env_logger::init();

	let opt = Opt::from_args();

	if !opt.path.is_file() {
		panic!("ERROR: Path is not a file!");
	}

	let data = std::fs::read(&opt.path).expect("ERROR: Failed to read file!");

	let variant = detect_id3_version(&data).expect("ERROR: No ID3 tag found!");
	println!("ID3 variant: {variant:?}");

	let Some(version) = variant.id3v2_version() else {
		if let Id3Variant::Id3v1 | Id3Variant::Id3v1_1 = variant {
			eprintln!("ERROR: ID3v1 tags can't be decoded");
		}

		std::process::exit(1);
	};

	let parse_options = ParseOptions::new().read_cover_art(!opt.no_cover_art);
	let tag = Id3v2Tag::read_from(&mut &data[..], version, parse_options)
		.expect("ERROR: Failed to read tag!");

	println!("--- Tag Information ---");
	println!("Title: {}", tag.title().as_deref().unwrap_or("None"));
	println!("Artist: {}", tag.artist().as_deref().unwrap_or("None"));
	println!("Album: {}", tag.album().as_deref().unwrap_or("None"));
	println!("Year: {}", tag.year().as_deref().unwrap_or("None"));
	println!("Comment: {}", tag.comment().as_deref().unwrap_or("None"));

	match (tag.track(), tag.track_total()) {
		(Some(track), Some(total)) => println!("Track: {track}/{total}"),
		(Some(track), None) => println!("Track: {track}"),
		_ => println!("Track: None"),
	}

	if let Some(picture) = tag.picture() {
		println!("--- Picture ---");
		println!("Type: {:?}", picture.pic_type());
		println!(
			"MIME type: {}",
			picture
				.mime_type()
				.map_or_else(|| String::from("None"), ToString::to_string)
		);
		println!("Description: {}", picture.description().unwrap_or("None"));
		println!("Size: {} bytes", picture.data().len());
	}

	println!("--- Flags ---");
	println!("{:#?}", tag.flags());
}
