#![no_main]
use id3wire::config::ParseOptions;
use id3wire::id3::v2::{Id3v2Tag, Id3v2Version};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
	let _ = Id3v2Tag::read_from(&mut &data[..], Id3v2Version::V4, ParseOptions::new());
});
