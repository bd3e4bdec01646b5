#![no_main]
use id3wire::config::{ParseOptions, WriteOptions};
use id3wire::id3::detect_id3_version;
use id3wire::id3::v2::Id3v2Tag;
use libfuzzer_sys::fuzz_target;

// Anything that can be read must be writable, and read back the same
fuzz_target!(|data: &[u8]| {
	let Some(version) = detect_id3_version(data)
		.ok()
		.and_then(|variant| variant.id3v2_version())
	else {
		return;
	};

	let Ok(tag) = Id3v2Tag::read_from(&mut &data[..], version, ParseOptions::new()) else {
		return;
	};

	let write_options = WriteOptions::new().version(version).lossy_text_encoding(true);

	let mut bytes = Vec::new();
	if tag.dump_to(&mut bytes, write_options).is_err() || tag.is_empty() {
		return;
	}

	Id3v2Tag::read_from(&mut &bytes[..], version, ParseOptions::new())
		.expect("a written tag should always be readable");
});
