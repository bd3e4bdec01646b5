//! Human readable names for the frame identifiers defined by each ID3v2 version

use crate::id3::v2::Id3v2Version;

use std::collections::HashMap;
use std::sync::OnceLock;

/// A read-only table of known frame identifiers and their names, per [`Id3v2Version`]
///
/// The registry is never required to decode or encode a tag, it only provides introspection.
/// A single instance is built on first use and shared through [`FrameRegistry::global`].
#[derive(Debug)]
pub struct FrameRegistry {
	v2: HashMap<&'static str, &'static str>,
	v3: HashMap<&'static str, &'static str>,
	v4: HashMap<&'static str, &'static str>,
}

impl FrameRegistry {
	/// Get the process-wide registry
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::id3::v2::{FrameRegistry, Id3v2Version};
	///
	/// let registry = FrameRegistry::global();
	/// assert_eq!(registry.name(Id3v2Version::V2, "TT2"), Some("Title/Songname/Content description"));
	/// assert_eq!(registry.name(Id3v2Version::V4, "TT2"), None);
	/// ```
	pub fn global() -> &'static Self {
		static INSTANCE: OnceLock<FrameRegistry> = OnceLock::new();
		INSTANCE.get_or_init(Self::build)
	}

	/// Look up the name of a frame identifier for a version
	pub fn name(&self, version: Id3v2Version, id: &str) -> Option<&'static str> {
		self.table(version).get(id).copied()
	}

	/// Whether `id` is defined for `version`
	pub fn contains(&self, version: Id3v2Version, id: &str) -> bool {
		self.table(version).contains_key(id)
	}

	/// The number of identifiers known for `version`
	pub fn len(&self, version: Id3v2Version) -> usize {
		self.table(version).len()
	}

	/// Describe a frame for logging, falling back to "unknown frame" for unregistered identifiers
	pub(crate) fn describe(&self, version: Id3v2Version, id: &str) -> &'static str {
		self.name(version, id).unwrap_or("unknown frame")
	}

	fn table(&self, version: Id3v2Version) -> &HashMap<&'static str, &'static str> {
		match version {
			Id3v2Version::V2 => &self.v2,
			Id3v2Version::V3 => &self.v3,
			Id3v2Version::V4 => &self.v4,
		}
	}
}

macro_rules! gen_registry {
	(
		V2 => [$($v2_key:literal => $v2_name:literal),+ $(,)?];
		V3 => [$($v3_key:literal => $v3_name:literal),+ $(,)?];
		V4 => [$($v4_key:literal => $v4_name:literal),+ $(,)?]
	) => {
		impl FrameRegistry {
			fn build() -> Self {
				let mut v2 = HashMap::new();
				$(
					v2.insert($v2_key, $v2_name);
				)+

				let mut v3 = HashMap::new();
				$(
					v3.insert($v3_key, $v3_name);
				)+

				let mut v4 = HashMap::new();
				$(
					v4.insert($v4_key, $v4_name);
				)+

				Self { v2, v3, v4 }
			}
		}
	};
}

gen_registry!(
	V2 => [
		"BUF" => "Recommended buffer size",
		"CNT" => "Play counter",
		"COM" => "Comments",
		"CRA" => "Audio encryption",
		"CRM" => "Encrypted meta frame",
		"ETC" => "Event timing codes",
		"EQU" => "Equalization",
		"GEO" => "General encapsulated object",
		"IPL" => "Involved people list",
		"LNK" => "Linked information",
		"MCI" => "Music CD Identifier",
		"MLL" => "MPEG location lookup table",
		"PIC" => "Attached picture",
		"POP" => "Popularimeter",
		"REV" => "Reverb",
		"RVA" => "Relative volume adjustment",
		"SLT" => "Synchronized lyric/text",
		"STC" => "Synced tempo codes",
		"TAL" => "Album/Movie/Show title",
		"TBP" => "BPM (Beats Per Minute)",
		"TCM" => "Composer",
		"TCO" => "Content type",
		"TCR" => "Copyright message",
		"TDA" => "Date",
		"TDY" => "Playlist delay",
		"TEN" => "Encoded by",
		"TFT" => "File type",
		"TIM" => "Time",
		"TKE" => "Initial key",
		"TLA" => "Language(s)",
		"TLE" => "Length",
		"TMT" => "Media type",
		"TOA" => "Original artist(s)/performer(s)",
		"TOF" => "Original filename",
		"TOL" => "Original Lyricist(s)/text writer(s)",
		"TOR" => "Original release year",
		"TOT" => "Original album/Movie/Show title",
		"TP1" => "Lead artist(s)/Lead performer(s)/Soloist(s)/Performing group",
		"TP2" => "Band/Orchestra/Accompaniment",
		"TP3" => "Conductor/Performer refinement",
		"TP4" => "Interpreted, remixed, or otherwise modified by",
		"TPA" => "Part of a set",
		"TPB" => "Publisher",
		"TRC" => "ISRC (International Standard Recording Code)",
		"TRD" => "Recording dates",
		"TRK" => "Track number/Position in set",
		"TSI" => "Size",
		"TSS" => "Software/hardware and settings used for encoding",
		"TT1" => "Content group description",
		"TT2" => "Title/Songname/Content description",
		"TT3" => "Subtitle/Description refinement",
		"TXT" => "Lyricist/text writer",
		"TXX" => "User defined text information frame",
		"TYE" => "Year",
		"UFI" => "Unique file identifier",
		"ULT" => "Unsychronized lyric/text transcription",
		"WAF" => "Official audio file webpage",
		"WAR" => "Official artist/performer webpage",
		"WAS" => "Official audio source webpage",
		"WCM" => "Commercial information",
		"WCP" => "Copyright/Legal information",
		"WPB" => "Publishers official webpage",
		"WXX" => "User defined URL link frame",
	];
	V3 => [
		"AENC" => "Audio encryption",
		"APIC" => "Attached picture",
		"COMM" => "Comments",
		"COMR" => "Commercial frame",
		"ENCR" => "Encryption method registration",
		"EQUA" => "Equalization",
		"ETCO" => "Event timing codes",
		"GEOB" => "General encapsulated object",
		"GRID" => "Group identification registration",
		"IPLS" => "Involved people list",
		"LINK" => "Linked information",
		"MCDI" => "Music CD identifier",
		"MLLT" => "MPEG location lookup table",
		"OWNE" => "Ownership frame",
		"PRIV" => "Private frame",
		"PCNT" => "Play counter",
		"POPM" => "Popularimeter",
		"POSS" => "Position synchronisation frame",
		"RBUF" => "Recommended buffer size",
		"RVAD" => "Relative volume adjustment",
		"RVRB" => "Reverb",
		"SYLT" => "Synchronized lyric/text",
		"SYTC" => "Synchronized tempo codes",
		"TALB" => "Album/Movie/Show title",
		"TBPM" => "BPM (beats per minute)",
		"TCOM" => "Composer",
		"TCON" => "Content type",
		"TCOP" => "Copyright message",
		"TDAT" => "Date",
		"TDLY" => "Playlist delay",
		"TENC" => "Encoded by",
		"TEXT" => "Lyricist/Text writer",
		"TFLT" => "File type",
		"TIME" => "Time",
		"TIT1" => "Content group description",
		"TIT2" => "Title/songname/content description",
		"TIT3" => "Subtitle/Description refinement",
		"TKEY" => "Initial key",
		"TLAN" => "Language(s)",
		"TLEN" => "Length",
		"TMED" => "Media type",
		"TOAL" => "Original album/movie/show title",
		"TOFN" => "Original filename",
		"TOLY" => "Original lyricist(s)/text writer(s)",
		"TOPE" => "Original artist(s)/performer(s)",
		"TORY" => "Original release year",
		"TOWN" => "File owner/licensee",
		"TPE1" => "Lead performer(s)/Soloist(s)",
		"TPE2" => "Band/orchestra/accompaniment",
		"TPE3" => "Conductor/performer refinement",
		"TPE4" => "Interpreted, remixed, or otherwise modified by",
		"TPOS" => "Part of a set",
		"TPUB" => "Publisher",
		"TRCK" => "Track number/Position in set",
		"TRDA" => "Recording dates",
		"TRSN" => "Internet radio station name",
		"TRSO" => "Internet radio station owner",
		"TSIZ" => "Size",
		"TSRC" => "ISRC (international standard recording code)",
		"TSSE" => "Software/Hardware and settings used for encoding",
		"TYER" => "Year",
		"TXXX" => "User defined text information frame",
		"UFID" => "Unique file identifier",
		"USER" => "Terms of use",
		"USLT" => "Unsychronized lyric/text transcription",
		"WCOM" => "Commercial information",
		"WCOP" => "Copyright/Legal information",
		"WOAF" => "Official audio file webpage",
		"WOAR" => "Official artist/performer webpage",
		"WOAS" => "Official audio source webpage",
		"WORS" => "Official internet radio station homepage",
		"WPAY" => "Payment",
		"WPUB" => "Publishers official webpage",
		"WXXX" => "User defined URL link frame",
	];
	V4 => [
		"AENC" => "Audio encryption",
		"APIC" => "Attached picture",
		"ASPI" => "Audio seek point index",
		"COMM" => "Comments",
		"COMR" => "Commercial frame",
		"ENCR" => "Encryption method registration",
		"EQU2" => "Equalisation (2)",
		"ETCO" => "Event timing codes",
		"GEOB" => "General encapsulated object",
		"GRID" => "Group identification registration",
		"LINK" => "Linked information",
		"MCDI" => "Music CD identifier",
		"MLLT" => "MPEG location lookup table",
		"OWNE" => "Ownership frame",
		"PRIV" => "Private frame",
		"PCNT" => "Play counter",
		"POPM" => "Popularimeter",
		"POSS" => "Position synchronisation frame",
		"RBUF" => "Recommended buffer size",
		"RVA2" => "Relative volume adjustment (2)",
		"RVRB" => "Reverb",
		"SEEK" => "Seek frame",
		"SIGN" => "Signature frame",
		"SYLT" => "Synchronised lyric/text",
		"SYTC" => "Synchronised tempo codes",
		"TALB" => "Album/Movie/Show title",
		"TBPM" => "BPM (beats per minute)",
		"TCOM" => "Composer",
		"TCON" => "Content type",
		"TCOP" => "Copyright message",
		"TDEN" => "Encoding time",
		"TDLY" => "Playlist delay",
		"TDOR" => "Original release time",
		"TDRC" => "Recording time",
		"TDRL" => "Release time",
		"TDTG" => "Tagging time",
		"TENC" => "Encoded by",
		"TEXT" => "Lyricist/Text writer",
		"TFLT" => "File type",
		"TIPL" => "Involved people list",
		"TIT1" => "Content group description",
		"TIT2" => "Title/songname/content description",
		"TIT3" => "Subtitle/Description refinement",
		"TKEY" => "Initial key",
		"TLAN" => "Language(s)",
		"TLEN" => "Length",
		"TMCL" => "Musician credits list",
		"TMED" => "Media type",
		"TMOO" => "Mood",
		"TOAL" => "Original album/movie/show title",
		"TOFN" => "Original filename",
		"TOLY" => "Original lyricist(s)/text writer(s)",
		"TOPE" => "Original artist(s)/performer(s)",
		"TOWN" => "File owner/licensee",
		"TPE1" => "Lead performer(s)/Soloist(s)",
		"TPE2" => "Band/orchestra/accompaniment",
		"TPE3" => "Conductor/performer refinement",
		"TPE4" => "Interpreted, remixed, or otherwise modified by",
		"TPOS" => "Part of a set",
		"TPRO" => "Produced notice",
		"TPUB" => "Publisher",
		"TRCK" => "Track number/Position in set",
		"TRSN" => "Internet radio station name",
		"TRSO" => "Internet radio station owner",
		"TSOA" => "Album sort order",
		"TSOP" => "Performer sort order",
		"TSOT" => "Title sort order",
		"TSRC" => "ISRC (international standard recording code)",
		"TSSE" => "Software/Hardware and settings used for encoding",
		"TSST" => "Set subtitle",
		"TXXX" => "User defined text information frame",
		"UFID" => "Unique file identifier",
		"USER" => "Terms of use",
		"USLT" => "Unsynchronised lyric/text transcription",
		"WCOM" => "Commercial information",
		"WCOP" => "Copyright/Legal information",
		"WOAF" => "Official audio file webpage",
		"WOAR" => "Official artist/performer webpage",
		"WOAS" => "Official audio source webpage",
		"WORS" => "Official Internet radio station homepage",
		"WPAY" => "Payment",
		"WPUB" => "Publishers official webpage",
		"WXXX" => "User defined URL link frame",
	]
);
