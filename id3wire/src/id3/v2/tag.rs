use super::frame::Frame;
use super::frame::header::FrameId;
use super::header::{Id3v2Header, Id3v2TagFlags, Id3v2Version};
use super::items::{AttachedPictureFrame, CommentFrame, TextInformationFrame};
use crate::config::{ParseOptions, WriteOptions};
use crate::error::Result;
use crate::macros::id3v2_err;
use crate::picture::Picture;
use crate::tag::Accessor;
use crate::util::text::TextEncoding;

use std::borrow::Cow;
use std::io::{Read, Write};

// Frame IDs for each field, as (ID3v2.2, ID3v2.3/4)
const TITLE_ID: (&str, &str) = ("TT2", "TIT2");
const ARTIST_ID: (&str, &str) = ("TP1", "TPE1");
const ALBUM_ID: (&str, &str) = ("TAL", "TALB");
const YEAR_ID: (&str, &str) = ("TYE", "TYER");
const COMMENT_ID: (&str, &str) = ("COM", "COMM");
const TRACK_ID: (&str, &str) = ("TRK", "TRCK");
const PICTURE_ID: (&str, &str) = ("PIC", "APIC");

// ID3v2.4 replaced TYER with TDRC, it is only used when no TYER frame is present
const RECORDING_TIME_ID: &str = "TDRC";

const COMMENT_LANGUAGE: &str = "eng";
const COMMENT_DESCRIPTION: &str = "Comment";

const TRACK_SEPARATOR: char = '/';

fn field_id(ids: (&'static str, &'static str), version: Id3v2Version) -> FrameId<'static> {
	match version {
		Id3v2Version::V2 => FrameId::from_static(ids.0),
		Id3v2Version::V3 | Id3v2Version::V4 => FrameId::from_static(ids.1),
	}
}

fn is_field(id: &FrameId<'_>, ids: (&str, &str)) -> bool {
	*id == ids.0 || *id == ids.1
}

macro_rules! impl_accessor {
	($($name:ident),+ $(,)?) => {
		paste::paste! {
			$(
				fn $name(&self) -> Option<Cow<'_, str>> {
					self.$name.as_deref().map(Cow::Borrowed)
				}

				fn [<set_ $name>](&mut self, value: String) {
					self.$name = Some(value);
				}

				fn [<remove_ $name>](&mut self) {
					self.$name = None;
				}
			)+
		}
	}
}

/// An ID3v2 tag
///
/// Only the common fields are kept, any other frame is dropped while reading.
///
/// ## Reading
///
/// Each field is read from a frame, the identifiers differ between ID3v2.2 and ID3v2.3/4:
///
/// | Field                   | ID3v2.2 | ID3v2.3/4 |
/// |-------------------------|---------|-----------|
/// | title                   | `TT2`   | `TIT2`    |
/// | artist                  | `TP1`   | `TPE1`    |
/// | album                   | `TAL`   | `TALB`    |
/// | year                    | `TYE`   | `TYER`    |
/// | comment                 | `COM`   | `COMM`    |
/// | track number/total      | `TRK`   | `TRCK`    |
/// | picture                 | `PIC`   | `APIC`    |
///
/// In ID3v2.4, `TDRC` is used for the year when there is no `TYER` frame.
///
/// ## Writing
///
/// Frames are written in the order of the table above, with the picture last. Comments are
/// always written with the language `"eng"` and the description `"Comment"`.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Id3v2Tag {
	flags: Id3v2TagFlags,
	pub(super) original_version: Id3v2Version,
	pub(crate) title: Option<String>,
	pub(crate) artist: Option<String>,
	pub(crate) album: Option<String>,
	pub(crate) year: Option<String>,
	pub(crate) comment: Option<String>,
	pub(crate) track_number: Option<i32>,
	pub(crate) track_total: Option<i32>,
	pub(crate) picture: Option<Picture>,
}

impl Default for Id3v2Tag {
	fn default() -> Self {
		Self {
			flags: Id3v2TagFlags::default(),
			original_version: Id3v2Version::V4,
			title: None,
			artist: None,
			album: None,
			year: None,
			comment: None,
			track_number: None,
			track_total: None,
			picture: None,
		}
	}
}

impl Id3v2Tag {
	/// Create a new empty `Id3v2Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::id3::v2::Id3v2Tag;
	/// use id3wire::tag::Accessor;
	///
	/// let id3v2_tag = Id3v2Tag::new();
	/// assert!(id3v2_tag.title().is_none());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the [`Id3v2TagFlags`]
	pub fn flags(&self) -> &Id3v2TagFlags {
		&self.flags
	}

	/// Set the tag's flags
	pub fn set_flags(&mut self, flags: Id3v2TagFlags) {
		self.flags = flags
	}

	/// The original version of the tag
	///
	/// This is the version the tag was read as, or [`Id3v2Version::V4`] for new tags.
	pub fn original_version(&self) -> Id3v2Version {
		self.original_version
	}

	/// Returns the attached picture
	pub fn picture(&self) -> Option<&Picture> {
		self.picture.as_ref()
	}

	/// Sets the attached picture, replacing any existing one
	pub fn set_picture(&mut self, picture: Picture) {
		self.picture = Some(picture);
	}

	/// Removes the attached picture
	pub fn remove_picture(&mut self) -> Option<Picture> {
		self.picture.take()
	}

	/// Whether none of the fields are set
	pub fn is_empty(&self) -> bool {
		self.title.is_none()
			&& self.artist.is_none()
			&& self.album.is_none()
			&& self.year.is_none()
			&& self.comment.is_none()
			&& self.track_number.is_none()
			&& self.track_total.is_none()
			&& self.picture.is_none()
	}
}

impl Id3v2Tag {
	/// Read an `Id3v2Tag` of `version` from a reader
	///
	/// The reader must be positioned at the start of the tag header. No version detection is
	/// done, see [`detect_id3_version`](crate::id3::detect_id3_version).
	///
	/// # Errors
	///
	/// * The header doesn't start with `"ID3"`, or isn't of `version`
	/// * The tag size is 0
	/// * A frame is malformed (see [`Id3v2ErrorKind`](crate::error::Id3v2ErrorKind))
	/// * The reader ends before the tag does
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::config::ParseOptions;
	/// use id3wire::id3::v2::{Id3v2Tag, Id3v2Version};
	/// use id3wire::tag::Accessor;
	///
	/// # fn main() -> id3wire::error::Result<()> {
	/// let bytes = b"ID3\x03\x00\x00\x00\x00\x00\x10TIT2\x00\x00\x00\x06\x00\x00\x00Title";
	///
	/// let tag = Id3v2Tag::read_from(&mut &bytes[..], Id3v2Version::V3, ParseOptions::new())?;
	/// assert_eq!(tag.title().as_deref(), Some("Title"));
	/// # Ok(()) }
	/// ```
	pub fn read_from<R>(
		reader: &mut R,
		version: Id3v2Version,
		parse_options: ParseOptions,
	) -> Result<Self>
	where
		R: Read,
	{
		let header = Id3v2Header::parse(reader, version)?;
		super::read::parse_id3v2(reader, header, parse_options)
	}

	/// Write the tag to a writer
	///
	/// The tag is fully built before anything is written, so `writer` is left untouched on
	/// error.
	///
	/// # Errors
	///
	/// * The track number or total is negative
	/// * A field cannot be encoded with [`WriteOptions::text_encoding`]
	/// * The tag is too large
	/// * [`std::io::Error`]
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::config::WriteOptions;
	/// use id3wire::id3::v2::Id3v2Tag;
	/// use id3wire::tag::Accessor;
	///
	/// # fn main() -> id3wire::error::Result<()> {
	/// let mut tag = Id3v2Tag::new();
	/// tag.set_title(String::from("Title"));
	///
	/// let mut bytes = Vec::new();
	/// tag.dump_to(&mut bytes, WriteOptions::new())?;
	/// assert!(bytes.starts_with(b"ID3\x04\x00"));
	/// # Ok(()) }
	/// ```
	pub fn dump_to<W>(&self, writer: &mut W, write_options: WriteOptions) -> Result<()>
	where
		W: Write,
	{
		let bytes = super::write::create_tag(self, write_options)?;
		writer.write_all(&bytes)?;

		Ok(())
	}

	// Negative numbers can't be represented in a TRCK frame
	pub(super) fn verify_track_numbers(&self) -> Result<()> {
		for number in [self.track_number, self.track_total].into_iter().flatten() {
			if number < 0 {
				id3v2_err!(InvalidTrackNumber(number));
			}
		}

		Ok(())
	}

	/// The frames for each field that is set, in the order they are written
	pub(super) fn frames(&self, write_options: WriteOptions) -> Vec<Frame<'_>> {
		let version = write_options.version;
		let encoding = write_options.text_encoding;

		let mut frames = Vec::new();

		let text_fields = [
			(TITLE_ID, &self.title),
			(ARTIST_ID, &self.artist),
			(ALBUM_ID, &self.album),
			(YEAR_ID, &self.year),
		];

		for (ids, value) in text_fields {
			if let Some(value) = value {
				frames.push(new_text_frame(field_id(ids, version), encoding, value));
			}
		}

		if let Some(comment) = &self.comment {
			let frame = CommentFrame::new(
				encoding,
				COMMENT_LANGUAGE,
				COMMENT_DESCRIPTION,
				comment.as_str(),
			);
			frames.push(Frame::Comment(frame).with_id(field_id(COMMENT_ID, version)));
		}

		match (self.track_number, self.track_total) {
			(Some(number), Some(total)) => frames.push(new_text_frame(
				field_id(TRACK_ID, version),
				encoding,
				format!("{number}{TRACK_SEPARATOR}{total}"),
			)),
			(Some(number), None) => frames.push(new_text_frame(
				field_id(TRACK_ID, version),
				encoding,
				number.to_string(),
			)),
			(None, Some(total)) => {
				log::warn!("Track total ({total}) has no track number, it will not be written");
			},
			(None, None) => {},
		}

		if let Some(picture) = &self.picture {
			let frame = AttachedPictureFrame::new(encoding, Cow::Borrowed(picture));
			frames.push(Frame::Picture(frame).with_id(field_id(PICTURE_ID, version)));
		}

		frames
	}

	/// Store the content of a decoded frame in its field
	///
	/// Frames that don't map to a field are dropped.
	pub(super) fn apply_frame(&mut self, frame: Frame<'static>) -> Result<()> {
		match frame {
			Frame::Text(TextInformationFrame { header, value, .. }) => {
				let id = &header.id;
				let value = value.into_owned();

				if is_field(id, TITLE_ID) {
					self.title = Some(value);
				} else if is_field(id, ARTIST_ID) {
					self.artist = Some(value);
				} else if is_field(id, ALBUM_ID) {
					self.album = Some(value);
				} else if is_field(id, YEAR_ID) {
					self.year = Some(value);
				} else if *id == RECORDING_TIME_ID && self.original_version == Id3v2Version::V4 {
					if self.year.is_none() {
						self.year = Some(value);
					}
				} else if is_field(id, TRACK_ID) {
					self.set_track_pair(&value)?;
				} else {
					log::trace!("Dropping text frame `{id}`");
				}
			},
			Frame::Comment(frame) => self.comment = Some(frame.content.into_owned()),
			Frame::Picture(frame) => self.picture = Some(frame.picture.into_owned()),
		}

		Ok(())
	}

	// "N" or "N/Total", split on the first separator only
	fn set_track_pair(&mut self, value: &str) -> Result<()> {
		match value.split_once(TRACK_SEPARATOR) {
			Some((number, total)) => {
				self.track_number = Some(number.parse()?);
				self.track_total = Some(total.parse()?);
			},
			None => {
				self.track_number = Some(value.parse()?);
			},
		}

		Ok(())
	}
}

fn new_text_frame<'a>(
	id: FrameId<'a>,
	encoding: TextEncoding,
	value: impl Into<Cow<'a, str>>,
) -> Frame<'a> {
	Frame::Text(TextInformationFrame::new(id, encoding, value))
}

impl Accessor for Id3v2Tag {
	impl_accessor!(title, artist, album, year, comment);

	fn track(&self) -> Option<i32> {
		self.track_number
	}

	fn set_track(&mut self, value: i32) {
		self.track_number = Some(value);
	}

	fn remove_track(&mut self) {
		self.track_number = None;
	}

	fn track_total(&self) -> Option<i32> {
		self.track_total
	}

	fn set_track_total(&mut self, value: i32) {
		self.track_total = Some(value);
	}

	fn remove_track_total(&mut self) {
		self.track_total = None;
	}
}

#[cfg(test)]
mod tests {
	use crate::TextEncoding;
	use crate::config::WriteOptions;
	use crate::error::ErrorKind;
	use crate::id3::v2::{
		CommentFrame, Frame, FrameId, Id3v2Tag, Id3v2Version, TextInformationFrame,
	};
	use crate::picture::{MimeType, Picture, PictureType};
	use crate::tag::Accessor;

	fn text(id: &str, value: &str) -> Frame<'static> {
		Frame::Text(TextInformationFrame::new(
			FrameId::new(id.to_owned()).unwrap(),
			TextEncoding::UTF8,
			value.to_owned(),
		))
	}

	fn frame_ids(tag: &Id3v2Tag, version: Id3v2Version) -> Vec<String> {
		tag.frames(WriteOptions::new().version(version))
			.iter()
			.map(|frame| frame.id().as_str().to_owned())
			.collect()
	}

	fn full_tag() -> Id3v2Tag {
		let mut tag = Id3v2Tag::new();
		tag.set_picture(
			Picture::unchecked(vec![1, 2, 3])
				.pic_type(PictureType::CoverFront)
				.mime_type(MimeType::Png)
				.build(),
		);
		tag.set_track_total(10);
		tag.set_track(1);
		tag.set_comment(String::from("Comment"));
		tag.set_year(String::from("2023"));
		tag.set_album(String::from("Album"));
		tag.set_artist(String::from("Artist"));
		tag.set_title(String::from("Title"));
		tag
	}

	#[test_log::test]
	fn frame_order() {
		let tag = full_tag();

		assert_eq!(
			frame_ids(&tag, Id3v2Version::V4),
			["TIT2", "TPE1", "TALB", "TYER", "COMM", "TRCK", "APIC"]
		);
		assert_eq!(
			frame_ids(&tag, Id3v2Version::V3),
			["TIT2", "TPE1", "TALB", "TYER", "COMM", "TRCK", "APIC"]
		);
		assert_eq!(
			frame_ids(&tag, Id3v2Version::V2),
			["TT2", "TP1", "TAL", "TYE", "COM", "TRK", "PIC"]
		);
	}

	#[test_log::test]
	fn track_formats() {
		let mut tag = Id3v2Tag::new();
		tag.set_track(3);

		let frames = tag.frames(WriteOptions::new());
		assert!(matches!(&frames[..], [Frame::Text(f)] if f.value == "3"));

		tag.set_track_total(12);
		let frames = tag.frames(WriteOptions::new());
		assert!(matches!(&frames[..], [Frame::Text(f)] if f.value == "3/12"));

		// A total alone is not written
		tag.remove_track();
		assert!(tag.frames(WriteOptions::new()).is_empty());
	}

	#[test_log::test]
	fn comment_frame_fields() {
		let mut tag = Id3v2Tag::new();
		tag.set_comment(String::from("Some comment"));

		let frames = tag.frames(WriteOptions::new());
		let [Frame::Comment(comment)] = &frames[..] else {
			panic!("Expected a single comment frame");
		};

		assert_eq!(comment.language, "eng");
		assert_eq!(comment.description, "Comment");
		assert_eq!(comment.content, "Some comment");
	}

	#[test_log::test]
	fn negative_track_numbers() {
		let mut tag = Id3v2Tag::new();
		tag.set_track(-1);
		assert!(tag.verify_track_numbers().is_err());

		tag.set_track(1);
		tag.set_track_total(-5);
		assert!(tag.verify_track_numbers().is_err());

		tag.set_track_total(5);
		assert!(tag.verify_track_numbers().is_ok());
	}

	#[test_log::test]
	fn apply_fields() {
		let mut tag = Id3v2Tag::new();
		tag.original_version = Id3v2Version::V3;

		tag.apply_frame(text("TIT2", "Title")).unwrap();
		tag.apply_frame(text("TPE1", "Artist")).unwrap();
		tag.apply_frame(text("TALB", "Album")).unwrap();
		tag.apply_frame(text("TYER", "1999")).unwrap();
		tag.apply_frame(text("TRCK", "4/9")).unwrap();
		tag.apply_frame(text("TCON", "Rock")).unwrap();
		tag.apply_frame(Frame::Comment(CommentFrame::new(
			TextEncoding::Latin1,
			"eng",
			"",
			String::from("Hello"),
		)))
		.unwrap();

		assert_eq!(tag.title().as_deref(), Some("Title"));
		assert_eq!(tag.artist().as_deref(), Some("Artist"));
		assert_eq!(tag.album().as_deref(), Some("Album"));
		assert_eq!(tag.year().as_deref(), Some("1999"));
		assert_eq!(tag.comment().as_deref(), Some("Hello"));
		assert_eq!(tag.track(), Some(4));
		assert_eq!(tag.track_total(), Some(9));
	}

	#[test_log::test]
	fn v2_fields() {
		let mut tag = Id3v2Tag::new();
		tag.original_version = Id3v2Version::V2;

		tag.apply_frame(text("TT2", "Title")).unwrap();
		tag.apply_frame(text("TRK", "7")).unwrap();

		assert_eq!(tag.title().as_deref(), Some("Title"));
		assert_eq!(tag.track(), Some(7));
		assert_eq!(tag.track_total(), None);
	}

	#[test_log::test]
	fn recording_time_is_a_year_fallback() {
		let mut tag = Id3v2Tag::new();
		tag.apply_frame(text("TDRC", "2001")).unwrap();
		assert_eq!(tag.year().as_deref(), Some("2001"));

		// TYER always wins
		tag.apply_frame(text("TYER", "2002")).unwrap();
		tag.apply_frame(text("TDRC", "2003")).unwrap();
		assert_eq!(tag.year().as_deref(), Some("2002"));

		// Only in ID3v2.4
		let mut tag = Id3v2Tag::new();
		tag.original_version = Id3v2Version::V3;
		tag.apply_frame(text("TDRC", "2001")).unwrap();
		assert_eq!(tag.year(), None);
	}

	#[test_log::test]
	fn track_parse_errors() {
		for value in ["one", "1/ten", "1/2/3", "/"] {
			let mut tag = Id3v2Tag::new();
			let err = tag.apply_frame(text("TRCK", value)).unwrap_err();
			assert!(matches!(err.kind(), ErrorKind::ParseInt(_)), "{value}");
		}
	}

	#[test_log::test]
	fn picture_accessors() {
		let mut tag = full_tag();
		assert_eq!(tag.picture().map(Picture::data), Some(&[1, 2, 3][..]));

		let picture = tag.remove_picture().unwrap();
		assert_eq!(picture.pic_type(), PictureType::CoverFront);
		assert!(tag.picture().is_none());
		assert!(!tag.is_empty());
		assert!(Id3v2Tag::new().is_empty());
	}
}
