pub(super) mod parse;

use crate::error::{Id3v2Error, Id3v2ErrorKind, Result};
use crate::id3::v2::{FrameFlags, Id3v2Version};

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// An ID3v2 frame header
///
/// These are rarely constructed by hand. Usually they are created in the background
/// when making a new [`Frame`](crate::id3::v2::Frame).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct FrameHeader<'a> {
	pub(crate) id: FrameId<'a>,
	pub flags: FrameFlags,
}

impl<'a> FrameHeader<'a> {
	/// Create a new [`FrameHeader`]
	pub const fn new(id: FrameId<'a>, flags: FrameFlags) -> Self {
		Self { id, flags }
	}

	/// Get the ID of the frame
	pub const fn id(&'a self) -> &'a FrameId<'a> {
		&self.id
	}
}

/// An ID3v2 frame ID
///
/// IDs are 3 characters in ID3v2.2, and 4 characters in ID3v2.3 and ID3v2.4.
#[derive(PartialEq, Clone, Debug, Eq, Hash)]
pub struct FrameId<'a>(Cow<'a, str>);

impl<'a> FrameId<'a> {
	/// Attempts to create a `FrameId` from an ID string
	///
	/// # Errors
	///
	/// * `id` contains invalid characters (must be 'A'..='Z' and '0'..='9')
	/// * `id` is an invalid length (must be 3 or 4)
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::id3::v2::FrameId;
	///
	/// # fn main() -> id3wire::error::Result<()> {
	/// let title = FrameId::new("TIT2")?;
	/// assert_eq!(title.as_str(), "TIT2");
	///
	/// assert!(FrameId::new("tit2").is_err());
	/// assert!(FrameId::new("TITLE").is_err());
	/// # Ok(()) }
	/// ```
	pub fn new<I>(id: I) -> Result<Self>
	where
		I: Into<Cow<'a, str>>,
	{
		Self::new_cow(id.into())
	}

	// Split from generic, public method to avoid code bloat by monomorphization.
	fn new_cow(id: Cow<'a, str>) -> Result<Self> {
		Self::verify_id(&id)?;

		match id.len() {
			3 | 4 => Ok(FrameId(id)),
			_ => Err(
				Id3v2Error::new(Id3v2ErrorKind::InvalidFrameId(id.into_owned().into_bytes())).into(),
			),
		}
	}

	/// Create a `FrameId` without verification
	///
	/// Only used for the IDs id3wire itself writes, which are known to be valid.
	pub(crate) const fn from_static(id: &'static str) -> FrameId<'static> {
		FrameId(Cow::Borrowed(id))
	}

	/// Whether this ID can appear in a tag of `version`
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::id3::v2::{FrameId, Id3v2Version};
	///
	/// # fn main() -> id3wire::error::Result<()> {
	/// let id = FrameId::new("TT2")?;
	/// assert!(id.is_valid_for(Id3v2Version::V2));
	/// assert!(!id.is_valid_for(Id3v2Version::V4));
	/// # Ok(()) }
	/// ```
	pub fn is_valid_for(&self, version: Id3v2Version) -> bool {
		self.0.len() == version.frame_id_len()
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Obtains an owned instance
	pub fn into_owned(self) -> FrameId<'static> {
		FrameId(Cow::Owned(self.0.into_owned()))
	}

	/// Consumes the [`FrameId`], returning the inner value
	pub fn into_inner(self) -> Cow<'a, str> {
		self.0
	}

	fn verify_id(id_str: &str) -> Result<()> {
		for c in id_str.chars() {
			if !c.is_ascii_uppercase() && !c.is_ascii_digit() {
				return Err(Id3v2Error::new(Id3v2ErrorKind::InvalidFrameId(
					id_str.as_bytes().to_vec(),
				))
				.into());
			}
		}

		Ok(())
	}
}

impl FrameId<'static> {
	/// Create a `FrameId` from the raw bytes of a frame header
	pub(crate) fn from_bytes(id: &[u8]) -> Result<Self> {
		let id_str = std::str::from_utf8(id)?;
		FrameId::new_cow(Cow::Owned(id_str.to_owned()))
	}
}

impl Display for FrameId<'_> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl<'a> Into<Cow<'a, str>> for FrameId<'a> {
	fn into(self) -> Cow<'a, str> {
		self.into_inner()
	}
}

impl PartialEq<str> for FrameId<'_> {
	fn eq(&self, other: &str) -> bool {
		self.as_str() == other
	}
}

impl PartialEq<&str> for FrameId<'_> {
	fn eq(&self, other: &&str) -> bool {
		self.as_str() == *other
	}
}
