//! Utilities for working with synchsafe integers
//!
//! A synchsafe integer stores 7 bits per byte, keeping the most significant bit of every
//! byte clear so that the encoded value can never be mistaken for an MPEG sync signal.
//!
//! Encoding never fails. Values that need more than `7 * width` bits silently lose their
//! high bits, so a round trip only holds for values below `2^(7 * width)`.

/// The widest synchsafe field found in a tag (the ID3v2.4 extended header CRC)
pub const MAX_SYNCHSAFE_WIDTH: usize = 5;

/// An integer that can be converted to and from synchsafe variants
pub trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// Any bits that don't fit in <`INTEGER_TYPE::BITS - size_of::<INTEGER_TYPE>()`> bits are
	/// discarded.
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// // Maximum value we can represent in a synchsafe u32
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch();
	///
	/// // Our synchronized number should be something completely different
	/// assert_ne!(synch_number, unsynch_number);
	///
	/// // Each byte should have 7 set bits and an MSB of 0
	/// assert_eq!(synch_number, 0b01111111_01111111_01111111_01111111_u32);
	///
	/// // 2^28 doesn't fit, the high bit is lost
	/// assert_eq!(0x1000_0000_u32.synch(), 0);
	/// ```
	fn synch(self) -> Self;

	/// Unsynchronise a synchsafe integer
	///
	/// # Examples
	///
	/// ```rust
	/// use id3wire::id3::v2::util::synchsafe::SynchsafeInteger;
	///
	/// let unsynch_number = 0xFFF_FFFF_u32;
	/// let synch_number = unsynch_number.synch();
	///
	/// // Now, our re-unsynchronized number should match our original
	/// let re_unsynch_number = synch_number.unsynch();
	/// assert_eq!(re_unsynch_number, unsynch_number);
	/// ```
	fn unsynch(self) -> Self;
}

macro_rules! impl_synchsafe {
	(
		$ty:ty,
		synch($n:ident) $body:block;
		unsynch($u:ident) $unsynch_body:block
	) => {
		#[allow(unused_parens)]
		impl SynchsafeInteger for $ty {
			fn synch(self) -> Self {
				let $n = self;
				$body
			}

			fn unsynch(self) -> Self {
				let $u = self;
				$unsynch_body
			}
		}
	};
}

impl_synchsafe! {
	u8,
	synch(n) {
		(n & 0x7F)
	};
	unsynch(u) {
		(u & 0x7F)
	}
}

impl_synchsafe! {
	u16,
	synch(n) {
		(n & 0x7F) |
		((n & (0x7F << 7)) << 1)
	};
	unsynch(u) {
		((u & 0x7F00) >> 1) | (u & 0x7F)
	}
}

impl_synchsafe! {
	u32,
	synch(n) {
		(n & 0x7F) |
		((n & (0x7F << 7)) << 1) |
		((n & (0x7F << 14)) << 2) |
		((n & (0x7F << 21)) << 3)
	};
	unsynch(u) {
		((u & 0x7F00_0000) >> 3) | ((u & 0x7F_0000) >> 2) | ((u & 0x7F00) >> 1) | (u & 0x7F)
	}
}

/// Encode `value` as a big endian synchsafe integer of `width` bytes
///
/// `width` is clamped to `1..=5`.
///
/// # Examples
///
/// ```rust
/// use id3wire::id3::v2::util::synchsafe::encode_synchsafe;
///
/// assert_eq!(encode_synchsafe(0x0FFF_FFFF, 4), [0x7F, 0x7F, 0x7F, 0x7F]);
/// assert_eq!(encode_synchsafe(0xFFFF_FFFF, 5), [0x0F, 0x7F, 0x7F, 0x7F, 0x7F]);
/// ```
pub fn encode_synchsafe(value: u64, width: usize) -> Vec<u8> {
	let width = width.clamp(1, MAX_SYNCHSAFE_WIDTH);

	(0..width)
		.rev()
		.map(|i| ((value >> (7 * i)) & 0x7F) as u8)
		.collect()
}

/// Decode a big endian synchsafe integer
///
/// The most significant bit of each byte is ignored. Only the last 5 bytes of `bytes` contribute
/// to the value.
///
/// # Examples
///
/// ```rust
/// use id3wire::id3::v2::util::synchsafe::decode_synchsafe;
///
/// assert_eq!(decode_synchsafe(&[0x7F, 0x7F, 0x7F, 0x7F]), 0x0FFF_FFFF);
/// assert_eq!(decode_synchsafe(&[0x01, 0x00]), 0x80);
/// ```
pub fn decode_synchsafe(bytes: &[u8]) -> u64 {
	let start = bytes.len().saturating_sub(MAX_SYNCHSAFE_WIDTH);

	bytes[start..]
		.iter()
		.fold(0, |acc, byte| (acc << 7) | u64::from(byte & 0x7F))
}

#[cfg(test)]
mod tests {
	use crate::id3::v2::util::synchsafe::{SynchsafeInteger, decode_synchsafe, encode_synchsafe};

	macro_rules! synchsafe_integer_tests {
		(
			$($int:ty => {
				synch: $original:literal, $new:literal;
				unsynch: $original_unsync:literal, $new_unsynch:literal;
				lossy: $original_lossy:literal, $new_lossy:literal;
			});+
		) => {
			$(
				paste::paste! {
					#[test_log::test]
					fn [<$int _synch>]() {
						assert_eq!($original.synch(), $new);
					}

					#[test_log::test]
					fn [<$int _unsynch>]() {
						assert_eq!($original_unsync.unsynch(), $new_unsynch);
					}

					#[test_log::test]
					fn [<$int _lossy>]() {
						assert_eq!($original_lossy.synch(), $new_lossy);
					}
				}
			)+
		};
	}

	synchsafe_integer_tests! {
		u8 => {
			synch:   0x7F_u8, 0x7F_u8;
			unsynch: 0x7F_u8, 0x7F_u8;
			lossy:   0xFF_u8, 0x7F_u8;
		};
		u16 => {
			synch:   0x3FFF_u16, 0x7F7F_u16;
			unsynch: 0x7F7F_u16, 0x3FFF_u16;
			lossy:   0xFFFF_u16, 0x7F7F_u16;
		};
		u32 => {
			synch:   0xFFF_FFFF_u32, 0x7F7F_7F7F_u32;
			unsynch: 0x7F7F_7F7F_u32, 0xFFF_FFFF_u32;
			lossy:   0x1FFF_FFFF_u32, 0x7F7F_7F7F_u32;
		}
	}

	#[test_log::test]
	fn width_4_boundary() {
		for value in [0_u64, 1, 0x7F, 0x80, 1 << 27, 0x0FFF_FFFF] {
			assert_eq!(decode_synchsafe(&encode_synchsafe(value, 4)), value);
		}

		for value in [1_u64 << 28, 0x1FFF_FFFF] {
			assert_ne!(decode_synchsafe(&encode_synchsafe(value, 4)), value);
		}
	}

	#[test_log::test]
	fn width_4_matches_u32() {
		for value in [0_u32, 0x7F, 0x80, 0x3FFF, 0x0123_4567, 0x0FFF_FFFF] {
			let encoded = encode_synchsafe(u64::from(value), 4);
			assert_eq!(encoded, value.synch().to_be_bytes());
			assert_eq!(
				u32::from_be_bytes([encoded[0], encoded[1], encoded[2], encoded[3]]).unsynch(),
				value
			);
		}
	}

	#[test_log::test]
	fn every_byte_is_synchsafe() {
		for width in 1..=5 {
			let encoded = encode_synchsafe(u64::MAX, width);
			assert_eq!(encoded.len(), width);
			assert!(encoded.iter().all(|b| b & 0x80 == 0));
		}
	}

	#[test_log::test]
	fn width_5_holds_a_crc() {
		let crc = 0xDEAD_BEEF_u64;
		let encoded = encode_synchsafe(crc, 5);
		assert_eq!(encoded, [0x0D, 0x75, 0x36, 0x7D, 0x6F]);
		assert_eq!(decode_synchsafe(&encoded), crc);
	}
}
