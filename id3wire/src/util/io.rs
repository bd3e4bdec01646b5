use crate::error::Result;

use std::io::Read;

/// Discard exactly `len` bytes from `reader`
///
/// Running out of data before `len` bytes are skipped is an [`UnexpectedEof`](std::io::ErrorKind::UnexpectedEof).
pub(crate) fn skip<R>(reader: &mut R, len: u64) -> Result<()>
where
	R: Read,
{
	if len == 0 {
		return Ok(());
	}

	let skipped = std::io::copy(&mut reader.by_ref().take(len), &mut std::io::sink())?;
	if skipped != len {
		return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
	}

	Ok(())
}
