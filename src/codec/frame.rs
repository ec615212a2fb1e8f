//! Primitive readers and writers for the big-endian, length-prefixed record framing.

// self
use crate::{
	_prelude::*,
	codec::CodecLimits,
	error::{EncodeError, MalformedRecordError},
};

/// Length prefix marking an absent string (or a legacy null logo).
pub(crate) const ABSENT: i32 = -1;
/// Largest payload a signed 32-bit length prefix can announce.
pub(crate) const WIRE_MAX_LEN: usize = i32::MAX as usize;

pub(crate) struct Writer {
	buf: BytesMut,
}
impl Writer {
	pub(crate) fn with_capacity(capacity: usize) -> Self {
		Self { buf: BytesMut::with_capacity(capacity) }
	}

	pub(crate) fn i64(&mut self, value: i64) {
		self.buf.put_i64(value);
	}

	pub(crate) fn u32(&mut self, value: u32) {
		self.buf.put_u32(value);
	}

	pub(crate) fn opt_str(
		&mut self,
		field: &'static str,
		value: Option<&str>,
	) -> Result<(), EncodeError> {
		match value {
			Some(value) => self.bytes(field, value.as_bytes()),
			None => {
				self.buf.put_i32(ABSENT);

				Ok(())
			},
		}
	}

	pub(crate) fn bytes(&mut self, field: &'static str, value: &[u8]) -> Result<(), EncodeError> {
		let len = i32::try_from(value.len())
			.map_err(|_| EncodeError::FieldTooLarge { field, length: value.len() })?;

		self.buf.put_i32(len);
		self.buf.put_slice(value);

		Ok(())
	}

	/// Writes a `u32` byte length followed by an already framed payload.
	pub(crate) fn frame(&mut self, field: &'static str, payload: &[u8]) -> Result<(), EncodeError> {
		let len = u32::try_from(payload.len())
			.map_err(|_| EncodeError::FieldTooLarge { field, length: payload.len() })?;

		self.buf.put_u32(len);
		self.buf.put_slice(payload);

		Ok(())
	}

	pub(crate) fn finish(self) -> Bytes {
		self.buf.freeze()
	}
}

pub(crate) struct Reader<'a> {
	buf: &'a [u8],
	limits: &'a CodecLimits,
}
impl<'a> Reader<'a> {
	pub(crate) fn new(buf: &'a [u8], limits: &'a CodecLimits) -> Self {
		Self { buf, limits }
	}

	pub(crate) fn remaining(&self) -> usize {
		self.buf.remaining()
	}

	fn ensure(&self, field: &'static str, needed: usize) -> Result<(), MalformedRecordError> {
		let remaining = self.buf.remaining();

		if remaining < needed {
			return Err(MalformedRecordError::Truncated { field, needed, remaining });
		}

		Ok(())
	}

	pub(crate) fn i64(&mut self, field: &'static str) -> Result<i64, MalformedRecordError> {
		self.ensure(field, 8)?;

		Ok(self.buf.get_i64())
	}

	pub(crate) fn u32(&mut self, field: &'static str) -> Result<u32, MalformedRecordError> {
		self.ensure(field, 4)?;

		Ok(self.buf.get_u32())
	}

	/// Reads a signed length prefix; `None` means the absent marker.
	fn length(&mut self, field: &'static str) -> Result<Option<usize>, MalformedRecordError> {
		self.ensure(field, 4)?;

		match self.buf.get_i32() {
			ABSENT => Ok(None),
			len if len < 0 =>
				Err(MalformedRecordError::InvalidLength { field, length: i64::from(len) }),
			len => Ok(Some(len as usize)),
		}
	}

	pub(crate) fn take(
		&mut self,
		field: &'static str,
		len: usize,
	) -> Result<&'a [u8], MalformedRecordError> {
		self.ensure(field, len)?;

		let (head, tail) = self.buf.split_at(len);

		self.buf = tail;

		Ok(head)
	}

	pub(crate) fn opt_string(
		&mut self,
		field: &'static str,
	) -> Result<Option<String>, MalformedRecordError> {
		let Some(len) = self.length(field)? else {
			return Ok(None);
		};

		check_limit(field, len, self.limits.max_string_len())?;

		let raw = self.take(field, len)?.to_vec();

		String::from_utf8(raw)
			.map(Some)
			.map_err(|source| MalformedRecordError::InvalidUtf8 { field, source })
	}

	/// Reads a byte sequence, mapping the legacy null marker to an empty sequence.
	pub(crate) fn bytes(&mut self, field: &'static str) -> Result<Bytes, MalformedRecordError> {
		let Some(len) = self.length(field)? else {
			return Ok(Bytes::new());
		};

		check_limit(field, len, self.limits.max_logo_len())?;

		Ok(Bytes::copy_from_slice(self.take(field, len)?))
	}

	pub(crate) fn finish(self) -> Result<(), MalformedRecordError> {
		match self.buf.remaining() {
			0 => Ok(()),
			remaining => Err(MalformedRecordError::TrailingBytes { remaining }),
		}
	}
}

pub(crate) fn check_limit(
	field: &'static str,
	length: usize,
	limit: usize,
) -> Result<(), MalformedRecordError> {
	if length > limit {
		return Err(MalformedRecordError::FieldTooLarge { field, length, limit });
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn absent_and_empty_strings_differ_on_the_wire() {
		let mut writer = Writer::with_capacity(8);

		writer.opt_str("a", None).expect("Absent string should encode.");
		writer.opt_str("b", Some("")).expect("Empty string should encode.");

		let bytes = writer.finish();

		assert_eq!(&bytes[..], &[0xFF_u8, 0xFF, 0xFF, 0xFF, 0, 0, 0, 0]);

		let limits = CodecLimits::default();
		let mut reader = Reader::new(&bytes, &limits);

		assert_eq!(reader.opt_string("a").expect("Absent marker should decode."), None);
		assert_eq!(
			reader.opt_string("b").expect("Empty string should decode."),
			Some(String::new())
		);
		reader.finish().expect("Reader should consume every byte.");
	}

	#[test]
	fn negative_lengths_other_than_absent_are_rejected() {
		let limits = CodecLimits::default();
		let input = (-2_i32).to_be_bytes();
		let mut reader = Reader::new(&input, &limits);
		let err = reader.opt_string("identifier").expect_err("A -2 prefix should be rejected.");

		assert!(matches!(
			err,
			MalformedRecordError::InvalidLength { field: "identifier", length: -2 }
		));
	}

	#[test]
	fn legacy_null_bytes_decode_as_empty() {
		let limits = CodecLimits::default();
		let input = ABSENT.to_be_bytes();
		let mut reader = Reader::new(&input, &limits);

		assert!(reader.bytes("logoData").expect("Null array should decode.").is_empty());
	}

	#[test]
	fn take_reports_truncation() {
		let limits = CodecLimits::default();
		let input = [0_u8; 3];
		let mut reader = Reader::new(&input, &limits);
		let err = reader.i64("id").expect_err("Three bytes cannot hold an i64.");

		assert!(matches!(
			err,
			MalformedRecordError::Truncated { field: "id", needed: 8, remaining: 3 }
		));
	}
}
