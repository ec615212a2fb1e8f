//! Binary wire format for identity provider records.
//!
//! A record is framed as a fixed sequence of big-endian fields:
//!
//! | Field | Encoding |
//! |---|---|
//! | `id` | `i64` |
//! | `identifier` | optional string |
//! | `displayName` | optional string |
//! | `logoData` | byte sequence |
//! | `authenticationURL` | optional string |
//! | `infoURL` | optional string |
//! | `ocraSuite` | optional string |
//!
//! Optional strings carry an `i32` length prefix where `-1` marks absence and any other value is
//! the UTF-8 byte count, so an absent value never collides with an empty one. Byte sequences use
//! the same prefix; a legacy `-1` decodes as an empty logo. The decoded logo image is derived
//! state and never travels on the wire.
//!
//! Lists are framed as a `u32` record count followed by each record behind a `u32` byte length.

mod frame;

// self
use crate::{
	_prelude::*,
	error::{ConfigError, EncodeError, MalformedRecordError},
	obs::{self, CodecOp, CodecSpan, Outcome},
	provider::{IdentityProvider, logo::Logo, record},
};
use frame::{Reader, WIRE_MAX_LEN, Writer};

/// Wire field names used in error reports.
pub mod field {
	/// Storage row id.
	pub const ID: &str = "id";
	/// Stable provider key.
	pub const IDENTIFIER: &str = "identifier";
	/// Human-readable label.
	pub const DISPLAY_NAME: &str = "displayName";
	/// Raw encoded logo.
	pub const LOGO_DATA: &str = "logoData";
	/// Authentication endpoint.
	pub const AUTHENTICATION_URL: &str = "authenticationURL";
	/// Provider information endpoint.
	pub const INFO_URL: &str = "infoURL";
	/// Explicit OCRA suite.
	pub const OCRA_SUITE: &str = "ocraSuite";
	/// List count prefix.
	pub const RECORD_COUNT: &str = "recordCount";
	/// Per-record frame inside a list.
	pub const RECORD: &str = "record";
}

// id plus six length prefixes.
const FIXED_LEN: usize = 8 + 6 * 4;

/// Upper bounds applied while decoding untrusted input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodecLimits {
	max_string_len: usize,
	max_logo_len: usize,
	max_records: usize,
}
impl CodecLimits {
	/// Builds limits after checking each one fits the wire prefixes.
	pub fn new(
		max_string_len: usize,
		max_logo_len: usize,
		max_records: usize,
	) -> Result<Self> {
		let within = |name: &'static str, value: usize, max: usize| -> Result<(), ConfigError> {
			if value > max {
				return Err(ConfigError::LimitOutOfRange { name, value, max });
			}

			Ok(())
		};

		within("max_string_len", max_string_len, WIRE_MAX_LEN)?;
		within("max_logo_len", max_logo_len, WIRE_MAX_LEN)?;
		within("max_records", max_records, u32::MAX as usize)?;

		Ok(Self { max_string_len, max_logo_len, max_records })
	}

	/// Largest accepted string field, in bytes.
	pub fn max_string_len(&self) -> usize {
		self.max_string_len
	}

	/// Largest accepted logo payload, in bytes.
	pub fn max_logo_len(&self) -> usize {
		self.max_logo_len
	}

	/// Largest accepted record count in a list.
	pub fn max_records(&self) -> usize {
		self.max_records
	}
}
impl Default for CodecLimits {
	fn default() -> Self {
		Self {
			max_string_len: WIRE_MAX_LEN,
			max_logo_len: WIRE_MAX_LEN,
			max_records: u32::MAX as usize,
		}
	}
}

/// Serializes one record.
pub fn encode(record: &IdentityProvider) -> Result<Bytes> {
	let _span = CodecSpan::new(CodecOp::Encode).entered();
	let mut writer = Writer::with_capacity(encoded_len_hint(record));
	let result = write_record(&mut writer, record).map(|()| writer.finish());

	finish(CodecOp::Encode, &result, |bytes| bytes.len());

	Ok(result?)
}

/// Deserializes one record using [`CodecLimits::default`].
pub fn decode(input: &[u8]) -> Result<IdentityProvider> {
	decode_with_limits(input, &CodecLimits::default())
}

/// Deserializes one record, rejecting fields above `limits`.
pub fn decode_with_limits(input: &[u8], limits: &CodecLimits) -> Result<IdentityProvider> {
	let _span = CodecSpan::new(CodecOp::Decode).entered();
	let result = read_exact_record(input, limits);

	finish_decode(CodecOp::Decode, &result, input.len());

	Ok(result?)
}

/// Serializes a list of records.
pub fn encode_list(records: &[IdentityProvider]) -> Result<Bytes> {
	let _span = CodecSpan::new(CodecOp::EncodeList).entered();
	let result = write_list(records);

	finish(CodecOp::EncodeList, &result, |bytes| bytes.len());

	Ok(result?)
}

/// Deserializes a list of records using [`CodecLimits::default`].
pub fn decode_list(input: &[u8]) -> Result<Vec<IdentityProvider>> {
	decode_list_with_limits(input, &CodecLimits::default())
}

/// Deserializes a list of records, rejecting counts or fields above `limits`.
pub fn decode_list_with_limits(
	input: &[u8],
	limits: &CodecLimits,
) -> Result<Vec<IdentityProvider>> {
	let _span = CodecSpan::new(CodecOp::DecodeList).entered();
	let result = read_list(input, limits);

	finish_decode(CodecOp::DecodeList, &result, input.len());

	Ok(result?)
}

fn encoded_len_hint(record: &IdentityProvider) -> usize {
	let strings = [
		record.identifier(),
		record.display_name(),
		record.authentication_url(),
		record.info_url(),
		record.explicit_ocra_suite(),
	];

	FIXED_LEN + record.logo_data().len() + strings.iter().flatten().map(|s| s.len()).sum::<usize>()
}

fn write_record(writer: &mut Writer, record: &IdentityProvider) -> Result<(), EncodeError> {
	writer.i64(record.id());
	writer.opt_str(field::IDENTIFIER, record.identifier())?;
	writer.opt_str(field::DISPLAY_NAME, record.display_name())?;
	writer.bytes(field::LOGO_DATA, record.logo_data())?;
	writer.opt_str(field::AUTHENTICATION_URL, record.authentication_url())?;
	writer.opt_str(field::INFO_URL, record.info_url())?;
	writer.opt_str(field::OCRA_SUITE, record.explicit_ocra_suite())
}

fn write_list(records: &[IdentityProvider]) -> Result<Bytes, EncodeError> {
	let count = u32::try_from(records.len())
		.map_err(|_| EncodeError::TooManyRecords { count: records.len() })?;
	let mut writer = Writer::with_capacity(
		4 + records.iter().map(|r| 4 + encoded_len_hint(r)).sum::<usize>(),
	);

	writer.u32(count);

	for record in records {
		let mut inner = Writer::with_capacity(encoded_len_hint(record));

		write_record(&mut inner, record)?;
		writer.frame(field::RECORD, &inner.finish())?;
	}

	Ok(writer.finish())
}

fn read_record(reader: &mut Reader) -> Result<IdentityProvider, MalformedRecordError> {
	let id = reader.i64(field::ID)?;
	let identifier = reader.opt_string(field::IDENTIFIER)?;
	let display_name = reader.opt_string(field::DISPLAY_NAME)?;
	let logo = Logo::new(reader.bytes(field::LOGO_DATA)?);
	let authentication_url = reader.opt_string(field::AUTHENTICATION_URL)?;
	let info_url = reader.opt_string(field::INFO_URL)?;
	let ocra_suite = record::normalize_suite(reader.opt_string(field::OCRA_SUITE)?);

	Ok(IdentityProvider {
		id,
		identifier,
		display_name,
		logo,
		authentication_url,
		info_url,
		ocra_suite,
	})
}

fn read_exact_record(
	input: &[u8],
	limits: &CodecLimits,
) -> Result<IdentityProvider, MalformedRecordError> {
	let mut reader = Reader::new(input, limits);
	let record = read_record(&mut reader)?;

	reader.finish()?;

	Ok(record)
}

fn read_list(
	input: &[u8],
	limits: &CodecLimits,
) -> Result<Vec<IdentityProvider>, MalformedRecordError> {
	let mut reader = Reader::new(input, limits);
	let count = reader.u32(field::RECORD_COUNT)? as usize;

	frame::check_limit(field::RECORD_COUNT, count, limits.max_records())?;

	// Every record needs at least its frame length and fixed fields.
	let mut records = Vec::with_capacity(count.min(reader.remaining() / (4 + FIXED_LEN)));

	for _ in 0..count {
		let len = reader.u32(field::RECORD)? as usize;
		let payload = reader.take(field::RECORD, len)?;

		records.push(read_exact_record(payload, limits)?);
	}

	reader.finish()?;

	Ok(records)
}

fn finish<T>(op: CodecOp, result: &Result<T, EncodeError>, len: impl FnOnce(&T) -> usize) {
	obs::record_codec(op, Outcome::of(result));

	if let Ok(value) = result {
		obs::codec_completed(op, len(value));
	}
}

fn finish_decode<T>(op: CodecOp, result: &Result<T, MalformedRecordError>, len: usize) {
	obs::record_codec(op, Outcome::of(result));

	match result {
		Ok(_) => obs::codec_completed(op, len),
		Err(e) => obs::malformed_input(op, e),
	}
}
