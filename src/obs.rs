//! Optional observability helpers for the record codec and logo cache.
//!
//! # Feature Flags
//!
//! - Enable `tracing` to emit structured spans named `idp_record.codec` with the `op` field, debug
//!   events for cache fills, and warnings for malformed input or undecodable logos.
//! - Enable `metrics` to increment the `idp_record_codec_total` counter (labeled by `op` +
//!   `outcome`) and the `idp_record_logo_decode_total` counter (labeled by `outcome`).

mod metrics;
mod tracing;

pub use metrics::*;
pub use tracing::*;

// self
use crate::_prelude::*;

/// Codec operations observed by the crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CodecOp {
	/// Single record serialization.
	Encode,
	/// Single record deserialization.
	Decode,
	/// Record list serialization.
	EncodeList,
	/// Record list deserialization.
	DecodeList,
}
impl CodecOp {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			CodecOp::Encode => "encode",
			CodecOp::Decode => "decode",
			CodecOp::EncodeList => "encode_list",
			CodecOp::DecodeList => "decode_list",
		}
	}
}
impl Display for CodecOp {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outcome labels recorded for each operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
	/// Successful completion.
	Success,
	/// Failure propagated back to the caller (or, for logos, swallowed).
	Failure,
}
impl Outcome {
	/// Returns a stable label suitable for span or metric fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			Outcome::Success => "success",
			Outcome::Failure => "failure",
		}
	}

	/// Maps a result onto its outcome label.
	pub fn of<T, E>(result: &std::result::Result<T, E>) -> Self {
		if result.is_ok() { Outcome::Success } else { Outcome::Failure }
	}
}
impl Display for Outcome {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
