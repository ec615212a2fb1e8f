//! Crate-level error types shared by the record codec and its configuration.

// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Serialized input could not be turned back into a record.
	#[error(transparent)]
	Malformed(#[from] MalformedRecordError),
	/// Record cannot be represented on the wire.
	#[error(transparent)]
	Encode(#[from] EncodeError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
}

/// Serialization failures for values the wire framing cannot express.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum EncodeError {
	/// Field exceeds the largest length prefix the wire format carries.
	#[error("Field `{field}` is {length} bytes, too large for the wire length prefix.")]
	FieldTooLarge {
		/// Wire field being written.
		field: &'static str,
		/// Actual length.
		length: usize,
	},
	/// Record list exceeds the largest count prefix the wire format carries.
	#[error("Record list holds {count} entries, too many for the wire count prefix.")]
	TooManyRecords {
		/// Actual number of records.
		count: usize,
	},
}

/// Deserialization failures: truncated input or invalid framing.
#[derive(Debug, ThisError)]
pub enum MalformedRecordError {
	/// Input ended before the field could be read in full.
	#[error("Record is truncated at `{field}`: needed {needed} bytes, {remaining} remaining.")]
	Truncated {
		/// Wire field being read.
		field: &'static str,
		/// Bytes required to finish the field.
		needed: usize,
		/// Bytes left in the input.
		remaining: usize,
	},
	/// Length prefix is negative (other than the absent marker) or otherwise unusable.
	#[error("Field `{field}` carries an invalid length prefix {length}.")]
	InvalidLength {
		/// Wire field being read.
		field: &'static str,
		/// Raw prefix value.
		length: i64,
	},
	/// String payload is not valid UTF-8.
	#[error("Field `{field}` is not valid UTF-8.")]
	InvalidUtf8 {
		/// Wire field being read.
		field: &'static str,
		/// Underlying conversion failure.
		#[source]
		source: std::string::FromUtf8Error,
	},
	/// Field length exceeds the configured codec limit.
	#[error("Field `{field}` is {length} bytes, exceeding the {limit} byte limit.")]
	FieldTooLarge {
		/// Wire field being read.
		field: &'static str,
		/// Declared length.
		length: usize,
		/// Configured ceiling.
		limit: usize,
	},
	/// Bytes remain after the last field.
	#[error("Record is followed by {remaining} unexpected trailing bytes.")]
	TrailingBytes {
		/// Number of leftover bytes.
		remaining: usize,
	},
	/// JSON representation could not be parsed.
	#[error("Record JSON is malformed.")]
	Json {
		/// Structured parsing failure including the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}
impl MalformedRecordError {
	/// Wire field name the failure points at, when the failure is tied to one.
	pub fn field(&self) -> Option<&'static str> {
		match self {
			Self::Truncated { field, .. }
			| Self::InvalidLength { field, .. }
			| Self::InvalidUtf8 { field, .. }
			| Self::FieldTooLarge { field, .. } => Some(*field),
			Self::TrailingBytes { .. } | Self::Json { .. } => None,
		}
	}
}

/// Configuration and validation failures.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ConfigError {
	/// A codec limit cannot be represented by the wire length prefix.
	#[error("Codec limit `{name}` is {value}, above the wire maximum of {max}.")]
	LimitOutOfRange {
		/// Limit name.
		name: &'static str,
		/// Requested value.
		value: usize,
		/// Largest representable value.
		max: usize,
	},
}
