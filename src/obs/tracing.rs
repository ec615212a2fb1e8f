// self
use crate::{_prelude::*, error::MalformedRecordError, obs::CodecOp, provider::LogoDecodeError};

/// A span builder used around codec operations.
#[derive(Clone, Debug)]
pub struct CodecSpan {
	#[cfg(feature = "tracing")]
	span: tracing::Span,
}
impl CodecSpan {
	/// Creates a new span tagged with the provided codec operation.
	pub fn new(op: CodecOp) -> Self {
		#[cfg(feature = "tracing")]
		{
			let span = tracing::debug_span!("idp_record.codec", op = op.as_str());

			Self { span }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = op;

			Self {}
		}
	}

	/// Enters the span for the duration of the returned guard.
	pub fn entered(self) -> CodecSpanGuard {
		#[cfg(feature = "tracing")]
		{
			CodecSpanGuard { guard: self.span.entered() }
		}
		#[cfg(not(feature = "tracing"))]
		{
			let _ = self;

			CodecSpanGuard {}
		}
	}
}

/// RAII guard returned by [`CodecSpan::entered`].
pub struct CodecSpanGuard {
	#[cfg(feature = "tracing")]
	#[allow(dead_code)]
	guard: tracing::span::EnteredSpan,
}
impl Debug for CodecSpanGuard {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("CodecSpanGuard(..)")
	}
}

/// Reports input the decoder rejected.
pub fn malformed_input(op: CodecOp, error: &MalformedRecordError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(
			target: "idp_record",
			op = op.as_str(),
			field = error.field(),
			error = %error,
			"rejected malformed record input"
		);
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (op, error);
	}
}

/// Reports a finished codec operation and the number of bytes it produced or consumed.
pub fn codec_completed(op: CodecOp, len: usize) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(target: "idp_record", op = op.as_str(), len, "codec operation completed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (op, len);
	}
}

/// Reports a logo decode that failed and was normalized to "no image".
pub fn logo_decode_failed(len: usize, error: &LogoDecodeError) {
	#[cfg(feature = "tracing")]
	{
		tracing::warn!(target: "idp_record", len, error = %error, "logo decode failed");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (len, error);
	}
}

/// Reports a logo decode that populated the cache.
pub fn logo_cached(width: u32, height: u32) {
	#[cfg(feature = "tracing")]
	{
		tracing::debug!(target: "idp_record", width, height, "logo decoded and cached");
	}
	#[cfg(not(feature = "tracing"))]
	{
		let _ = (width, height);
	}
}
