// self
use crate::obs::{CodecOp, Outcome};

/// Records a codec outcome via the global metrics recorder (when enabled).
pub fn record_codec(op: CodecOp, outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!(
			"idp_record_codec_total",
			"op" => op.as_str(),
			"outcome" => outcome.as_str()
		)
		.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = (op, outcome);
	}
}

/// Records a logo decode attempt via the global metrics recorder (when enabled).
pub fn record_logo_decode(outcome: Outcome) {
	#[cfg(feature = "metrics")]
	{
		metrics::counter!("idp_record_logo_decode_total", "outcome" => outcome.as_str())
			.increment(1);
	}

	#[cfg(not(feature = "metrics"))]
	{
		let _ = outcome;
	}
}
