//! Identity provider records for challenge-response authenticators—a stable binary wire format,
//! lazily decoded logos, and OCRA suite resolution for legacy servers.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod codec;
pub mod error;
pub mod obs;
pub mod provider;
#[cfg(any(test, feature = "test"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// std
	use std::sync::atomic::{AtomicUsize, Ordering};
	// self
	use crate::provider::{LogoDecodeError, LogoDecoder, LogoImage};

	/// Decoder fixture that counts invocations and treats the input length as the image width.
	///
	/// Inputs starting with `b"BAD"` fail to decode.
	#[derive(Debug, Default)]
	pub struct CountingDecoder {
		calls: AtomicUsize,
	}
	impl CountingDecoder {
		/// Number of times [`LogoDecoder::decode`] ran.
		pub fn calls(&self) -> usize {
			self.calls.load(Ordering::SeqCst)
		}
	}
	impl LogoDecoder for CountingDecoder {
		fn decode(&self, bytes: &[u8]) -> Result<LogoImage, LogoDecodeError> {
			self.calls.fetch_add(1, Ordering::SeqCst);

			if bytes.starts_with(b"BAD") {
				return Err(LogoDecodeError::new("fixture rejects BAD payloads"));
			}

			let width = u32::try_from(bytes.len())
				.map_err(|_| LogoDecodeError::new("fixture payload too large"))?;

			Ok(LogoImage::new(width, 1, bytes.to_vec()))
		}
	}

	/// A ten byte blob carrying the PNG signature, used as a realistic logo payload.
	pub const PNG_LIKE_LOGO: [u8; 10] =
		[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x01];
}

mod _prelude {
	pub use std::{
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		sync::Arc,
	};

	pub use bytes::{Buf, BufMut, Bytes, BytesMut};
	pub use parking_lot::RwLock;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;

	pub use crate::error::{Error, Result};
}

pub use provider::{DEFAULT_OCRA_SUITE, IdentityProvider, UNSAVED_ID};
