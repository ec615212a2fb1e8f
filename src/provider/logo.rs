//! Logo decoding hook plus the lazily filled, invalidating image cache.

// self
use crate::{_prelude::*, obs};

/// Immutable decoded raster produced by a [`LogoDecoder`].
#[derive(Clone, PartialEq, Eq)]
pub struct LogoImage {
	width: u32,
	height: u32,
	pixels: Bytes,
}
impl LogoImage {
	/// Wraps decoded pixel data with its dimensions.
	pub fn new(width: u32, height: u32, pixels: impl Into<Bytes>) -> Self {
		Self { width, height, pixels: pixels.into() }
	}

	/// Image width in pixels.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Image height in pixels.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// Decoder-defined pixel buffer.
	pub fn pixels(&self) -> &[u8] {
		&self.pixels
	}
}
impl Debug for LogoImage {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("LogoImage")
			.field("width", &self.width)
			.field("height", &self.height)
			.field("pixels", &format_args!("<{} bytes>", self.pixels.len()))
			.finish()
	}
}

/// Failure reported by a [`LogoDecoder`]; never surfaced by the record itself.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("Logo could not be decoded: {reason}.")]
pub struct LogoDecodeError {
	reason: String,
}
impl LogoDecodeError {
	/// Creates an error carrying a decoder-supplied reason.
	pub fn new(reason: impl Into<String>) -> Self {
		Self { reason: reason.into() }
	}

	/// Decoder-supplied reason string.
	pub fn reason(&self) -> &str {
		&self.reason
	}
}

/// Image decoding capability used to materialize logos.
///
/// Implementations must be CPU-bound and free of I/O. A successful decode is cached until the logo
/// bytes change; a failed decode caches nothing, so the next read calls the decoder again.
pub trait LogoDecoder
where
	Self: Send + Sync,
{
	/// Decodes an encoded image (PNG, JPEG, ...) into a raster.
	fn decode(&self, bytes: &[u8]) -> Result<LogoImage, LogoDecodeError>;
}
impl<F> LogoDecoder for F
where
	F: Send + Sync + Fn(&[u8]) -> Result<LogoImage, LogoDecodeError>,
{
	fn decode(&self, bytes: &[u8]) -> Result<LogoImage, LogoDecodeError> {
		self(bytes)
	}
}

/// Raw logo bytes together with their cached decode.
///
/// The cache slot only ever holds a decode of the current bytes: [`Logo::replace`] needs `&mut`
/// access and clears it, while [`Logo::image`] publishes a finished image under the write lock.
#[derive(Default)]
pub(crate) struct Logo {
	data: Bytes,
	cached: RwLock<Option<Arc<LogoImage>>>,
}
impl Logo {
	pub(crate) fn new(data: Bytes) -> Self {
		Self { data, cached: RwLock::new(None) }
	}

	pub(crate) fn data(&self) -> &Bytes {
		&self.data
	}

	pub(crate) fn replace(&mut self, data: Bytes) {
		self.data = data;
		*self.cached.get_mut() = None;
	}

	pub(crate) fn is_cached(&self) -> bool {
		self.cached.read().is_some()
	}

	pub(crate) fn image(&self, decoder: &dyn LogoDecoder) -> Option<Arc<LogoImage>> {
		if let Some(image) = self.cached.read().as_ref() {
			return Some(image.clone());
		}
		if self.data.is_empty() {
			return None;
		}

		// Decode outside the lock; only a finished image is ever published.
		match decoder.decode(&self.data) {
			Ok(image) => {
				obs::record_logo_decode(obs::Outcome::Success);
				obs::logo_cached(image.width(), image.height());

				let mut slot = self.cached.write();

				Some(slot.get_or_insert_with(|| Arc::new(image)).clone())
			},
			Err(e) => {
				obs::record_logo_decode(obs::Outcome::Failure);
				obs::logo_decode_failed(self.data.len(), &e);

				None
			},
		}
	}
}
impl Clone for Logo {
	fn clone(&self) -> Self {
		Self { data: self.data.clone(), cached: RwLock::new(self.cached.read().clone()) }
	}
}
impl Debug for Logo {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Logo")
			.field("data", &format_args!("<{} bytes>", self.data.len()))
			.field("cached", &self.is_cached())
			.finish()
	}
}
