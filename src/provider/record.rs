//! The identity provider record, its accessors, and its serde representation.

// self
use crate::{
	_prelude::*,
	codec::{self, CodecLimits},
	error::MalformedRecordError,
	provider::{
		DEFAULT_OCRA_SUITE, IdentityProviderBuilder, UNSAVED_ID,
		logo::{Logo, LogoDecoder, LogoImage},
	},
};

/// One authentication service trusted by the authenticator.
///
/// Strings are unvalidated; URL well-formedness is left to the networking layer. The decoded logo
/// is derived from [`IdentityProvider::logo_data`] on demand and is never part of equality,
/// serde output, or the wire format.
#[derive(Clone, Serialize, Deserialize)]
#[serde(from = "IdentityProviderRepr", into = "IdentityProviderRepr")]
pub struct IdentityProvider {
	pub(crate) id: i64,
	pub(crate) identifier: Option<String>,
	pub(crate) display_name: Option<String>,
	pub(crate) logo: Logo,
	pub(crate) authentication_url: Option<String>,
	pub(crate) info_url: Option<String>,
	pub(crate) ocra_suite: Option<String>,
}
impl IdentityProvider {
	/// Creates an empty, never persisted record.
	pub fn new() -> Self {
		Self {
			id: UNSAVED_ID,
			identifier: None,
			display_name: None,
			logo: Logo::default(),
			authentication_url: None,
			info_url: None,
			ocra_suite: None,
		}
	}

	/// Creates a new builder seeded with an empty record.
	pub fn builder() -> IdentityProviderBuilder {
		IdentityProviderBuilder::new()
	}

	/// Storage row id; [`UNSAVED_ID`] until the record is persisted.
	pub fn id(&self) -> i64 {
		self.id
	}

	/// Sets the storage row id. Any value is accepted.
	pub fn set_id(&mut self, id: i64) {
		self.id = id;
	}

	/// Returns `true` once the record carries a row id other than [`UNSAVED_ID`].
	pub fn is_persisted(&self) -> bool {
		self.id != UNSAVED_ID
	}

	/// Stable unique key of the provider.
	pub fn identifier(&self) -> Option<&str> {
		self.identifier.as_deref()
	}

	/// Sets or clears the provider key.
	pub fn set_identifier(&mut self, identifier: Option<String>) {
		self.identifier = identifier;
	}

	/// Human-readable label.
	pub fn display_name(&self) -> Option<&str> {
		self.display_name.as_deref()
	}

	/// Sets or clears the human-readable label.
	pub fn set_display_name(&mut self, display_name: Option<String>) {
		self.display_name = display_name;
	}

	/// Endpoint used to start authentication.
	pub fn authentication_url(&self) -> Option<&str> {
		self.authentication_url.as_deref()
	}

	/// Sets or clears the authentication endpoint.
	pub fn set_authentication_url(&mut self, authentication_url: Option<String>) {
		self.authentication_url = authentication_url;
	}

	/// Endpoint serving human-readable provider information.
	pub fn info_url(&self) -> Option<&str> {
		self.info_url.as_deref()
	}

	/// Sets or clears the information endpoint.
	pub fn set_info_url(&mut self, info_url: Option<String>) {
		self.info_url = info_url;
	}

	/// Raw encoded logo; empty when the provider has none.
	pub fn logo_data(&self) -> &[u8] {
		self.logo.data()
	}

	/// Replaces the raw logo and drops any cached decode of the previous bytes.
	pub fn set_logo_data(&mut self, logo_data: impl Into<Bytes>) {
		self.logo.replace(logo_data.into());
	}

	/// Returns the decoded logo, decoding and caching it on first access.
	///
	/// Empty logo data yields `None` without consulting `decoder`; a decoder failure also yields
	/// `None` and leaves the cache empty so a later call may try again.
	pub fn logo_image(&self, decoder: &dyn LogoDecoder) -> Option<Arc<LogoImage>> {
		self.logo.image(decoder)
	}

	/// Returns `true` while a decoded logo is cached.
	pub fn is_logo_cached(&self) -> bool {
		self.logo.is_cached()
	}

	/// Effective OCRA suite: the explicit override, or [`DEFAULT_OCRA_SUITE`].
	pub fn ocra_suite(&self) -> &str {
		self.ocra_suite.as_deref().unwrap_or(DEFAULT_OCRA_SUITE)
	}

	/// Explicit OCRA suite override, if any.
	pub fn explicit_ocra_suite(&self) -> Option<&str> {
		self.ocra_suite.as_deref()
	}

	/// Stores an explicit OCRA suite; `None` or an empty string restores the default.
	pub fn set_ocra_suite(&mut self, ocra_suite: Option<String>) {
		self.ocra_suite = normalize_suite(ocra_suite);
	}

	/// Serializes the record into the binary wire format.
	pub fn to_bytes(&self) -> Result<Bytes> {
		codec::encode(self)
	}

	/// Reconstructs a record from the binary wire format. The logo cache starts empty.
	pub fn from_bytes(input: &[u8]) -> Result<Self> {
		codec::decode(input)
	}

	/// Like [`IdentityProvider::from_bytes`], rejecting fields above `limits`.
	pub fn from_bytes_with_limits(input: &[u8], limits: &CodecLimits) -> Result<Self> {
		codec::decode_with_limits(input, limits)
	}

	/// Parses the JSON representation, reporting the offending path on failure.
	pub fn from_json_slice(input: &[u8]) -> Result<Self> {
		let de = &mut serde_json::Deserializer::from_slice(input);

		serde_path_to_error::deserialize(de)
			.map_err(|source| Error::from(MalformedRecordError::Json { source }))
	}
}
impl Default for IdentityProvider {
	fn default() -> Self {
		Self::new()
	}
}
impl PartialEq for IdentityProvider {
	fn eq(&self, other: &Self) -> bool {
		self.id == other.id
			&& self.identifier == other.identifier
			&& self.display_name == other.display_name
			&& self.logo.data() == other.logo.data()
			&& self.authentication_url == other.authentication_url
			&& self.info_url == other.info_url
			&& self.ocra_suite == other.ocra_suite
	}
}
impl Eq for IdentityProvider {}
impl Debug for IdentityProvider {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("IdentityProvider")
			.field("id", &self.id)
			.field("identifier", &self.identifier)
			.field("display_name", &self.display_name)
			.field("logo", &self.logo)
			.field("authentication_url", &self.authentication_url)
			.field("info_url", &self.info_url)
			.field("ocra_suite", &self.ocra_suite)
			.finish()
	}
}

pub(crate) fn normalize_suite(ocra_suite: Option<String>) -> Option<String> {
	ocra_suite.filter(|suite| !suite.is_empty())
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityProviderRepr {
	#[serde(default = "unsaved_id")]
	id: i64,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	identifier: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	display_name: Option<String>,
	#[serde(default, with = "logo_base64", skip_serializing_if = "Bytes::is_empty")]
	logo_data: Bytes,
	#[serde(default, rename = "authenticationURL", skip_serializing_if = "Option::is_none")]
	authentication_url: Option<String>,
	#[serde(default, rename = "infoURL", skip_serializing_if = "Option::is_none")]
	info_url: Option<String>,
	#[serde(default, rename = "ocraSuite", skip_serializing_if = "Option::is_none")]
	ocra_suite: Option<String>,
}
impl From<IdentityProviderRepr> for IdentityProvider {
	fn from(repr: IdentityProviderRepr) -> Self {
		Self {
			id: repr.id,
			identifier: repr.identifier,
			display_name: repr.display_name,
			logo: Logo::new(repr.logo_data),
			authentication_url: repr.authentication_url,
			info_url: repr.info_url,
			ocra_suite: normalize_suite(repr.ocra_suite),
		}
	}
}
impl From<IdentityProvider> for IdentityProviderRepr {
	fn from(record: IdentityProvider) -> Self {
		Self {
			id: record.id,
			identifier: record.identifier,
			display_name: record.display_name,
			logo_data: record.logo.data().clone(),
			authentication_url: record.authentication_url,
			info_url: record.info_url,
			ocra_suite: record.ocra_suite,
		}
	}
}

fn unsaved_id() -> i64 {
	UNSAVED_ID
}

mod logo_base64 {
	// crates.io
	use base64::{Engine, engine::general_purpose::STANDARD};
	use serde::{Deserializer, Serializer, de::Error as _};
	// self
	use crate::_prelude::*;

	pub fn serialize<S>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(&STANDARD.encode(bytes))
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Bytes, D::Error>
	where
		D: Deserializer<'de>,
	{
		// A null logo matches the wire format's legacy null array: no logo.
		let Some(encoded) = Option::<String>::deserialize(deserializer)? else {
			return Ok(Bytes::new());
		};

		STANDARD.decode(encoded).map(Bytes::from).map_err(D::Error::custom)
	}
}
