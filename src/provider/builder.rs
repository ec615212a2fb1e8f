// self
use crate::{
	_prelude::*,
	provider::{IdentityProvider, record},
};

/// Builder for [`IdentityProvider`] values.
#[derive(Debug, Default)]
pub struct IdentityProviderBuilder {
	record: IdentityProvider,
}
impl IdentityProviderBuilder {
	/// Creates a builder seeded with an empty, never persisted record.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the storage row id.
	pub fn id(mut self, id: i64) -> Self {
		self.record.id = id;

		self
	}

	/// Sets the provider key.
	pub fn identifier(mut self, identifier: impl Into<String>) -> Self {
		self.record.identifier = Some(identifier.into());

		self
	}

	/// Sets the human-readable label.
	pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
		self.record.display_name = Some(display_name.into());

		self
	}

	/// Sets the raw encoded logo.
	pub fn logo_data(mut self, logo_data: impl Into<Bytes>) -> Self {
		self.record.set_logo_data(logo_data);

		self
	}

	/// Sets the authentication endpoint.
	pub fn authentication_url(mut self, authentication_url: impl Into<String>) -> Self {
		self.record.authentication_url = Some(authentication_url.into());

		self
	}

	/// Sets the information endpoint.
	pub fn info_url(mut self, info_url: impl Into<String>) -> Self {
		self.record.info_url = Some(info_url.into());

		self
	}

	/// Sets an explicit OCRA suite; an empty string keeps the default.
	pub fn ocra_suite(mut self, ocra_suite: impl Into<String>) -> Self {
		self.record.ocra_suite = record::normalize_suite(Some(ocra_suite.into()));

		self
	}

	/// Consumes the builder and produces the record.
	pub fn build(self) -> IdentityProvider {
		self.record
	}
}
