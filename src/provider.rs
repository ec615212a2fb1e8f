//! Identity provider records (data) and the logo decoding capability (behavior).
//!
//! `record` exposes [`IdentityProvider`], the serializable description of one trusted
//! authentication service, including OCRA suite resolution for servers that never announce one.
//! `logo` defines [`LogoDecoder`], the opaque image-decoding hook, and the invalidating cache that
//! materializes a [`LogoImage`] from raw bytes on first access.

/// Builder API for assembling records.
pub mod builder;
/// Logo decoding hook and cache.
pub mod logo;
/// The record type and its accessors.
pub mod record;

pub use builder::*;
pub use logo::*;
pub use record::*;

/// Suite assumed for servers that do not specify one; compatible with legacy deployments that only
/// speak SHA-1 HOTP with a ten digit numeric challenge.
pub const DEFAULT_OCRA_SUITE: &str = "OCRA-1:HOTP-SHA1-6:QN10";

/// Row id carried by records that have never been persisted.
pub const UNSAVED_ID: i64 = -1;
