#![cfg(feature = "test")]

// self
use idp_record::{
	_preludet::*,
	DEFAULT_OCRA_SUITE, IdentityProvider, UNSAVED_ID,
	codec::{self, CodecLimits},
	error::MalformedRecordError,
};

fn fully_populated() -> IdentityProvider {
	IdentityProvider::builder()
		.id(1_024)
		.identifier("idp2")
		.display_name("Fully Populated IdP")
		.logo_data(PNG_LIKE_LOGO.to_vec())
		.authentication_url("https://idp2.example/auth")
		.info_url("https://idp2.example/info")
		.ocra_suite("OCRA-1:HOTP-SHA256-8:QN08-PSHA1")
		.build()
}

#[test]
fn example_provider_survives_the_wire_with_default_suite() {
	let mut record = IdentityProvider::new();

	record.set_identifier(Some("idp1".into()));
	record.set_display_name(Some("Example IdP".into()));
	record.set_logo_data(PNG_LIKE_LOGO.to_vec());
	record.set_authentication_url(Some("https://idp.example/auth".into()));

	let bytes = record.to_bytes().expect("Example record should encode.");
	let decoded = IdentityProvider::from_bytes(&bytes).expect("Example record should decode.");

	assert_eq!(decoded, record);
	assert_eq!(decoded.id(), UNSAVED_ID);
	assert_eq!(decoded.identifier(), Some("idp1"));
	assert_eq!(decoded.display_name(), Some("Example IdP"));
	assert_eq!(decoded.logo_data(), &PNG_LIKE_LOGO);
	assert_eq!(decoded.authentication_url(), Some("https://idp.example/auth"));
	assert_eq!(decoded.info_url(), None);
	assert_eq!(decoded.explicit_ocra_suite(), None);
	assert_eq!(decoded.ocra_suite(), DEFAULT_OCRA_SUITE);
}

#[test]
fn unset_and_fully_set_records_round_trip() {
	for record in [IdentityProvider::new(), fully_populated()] {
		let bytes = codec::encode(&record).expect("Record should encode.");

		assert_eq!(codec::decode(&bytes).expect("Record should decode."), record);
	}
}

#[test]
fn empty_strings_stay_distinct_from_unset() {
	let mut record = IdentityProvider::new();

	record.set_identifier(Some(String::new()));
	record.set_info_url(Some(String::new()));

	let decoded = IdentityProvider::from_bytes(&record.to_bytes().expect("Record should encode."))
		.expect("Record should decode.");

	assert_eq!(decoded.identifier(), Some(""));
	assert_eq!(decoded.display_name(), None);
	assert_eq!(decoded.info_url(), Some(""));
}

#[test]
fn decoded_records_start_without_a_cached_logo() {
	let decoder = CountingDecoder::default();
	let record = fully_populated();

	record.logo_image(&decoder).expect("Fixture logo should decode.");

	assert!(record.is_logo_cached());

	let decoded = IdentityProvider::from_bytes(&record.to_bytes().expect("Record should encode."))
		.expect("Record should decode.");

	assert!(!decoded.is_logo_cached());
	assert!(decoded.logo_image(&decoder).is_some());
	assert_eq!(decoder.calls(), 2);
}

#[test]
fn legacy_null_logo_and_empty_suite_decode_to_defaults() {
	let mut input = 5_i64.to_be_bytes().to_vec();

	// identifier "a", displayName absent, logo null, URLs absent, ocraSuite "".
	input.extend_from_slice(&1_i32.to_be_bytes());
	input.push(b'a');

	for prefix in [-1_i32, -1, -1, -1, 0] {
		input.extend_from_slice(&prefix.to_be_bytes());
	}

	let decoded = IdentityProvider::from_bytes(&input).expect("Legacy input should decode.");

	assert_eq!(decoded.id(), 5);
	assert!(decoded.is_persisted());
	assert_eq!(decoded.identifier(), Some("a"));
	assert!(decoded.logo_data().is_empty());
	assert_eq!(decoded.ocra_suite(), DEFAULT_OCRA_SUITE);
}

#[test]
fn truncated_input_is_malformed() {
	let bytes = fully_populated().to_bytes().expect("Record should encode.");
	let err = IdentityProvider::from_bytes(&bytes[..bytes.len() - 1])
		.expect_err("Truncated input must fail.");

	match err {
		Error::Malformed(malformed) => {
			assert!(matches!(
				malformed,
				MalformedRecordError::Truncated { field: "ocraSuite", .. }
			));
			assert_eq!(malformed.field(), Some("ocraSuite"));
		},
		other => panic!("Unexpected error: {other:?}."),
	}
}

#[test]
fn oversized_strings_respect_limits() {
	let bytes = fully_populated().to_bytes().expect("Record should encode.");
	let limits = CodecLimits::new(8, 1_024, 1).expect("Limits should be valid.");
	let err = IdentityProvider::from_bytes_with_limits(&bytes, &limits)
		.expect_err("Display name above the limit must fail.");

	assert!(matches!(
		err,
		Error::Malformed(MalformedRecordError::FieldTooLarge {
			field: "displayName",
			length: 19,
			limit: 8,
		})
	));
}

#[test]
fn record_lists_round_trip() {
	let records = vec![fully_populated(), IdentityProvider::new(), fully_populated()];
	let bytes = codec::encode_list(&records).expect("Record list should encode.");

	assert_eq!(codec::decode_list(&bytes).expect("Record list should decode."), records);
	assert!(codec::decode_list(&[]).is_err());
	assert_eq!(
		codec::decode_list(&0_u32.to_be_bytes()).expect("Empty list should decode."),
		Vec::<IdentityProvider>::new()
	);
}

#[test]
fn codec_errors_surface_through_the_crate_error() {
	let err = codec::decode(&[0; 4]).expect_err("Four bytes cannot hold a record.");

	assert!(matches!(
		err,
		Error::Malformed(MalformedRecordError::Truncated { field: "id", needed: 8, remaining: 4 })
	));
	assert!(matches!(CodecLimits::new(usize::MAX, 0, 0), Err(Error::Config(_))));
}

#[test]
fn json_null_logo_matches_legacy_wire_null() {
	let parsed = IdentityProvider::from_json_slice(br#"{"id":5,"identifier":"a","logoData":null}"#)
		.expect("A null logo should parse.");
	let mut input = 5_i64.to_be_bytes().to_vec();

	input.extend_from_slice(&1_i32.to_be_bytes());
	input.push(b'a');

	for prefix in [-1_i32; 5] {
		input.extend_from_slice(&prefix.to_be_bytes());
	}

	let decoded = IdentityProvider::from_bytes(&input).expect("Legacy input should decode.");

	assert_eq!(parsed, decoded);
	assert!(parsed.logo_data().is_empty());
}

#[test]
fn json_round_trip_matches_binary_round_trip() {
	let record = fully_populated();
	let json = serde_json::to_vec(&record).expect("Record should serialize to JSON.");
	let parsed = IdentityProvider::from_json_slice(&json).expect("Record JSON should parse.");

	assert_eq!(parsed, record);
	assert_eq!(
		IdentityProvider::from_json_slice(b"{}").expect("Empty object should parse."),
		IdentityProvider::new()
	);
}
