#![cfg(feature = "test")]

// std
use std::thread;
// self
use idp_record::{_preludet::*, IdentityProvider, provider::LogoImage};

#[test]
fn replacing_logo_data_never_serves_a_stale_image() {
	let decoder = CountingDecoder::default();
	let mut record = IdentityProvider::builder().logo_data(b"first-logo".to_vec()).build();
	let first = record.logo_image(&decoder).expect("First logo should decode.");

	assert_eq!(first.pixels(), b"first-logo");

	record.set_logo_data(b"second".to_vec());

	let second = record.logo_image(&decoder).expect("Second logo should decode.");

	assert_eq!(second.pixels(), b"second");
	assert_eq!(second.width(), 6);
	assert_eq!(decoder.calls(), 2);
}

#[test]
fn empty_logo_yields_no_image_without_decoding() {
	let decoder = CountingDecoder::default();
	let mut record = IdentityProvider::builder().logo_data(PNG_LIKE_LOGO.to_vec()).build();

	record.set_logo_data(Vec::new());

	assert!(record.logo_image(&decoder).is_none());
	assert!(IdentityProvider::new().logo_image(&decoder).is_none());
	assert_eq!(decoder.calls(), 0);
}

#[test]
fn decode_failure_is_normalized_and_retried() {
	let decoder = CountingDecoder::default();
	let mut record = IdentityProvider::builder().logo_data(b"BAD-IMAGE".to_vec()).build();

	assert!(record.logo_image(&decoder).is_none());
	assert!(!record.is_logo_cached());
	assert!(record.logo_image(&decoder).is_none());
	assert_eq!(decoder.calls(), 2);

	record.set_logo_data(PNG_LIKE_LOGO.to_vec());

	assert!(record.logo_image(&decoder).is_some());
	assert!(record.is_logo_cached());
	assert_eq!(decoder.calls(), 3);
}

#[test]
fn concurrent_first_reads_publish_one_image() {
	let decoder = CountingDecoder::default();
	let record = IdentityProvider::builder().logo_data(PNG_LIKE_LOGO.to_vec()).build();
	let images: Vec<Arc<LogoImage>> = thread::scope(|scope| {
		let handles: Vec<_> = (0..8)
			.map(|_| scope.spawn(|| record.logo_image(&decoder).expect("Logo should decode.")))
			.collect();

		handles.into_iter().map(|h| h.join().expect("Reader thread should not panic.")).collect()
	});

	assert!(images.iter().all(|image| Arc::ptr_eq(image, &images[0])));
	assert!((1..=8).contains(&decoder.calls()));

	let cached = record.logo_image(&decoder).expect("Cached logo should be served.");

	assert!(Arc::ptr_eq(&cached, &images[0]));
}
