//! Default security response headers

use axum::{
	http::header::{HeaderName, HeaderValue},
	Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;

/// Headers set on every response unless a handler already set them
const SECURITY_HEADERS: [(&str, &str); 6] = [
	("strict-transport-security", "max-age=31536000; includeSubDomains"),
	("x-content-type-options", "nosniff"),
	("x-frame-options", "DENY"),
	("referrer-policy", "no-referrer"),
	("content-security-policy", "default-src 'self'; frame-ancestors 'none'"),
	("cache-control", "no-store"),
];

/// Apply the default security headers to the provided router
pub fn add_security_headers<S>(router: Router<S>) -> Router<S>
where
	S: Clone + Send + Sync + 'static,
{
	let [hsts, nosniff, frame, referrer, csp, cache] = SECURITY_HEADERS.map(|(name, value)| {
		SetResponseHeaderLayer::if_not_present(
			HeaderName::from_static(name),
			HeaderValue::from_static(value),
		)
	});

	router.layer(
		ServiceBuilder::new()
			.layer(hsts)
			.layer(nosniff)
			.layer(frame)
			.layer(referrer)
			.layer(csp)
			.layer(cache),
	)
}
