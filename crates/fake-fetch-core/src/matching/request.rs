//! Matching an incoming request against a rule's declared request.

use crate::matching::headers::headers_intersects;
use crate::matching::url::url_matches;
use crate::types::request::{HttpMethod, Request, RequestPattern};

/// A declared method must equal the incoming one; no declared method accepts any.
///
/// An incoming request without a method is a `GET`.
pub fn method_matches(declared: Option<HttpMethod>, incoming: Option<HttpMethod>) -> bool {
    match declared {
        None => true,
        Some(method) => incoming.unwrap_or(HttpMethod::Get) == method,
    }
}

/// Check if `incoming` satisfies `pattern`.
///
/// A plain URL pattern only compares URLs. A descriptor also compares every
/// attribute it declares: method and headers. The declared body is payload for
/// response producers and never takes part in matching.
pub fn request_matches(incoming: &Request, pattern: &RequestPattern) -> bool {
    match pattern {
        RequestPattern::Url(url) => url_matches(url, &incoming.url),
        RequestPattern::Descriptor(declared) => {
            url_matches(&declared.url, &incoming.url)
                && method_matches(declared.method, incoming.method)
                && headers_intersects(incoming.headers.as_ref(), declared.headers.as_ref())
        }
    }
}
