//! Request matching utilities.

mod headers;
mod request;
mod url;

pub use headers::headers_intersects;
pub use request::{method_matches, request_matches};
pub use url::url_matches;
