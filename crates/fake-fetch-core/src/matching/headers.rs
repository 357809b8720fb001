//! Headers intersection check (case-insensitive names).

use std::collections::HashMap;

fn normalize_headers(headers: &HashMap<String, String>) -> HashMap<String, &str> {
    headers
        .iter()
        .map(|(k, v)| (k.to_lowercase(), v.as_str()))
        .collect()
}

/// Every header in `subset` must be present in `target` with an equal value.
///
/// Names are compared case-insensitively, values exactly. A missing or empty
/// subset matches any target.
pub fn headers_intersects(
    target: Option<&HashMap<String, String>>,
    subset: Option<&HashMap<String, String>>,
) -> bool {
    let subset = match subset {
        None => return true,
        Some(s) if s.is_empty() => return true,
        Some(s) => s,
    };

    let target = match target {
        None => return false,
        Some(t) => t,
    };

    let target = normalize_headers(target);
    let subset = normalize_headers(subset);

    subset.iter().all(|(k, v)| target.get(k) == Some(v))
}
