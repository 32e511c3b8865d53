use std::collections::HashMap;
use std::time::Duration;

/// Reads a numeric `Retry-After` header so rate-limit errors can carry the vendor hint.
///
/// Nothing in this crate waits on the value; it is surfaced to the caller as-is.
pub(crate) fn retry_after_from_headers(headers: &HashMap<String, String>) -> Option<Duration> {
    let (_, value) = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("retry-after"))?;
    value.trim().parse::<u64>().ok().map(Duration::from_secs)
}
