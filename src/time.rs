//! Time related utils.

/// UTC timestamp used across this crate.
pub type DateTime = chrono::DateTime<chrono::Utc>;

/// Get the current UTC time.
pub fn now() -> DateTime {
    chrono::Utc::now()
}

/// Format a timestamp in RFC 1123 style, as used by the `date` and
/// `x-ms-date` headers.
///
/// ```text
/// Thu, 10 May 2018 12:00:00 GMT
/// ```
pub fn format_http_date(t: DateTime) -> String {
    t.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
