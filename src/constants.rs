// Headers used by Azure storage services.
pub const X_MS_DATE: &str = "x-ms-date";
pub const X_MS_CLIENT_REQUEST_ID: &str = "x-ms-client-request-id";
pub const CONTENT_MD5: &str = "content-md5";

/// Every header with this prefix takes part in the canonicalized headers
/// section of the string to sign, no matter which layer set it.
pub const STORAGE_HEADER_PREFIX: &str = "x-ms-";
