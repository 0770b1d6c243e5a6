use crate::constants::{CONTENT_MD5, STORAGE_HEADER_PREFIX, X_MS_DATE};
use crate::time::{format_http_date, now};
use crate::{Body, CredentialPolicy, Request, Result, SharedKeyCredential, SignRequest};
use http::{header, HeaderMap, HeaderValue};
use log::debug;

#[cfg(test)]
use crate::time::DateTime;

/// Credential policy implementing Shared Key authorization.
pub type SharedKeyCredentialPolicy = CredentialPolicy<SharedKeySigner>;

/// Signer implementing the Shared Key canonicalization and HMAC scheme.
///
/// - [Authorize with Shared Key](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key)
#[derive(Debug)]
pub struct SharedKeySigner {
    credential: SharedKeyCredential,
    #[cfg(test)]
    time: Option<DateTime>,
}

impl SharedKeySigner {
    /// Create a signer backed by `credential`.
    pub fn new(credential: SharedKeyCredential) -> Self {
        Self {
            credential,
            #[cfg(test)]
            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    fn signing_time(&self) -> crate::time::DateTime {
        #[cfg(test)]
        if let Some(t) = self.time {
            return t;
        }
        now()
    }
}

impl SignRequest for SharedKeySigner {
    /// Canonicalize the request and attach a Shared Key signature.
    ///
    /// Deterministic apart from the injected timestamp; performs no I/O.
    /// Each invocation stamps a fresh `x-ms-date`, so a retried attempt
    /// re-entering the chain never reuses a stale signature.
    fn sign(&self, mut req: Request) -> Result<Request> {
        let value: HeaderValue = format_http_date(self.signing_time()).parse()?;
        req.headers.insert(X_MS_DATE, value);

        if let Body::Text(text) = &req.body {
            // Byte length of the UTF-8 encoding. The original client counted
            // characters here, which breaks non-ASCII payloads; the wire
            // protocol counts bytes.
            req.headers
                .insert(header::CONTENT_LENGTH, HeaderValue::from(text.len()));
        }

        let string_to_sign = string_to_sign(&req, self.credential.account_name())?;
        debug!("string to sign: {}", &string_to_sign);

        let signature = self.credential.compute_hmac_sha256(&string_to_sign)?;

        let mut value: HeaderValue =
            format!("SharedKey {}:{}", self.credential.account_name(), signature).parse()?;
        value.set_sensitive(true);
        req.headers.insert(header::AUTHORIZATION, value);

        Ok(req)
    }
}

/// Construct the string to sign.
///
/// ## Format
///
/// ```text
/// VERB + "\n" +
/// Content-Language + "\n" +
/// Content-Encoding + "\n" +
/// Content-Length + "\n" +
/// Content-MD5 + "\n" +
/// Content-Type + "\n" +
/// Date + "\n" +
/// If-Modified-Since + "\n" +
/// If-Match + "\n" +
/// If-None-Match + "\n" +
/// If-Unmodified-Since + "\n" +
/// Range + "\n" +
/// CanonicalizedHeaders +
/// CanonicalizedResource;
/// ```
///
/// Absent headers sign as the empty string.
fn string_to_sign(req: &Request, account_name: &str) -> Result<String> {
    let mut s = String::with_capacity(256);

    s.push_str(&req.method.as_str().to_uppercase());
    s.push('\n');

    for name in [
        header::CONTENT_LANGUAGE.as_str(),
        header::CONTENT_ENCODING.as_str(),
        header::CONTENT_LENGTH.as_str(),
        CONTENT_MD5,
        header::CONTENT_TYPE.as_str(),
        header::DATE.as_str(),
        header::IF_MODIFIED_SINCE.as_str(),
        header::IF_MATCH.as_str(),
        header::IF_NONE_MATCH.as_str(),
        header::IF_UNMODIFIED_SINCE.as_str(),
        header::RANGE.as_str(),
    ] {
        s.push_str(header_value_to_sign(req, name)?);
        s.push('\n');
    }

    s.push_str(&canonicalized_headers(&req.headers)?);
    s.push_str(&canonicalized_resource(req, account_name));

    Ok(s)
}

/// Header value as it enters the string to sign.
///
/// Since service version 2015-02-21 a zero Content-Length signs as the
/// empty string.
fn header_value_to_sign<'a>(req: &'a Request, name: &str) -> Result<&'a str> {
    let value = req.header_get_or_default(name)?;

    if name == header::CONTENT_LENGTH.as_str() && value == "0" {
        return Ok("");
    }

    Ok(value)
}

/// Construct the canonicalized headers section.
///
/// Every header whose name starts with `x-ms-` appears exactly once as
/// `name:value\n`, sorted ascending by lowercased name.
///
/// ## Reference
///
/// - [Constructing the canonicalized headers string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-headers-string)
fn canonicalized_headers(headers: &HeaderMap) -> Result<String> {
    // HeaderMap keeps names lowercased, so case-insensitive matching and
    // one-entry-per-name dedup fall out of iterating distinct keys. For a
    // multi-valued name, the first value wins.
    let mut entries = headers
        .keys()
        .filter(|name| name.as_str().starts_with(STORAGE_HEADER_PREFIX))
        .filter_map(|name| headers.get(name).map(|value| (name.as_str(), value)))
        .collect::<Vec<_>>();
    entries.sort_by_key(|(name, _)| *name);

    let mut s = String::with_capacity(64);
    for (name, value) in entries {
        s.push_str(name.trim_end());
        s.push(':');
        s.push_str(value.to_str()?.trim_start());
        s.push('\n');
    }

    Ok(s)
}

/// Construct the canonicalized resource section: `/` + account name + path,
/// then one `\nkey:value` line per query parameter, values percent-decoded,
/// sorted ascending by key.
///
/// A pure function of the account name and the request URL.
///
/// ## Reference
///
/// - [Constructing the canonicalized resource string](https://docs.microsoft.com/en-us/rest/api/storageservices/authorize-with-shared-key#constructing-the-canonicalized-resource-string)
fn canonicalized_resource(req: &Request, account_name: &str) -> String {
    let mut s = format!("/{}{}", account_name, req.path());

    let mut query = req.query_pairs();
    query.sort();
    for (k, v) in query {
        s.push('\n');
        s.push_str(&k);
        s.push(':');
        s.push_str(&v);
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use http::header::HeaderName;
    use http::Method;
    use pretty_assertions::assert_eq;

    fn test_credential() -> SharedKeyCredential {
        // base64 of b"secret-key"
        SharedKeyCredential::new("myacct", "c2VjcmV0LWtleQ==").unwrap()
    }

    fn test_signer(time: DateTime) -> SharedKeySigner {
        SharedKeySigner::new(test_credential()).with_time(time)
    }

    fn test_time() -> DateTime {
        chrono::Utc.with_ymd_and_hms(2018, 5, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_canonicalized_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ms-meta-foo", "bar".parse().unwrap());
        headers.insert(
            "X-MS-Date".parse::<HeaderName>().unwrap(),
            "Thu, 10 May 2018 12:00:00 GMT".parse().unwrap(),
        );
        headers.insert("x-ms-blob-type", "BlockBlob".parse().unwrap());
        headers.insert("content-type", "text/plain".parse().unwrap());

        assert_eq!(
            canonicalized_headers(&headers).unwrap(),
            "x-ms-blob-type:BlockBlob\n\
             x-ms-date:Thu, 10 May 2018 12:00:00 GMT\n\
             x-ms-meta-foo:bar\n"
        );
    }

    #[test]
    fn test_canonicalized_headers_collapse_case_variants() {
        let mut headers = HeaderMap::new();
        headers.append("x-ms-meta-a", "first".parse().unwrap());
        headers.append(
            "X-MS-META-A".parse::<HeaderName>().unwrap(),
            "second".parse().unwrap(),
        );

        // One entry per distinct name, first value kept.
        assert_eq!(
            canonicalized_headers(&headers).unwrap(),
            "x-ms-meta-a:first\n"
        );
    }

    #[test]
    fn test_canonicalized_headers_trim_value_left() {
        let mut headers = HeaderMap::new();
        headers.insert("x-ms-meta-a", "  padded  ".parse().unwrap());

        assert_eq!(
            canonicalized_headers(&headers).unwrap(),
            "x-ms-meta-a:padded  \n"
        );
    }

    #[test]
    fn test_canonicalized_resource() {
        let req = Request::new(
            Method::GET,
            "https://myacct.blob.core.windows.net/mycontainer?restype=container&comp=list",
        )
        .unwrap();

        assert_eq!(
            canonicalized_resource(&req, "myacct"),
            "/myacct/mycontainer\ncomp:list\nrestype:container"
        );
    }

    #[test]
    fn test_canonicalized_resource_without_query_or_path() {
        let req = Request::new(Method::GET, "https://myacct.blob.core.windows.net").unwrap();
        assert_eq!(canonicalized_resource(&req, "myacct"), "/myacct/");
    }

    #[test]
    fn test_zero_content_length_signs_as_empty() {
        let req = Request::new(Method::PUT, "https://myacct.blob.core.windows.net/c/b")
            .unwrap()
            .with_header("content-length", "0")
            .unwrap();

        let s = string_to_sign(&req, "myacct").unwrap();
        assert_eq!(s, "PUT\n\n\n\n\n\n\n\n\n\n\n\n/myacct/c/b");

        let req = Request::new(Method::PUT, "https://myacct.blob.core.windows.net/c/b")
            .unwrap()
            .with_header("content-length", "11")
            .unwrap();

        let s = string_to_sign(&req, "myacct").unwrap();
        assert_eq!(s, "PUT\n\n\n11\n\n\n\n\n\n\n\n\n/myacct/c/b");
    }

    #[test]
    fn test_sign_get_reference_vector() {
        let signer = test_signer(test_time());

        let req = Request::new(
            Method::GET,
            "https://myacct.blob.core.windows.net/mycontainer?restype=container&comp=list",
        )
        .unwrap()
        .with_header("x-ms-meta-foo", "bar")
        .unwrap()
        .with_header("x-ms-version", "2018-03-28")
        .unwrap();

        let signed = signer.sign(req).unwrap();

        assert_eq!(
            signed.headers.get(X_MS_DATE).unwrap(),
            "Thu, 10 May 2018 12:00:00 GMT"
        );
        // Computed with an independent HMAC-SHA256 implementation over:
        //
        //   GET\n + 11 empty header lines +
        //   x-ms-date:Thu, 10 May 2018 12:00:00 GMT\n
        //   x-ms-meta-foo:bar\n
        //   x-ms-version:2018-03-28\n
        //   /myacct/mycontainer\ncomp:list\nrestype:container
        assert_eq!(
            signed.headers.get(header::AUTHORIZATION).unwrap(),
            "SharedKey myacct:npqV6Ymm0UWXSaZ1sfSk2VKtB5+SX8iqEwjnuLhiQHE="
        );
    }

    #[test]
    fn test_sign_put_text_body_reference_vector() {
        let signer = test_signer(test_time());

        let req = Request::new(
            Method::PUT,
            "https://myacct.blob.core.windows.net/mycontainer/myblob",
        )
        .unwrap()
        .with_body(Body::Text("hello world".to_string()));

        let signed = signer.sign(req).unwrap();

        assert_eq!(signed.headers.get(header::CONTENT_LENGTH).unwrap(), "11");
        assert_eq!(
            signed.headers.get(header::AUTHORIZATION).unwrap(),
            "SharedKey myacct:9BwBWgldnv+Vew1wY+t9QLfNkYFTxADb9YI6TIXyDq0="
        );
    }

    #[test]
    fn test_content_length_uses_byte_length() {
        let signer = test_signer(test_time());

        // Five characters, seven bytes.
        let req = Request::new(
            Method::PUT,
            "https://myacct.blob.core.windows.net/mycontainer/myblob",
        )
        .unwrap()
        .with_body(Body::Text("héllö".to_string()));

        let signed = signer.sign(req).unwrap();
        assert_eq!(signed.headers.get(header::CONTENT_LENGTH).unwrap(), "7");
    }

    #[test]
    fn test_sign_overwrites_preset_date() {
        let signer = test_signer(test_time());

        let req = Request::new(Method::GET, "https://myacct.blob.core.windows.net/c")
            .unwrap()
            .with_header(X_MS_DATE, "Mon, 01 Jan 2001 00:00:00 GMT")
            .unwrap();

        let signed = signer.sign(req).unwrap();
        assert_eq!(
            signed.headers.get(X_MS_DATE).unwrap(),
            "Thu, 10 May 2018 12:00:00 GMT"
        );
    }

    #[test]
    fn test_signatures_change_with_time() {
        let req = Request::new(
            Method::GET,
            "https://myacct.blob.core.windows.net/mycontainer?restype=container&comp=list",
        )
        .unwrap()
        .with_header("x-ms-meta-foo", "bar")
        .unwrap()
        .with_header("x-ms-version", "2018-03-28")
        .unwrap();

        let first = test_signer(test_time()).sign(req.clone()).unwrap();
        let second = test_signer(test_time() + chrono::TimeDelta::try_seconds(5).unwrap())
            .sign(req)
            .unwrap();

        assert_ne!(
            first.headers.get(X_MS_DATE).unwrap(),
            second.headers.get(X_MS_DATE).unwrap()
        );
        assert_ne!(
            first.headers.get(header::AUTHORIZATION).unwrap(),
            second.headers.get(header::AUTHORIZATION).unwrap()
        );
        assert_eq!(
            second.headers.get(header::AUTHORIZATION).unwrap(),
            "SharedKey myacct:R3IxRySe7y7hK9GBoGORBL8uxdd7Lzg4gCs8vXXHkJs="
        );
    }
}
