use crate::{Error, Result};
use bytes::Bytes;
use http::header::{AsHeaderName, HeaderName};
use http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};

/// Request body.
///
/// Signing never reads body bytes; the body only matters for the
/// content-length rule of the shared key algorithm.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    /// No body.
    #[default]
    Empty,
    /// Textual body, carried as UTF-8.
    Text(String),
    /// Binary body.
    Bytes(Bytes),
}

/// An outgoing HTTP request as seen by the signing pipeline.
///
/// Header lookup is case-insensitive by construction ([`HeaderMap`] keeps
/// names lowercased); serialization order is controlled by the signing
/// algorithm, never by insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URL.
    pub url: Uri,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// Optional request body.
    pub body: Body,
}

impl Request {
    /// Create a new request for the given method and absolute URL.
    ///
    /// The URL must carry a scheme and an authority. A relative or
    /// unparseable URL is a fatal configuration error, raised here rather
    /// than silently defaulted at signing time.
    pub fn new(method: Method, url: &str) -> Result<Self> {
        let url: Uri = url.parse()?;
        if url.scheme().is_none() || url.authority().is_none() {
            return Err(Error::config_invalid(format!(
                "request url must be absolute: {url}"
            )));
        }

        Ok(Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: Body::Empty,
        })
    }

    /// Set a header, replacing any previous value under the same name.
    ///
    /// The name may use any letter case; it is normalized on insert.
    pub fn with_header(mut self, name: &str, value: &str) -> Result<Self> {
        let name: HeaderName = name.parse()?;
        let value: HeaderValue = value
            .parse()
            .map_err(|e| Error::request_invalid("invalid header value").with_source(e))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Set the request body.
    pub fn with_body(mut self, body: Body) -> Self {
        self.body = body;
        self
    }

    /// Get a header value as a string, or the empty string when absent.
    pub fn header_get_or_default(&self, name: impl AsHeaderName) -> Result<&str> {
        match self.headers.get(name) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(""),
        }
    }

    /// URL path, `/` when the URL has none.
    pub fn path(&self) -> &str {
        let path = self.url.path();
        if path.is_empty() {
            "/"
        } else {
            path
        }
    }

    /// Query parameters, percent-decoded, in URL order.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query()
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .map(|(k, v)| (k.into_owned(), v.into_owned()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// The response handed back by the transport terminal.
///
/// It flows back unchanged through the policy chain; this layer never
/// interprets it.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl Response {
    /// Create a response with the given status and no headers or body.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }
}
