//! Hash related utils.

use crate::Error;
use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use sha2::Sha256;

/// Base64 encode.
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Base64 decode.
pub fn base64_decode(content: &str) -> crate::Result<Vec<u8>> {
    BASE64_STANDARD
        .decode(content)
        .map_err(|e| Error::config_invalid("base64 decode failed").with_source(e))
}

/// Base64 encoded HMAC with SHA256 hash.
///
/// A failure of the HMAC primitive is fatal for the signing attempt and
/// surfaces as [`ErrorKind::SigningFailed`](crate::ErrorKind::SigningFailed).
pub fn base64_hmac_sha256(key: &[u8], content: &[u8]) -> crate::Result<String> {
    let mut h = Hmac::<Sha256>::new_from_slice(key)
        .map_err(|e| Error::signing_failed("hmac rejected signing key").with_source(e))?;
    h.update(content);

    Ok(base64_encode(&h.finalize().into_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base64_round_trip() {
        assert_eq!(base64_encode(b"secret-key"), "c2VjcmV0LWtleQ==");
        assert_eq!(base64_decode("c2VjcmV0LWtleQ==").unwrap(), b"secret-key");
    }

    #[test]
    fn test_base64_decode_malformed() {
        let err = base64_decode("not base64!!").unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_base64_hmac_sha256_rfc4231() {
        // RFC 4231 test case 2.
        let sig = base64_hmac_sha256(b"Jefe", b"what do ya want for nothing?").unwrap();
        assert_eq!(sig, "W9zBRr9gdU5qBCQmCJV1x1oAPwidJzmDnexYuWTsOEM=");
    }
}
