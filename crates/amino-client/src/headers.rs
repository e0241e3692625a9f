//! Request headers and signing
//!
//! Every REST call carries the device id, the emulated app's user agent and,
//! once logged in, the session id. Requests with a body may also carry a
//! signature computed over the exact serialized body bytes plus the device id.

use crate::session::AuthSnapshot;
use base64::prelude::*;
use hmac::{Hmac, Mac};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

type HmacSha1 = Hmac<sha1::Sha1>;

/// Device id header
pub const DEVICE_ID_HEADER: &str = "NDCDEVICEID";
/// Session header, `sid=<sid>`
pub const AUTH_HEADER: &str = "NDCAUTH";
/// Body signature header
pub const SIGNATURE_HEADER: &str = "NDC-MSG-SIG";
/// Content type used for JSON bodies
pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Format a session id the way the service expects it in `NDCAUTH`
pub fn auth_header(sid: &str) -> String {
    format!("sid={}", sid)
}

/// Computes the `NDC-MSG-SIG` value for a request body
#[cfg_attr(test, mockall::automock)]
pub trait RequestSigner: Send + Sync + fmt::Debug {
    /// Sign the serialized body for the given device
    fn sign(&self, body: &[u8], device_id: &str) -> String;
}

/// HMAC-SHA1 body signer
///
/// The signature is `base64(prefix ‖ HMAC-SHA1(key, body ‖ device_id))`,
/// where the prefix byte is optional. No key ships with this crate.
#[derive(Clone)]
pub struct HmacSigner {
    mac: HmacSha1,
    prefix: Option<u8>,
}

impl HmacSigner {
    /// Create a signer from a raw key
    pub fn new(key: &[u8]) -> Result<Self, hmac::digest::InvalidLength> {
        Ok(Self {
            mac: HmacSha1::new_from_slice(key)?,
            prefix: None,
        })
    }

    /// Prepend a version byte to every signature
    pub fn with_prefix(mut self, prefix: u8) -> Self {
        self.prefix = Some(prefix);
        self
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

impl RequestSigner for HmacSigner {
    fn sign(&self, body: &[u8], device_id: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(body);
        mac.update(device_id.as_bytes());
        let digest = mac.finalize().into_bytes();

        let mut out = Vec::with_capacity(digest.len() + 1);
        out.extend(self.prefix);
        out.extend_from_slice(&digest);
        BASE64_STANDARD.encode(out)
    }
}

/// Builds the header set for one request
#[derive(Debug, Clone)]
pub struct HeaderBuilder {
    user_agent: String,
    language: String,
    signer: Option<Arc<dyn RequestSigner>>,
}

impl HeaderBuilder {
    /// Create a builder for a device's user agent
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            language: "en-US".to_string(),
            signer: None,
        }
    }

    /// Set the `Accept-Language` value
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Sign request bodies with the given signer
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build headers for a request.
    ///
    /// `content_type` overrides the JSON default, e.g. for media uploads.
    pub fn build(
        &self,
        auth: &AuthSnapshot,
        body: Option<&[u8]>,
        content_type: Option<&str>,
    ) -> HashMap<String, String> {
        let mut headers = HashMap::new();
        headers.insert(DEVICE_ID_HEADER.to_string(), auth.device_id.clone());
        headers.insert("Accept-Language".to_string(), self.language.clone());
        headers.insert(
            "Content-Type".to_string(),
            content_type.unwrap_or(JSON_CONTENT_TYPE).to_string(),
        );
        headers.insert("User-Agent".to_string(), self.user_agent.clone());

        if let Some(sid) = &auth.sid {
            headers.insert(AUTH_HEADER.to_string(), auth_header(sid));
        }

        if let (Some(body), Some(signer)) = (body, &self.signer) {
            headers.insert(
                SIGNATURE_HEADER.to_string(),
                signer.sign(body, &auth.device_id),
            );
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(sid: Option<&str>) -> AuthSnapshot {
        AuthSnapshot {
            device_id: "DEVICE".to_string(),
            sid: sid.map(str::to_string),
        }
    }

    #[test]
    fn test_headers_logged_out() {
        let builder = HeaderBuilder::new("agent/1.0");
        let headers = builder.build(&snapshot(None), None, None);

        assert_eq!(headers.get(DEVICE_ID_HEADER).map(String::as_str), Some("DEVICE"));
        assert_eq!(headers.get("Accept-Language").map(String::as_str), Some("en-US"));
        assert_eq!(headers.get("Content-Type").map(String::as_str), Some(JSON_CONTENT_TYPE));
        assert_eq!(headers.get("User-Agent").map(String::as_str), Some("agent/1.0"));
        assert!(!headers.contains_key(AUTH_HEADER));
        assert!(!headers.contains_key(SIGNATURE_HEADER));
    }

    #[test]
    fn test_headers_logged_in() {
        let builder = HeaderBuilder::new("agent/1.0");
        let headers = builder.build(&snapshot(Some("abc")), None, Some("image/jpg"));

        assert_eq!(headers.get(AUTH_HEADER).map(String::as_str), Some("sid=abc"));
        assert_eq!(headers.get("Content-Type").map(String::as_str), Some("image/jpg"));
    }

    #[test]
    fn test_signature_uses_body_and_device() {
        let mut signer = MockRequestSigner::new();
        signer
            .expect_sign()
            .withf(|body, device| body == b"{\"a\":1}" && device == "DEVICE")
            .times(1)
            .returning(|_, _| "SIG".to_string());

        let builder = HeaderBuilder::new("agent").with_signer(Arc::new(signer));
        let headers = builder.build(&snapshot(None), Some(b"{\"a\":1}"), None);
        assert_eq!(headers.get(SIGNATURE_HEADER).map(String::as_str), Some("SIG"));
    }

    #[test]
    fn test_no_signature_without_body() {
        let mut signer = MockRequestSigner::new();
        signer.expect_sign().times(0);

        let builder = HeaderBuilder::new("agent").with_signer(Arc::new(signer));
        let headers = builder.build(&snapshot(Some("abc")), None, None);
        assert!(!headers.contains_key(SIGNATURE_HEADER));
    }

    #[test]
    fn test_hmac_signer_is_deterministic() {
        let signer = HmacSigner::new(b"secret").unwrap();
        let a = signer.sign(b"body", "DEVICE");
        let b = signer.sign(b"body", "DEVICE");
        let c = signer.sign(b"body", "OTHER");
        assert_eq!(a, b);
        assert_ne!(a, c);

        let decoded = BASE64_STANDARD.decode(&a).unwrap();
        assert_eq!(decoded.len(), 20);
    }

    #[test]
    fn test_hmac_signer_prefix() {
        let signer = HmacSigner::new(b"secret").unwrap().with_prefix(0x42);
        let plain = HmacSigner::new(b"secret").unwrap();

        let prefixed = BASE64_STANDARD.decode(signer.sign(b"body", "D")).unwrap();
        let unprefixed = BASE64_STANDARD.decode(plain.sign(b"body", "D")).unwrap();
        assert_eq!(prefixed.len(), 21);
        assert_eq!(prefixed[0], 0x42);
        assert_eq!(&prefixed[1..], &unprefixed[..]);
    }

    #[test]
    fn test_hmac_signer_debug_hides_key() {
        let signer = HmacSigner::new(b"very-secret").unwrap();
        let debug = format!("{:?}", signer);
        assert!(!debug.contains("very-secret"));
    }
}
