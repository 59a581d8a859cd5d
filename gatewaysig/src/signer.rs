use crate::{
  digest::{HmacDigest, SignatureDigest},
  error::GatewaySigResult,
  key::Key,
  signature_base::SignatureBase,
  trace::*,
};
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, FixedOffset, Utc};
use http::request::Parts;
use http::HeaderValue;
use md5::{Digest as _, Md5};
use uuid::Uuid;

/* -------------------------------- */
/// x-ca-key header name
pub const X_CA_KEY: &str = "x-ca-key";
/// x-ca-nonce header name
pub const X_CA_NONCE: &str = "x-ca-nonce";
/// x-ca-signature header name
pub const X_CA_SIGNATURE: &str = "x-ca-signature";
/// x-ca-signature-headers header name
pub const X_CA_SIGNATURE_HEADERS: &str = "x-ca-signature-headers";
/// x-ca-signature-method header name
pub const X_CA_SIGNATURE_METHOD: &str = "x-ca-signature-method";
/// x-ca-stage header name, set by the caller when targeting a non-release stage
pub const X_CA_STAGE: &str = "x-ca-stage";
/// x-ca-timestamp header name
pub const X_CA_TIMESTAMP: &str = "x-ca-timestamp";
/// content-md5 header name, not predefined by the http crate
pub const CONTENT_MD5: &str = "content-md5";

/* -------------------------------- */
/// Signer producing the x-ca header set authenticating a request against the gateway.
///
/// Each signing call is a pure function of the request snapshot, the key, the
/// digest, the timestamp, the nonce, and the configured signature-header-name
/// list. The list is signer configuration, not per-request state: changing it
/// requires `&mut self`, so keep one signer instance per distinct
/// configuration when signing concurrently.
pub struct RequestSigner {
  key: Key,
  digest: Box<dyn SignatureDigest + Send + Sync>,
  signature_headers: Vec<String>,
}

impl RequestSigner {
  /// Create a new signer with the default HmacSHA256 digest
  pub fn new(key: Key) -> Self {
    Self::with_digest(key, HmacDigest::Sha256)
  }

  /// Create a new signer with a custom digest implementation
  pub fn with_digest(key: Key, digest: impl SignatureDigest + Send + Sync + 'static) -> Self {
    Self {
      key,
      digest: Box::new(digest),
      signature_headers: vec![
        X_CA_KEY.to_string(),
        X_CA_NONCE.to_string(),
        X_CA_SIGNATURE_METHOD.to_string(),
        X_CA_TIMESTAMP.to_string(),
        X_CA_STAGE.to_string(),
      ],
    }
  }

  /// Replace the signature-header-name list applied to all subsequent calls.
  /// Names are matched case-insensitively; only names present on the request
  /// are folded into the signature base.
  pub fn set_signature_headers<I, S>(&mut self, names: I)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.signature_headers = names.into_iter().map(Into::into).collect();
  }

  /// Append one name to the signature-header-name list
  pub fn add_signature_header(&mut self, name: impl Into<String>) {
    self.signature_headers.push(name.into());
  }

  /// Sign a request with an in-memory body, returning it with the full x-ca
  /// header set applied.
  ///
  /// `date` falls back to the current time and is normalized to UTC before
  /// formatting; `nonce` falls back to a fresh v4 uuid, unique per call.
  pub fn sign_request<B>(
    &self,
    req: http::Request<B>,
    date: Option<DateTime<FixedOffset>>,
    nonce: Option<&str>,
  ) -> GatewaySigResult<http::Request<B>>
  where
    B: AsRef<[u8]>,
  {
    let (mut parts, body) = req.into_parts();
    self.sign_parts(&mut parts, body.as_ref(), date, nonce)?;
    Ok(http::Request::from_parts(parts, body))
  }

  /// Sign request parts against the given body bytes, injecting every
  /// produced header in place. Lower-level entry point for adapters that
  /// resolve the body themselves.
  pub fn sign_parts(
    &self,
    parts: &mut Parts,
    body: &[u8],
    date: Option<DateTime<FixedOffset>>,
    nonce: Option<&str>,
  ) -> GatewaySigResult<()> {
    let nonce = nonce.map(ToString::to_string).unwrap_or_else(|| Uuid::new_v4().to_string());
    let date = date.map(|d| d.with_timezone(&Utc)).unwrap_or_else(Utc::now);
    let time_string = format_http_date(&date);

    let content_md5 = if body.is_empty() {
      String::new()
    } else {
      general_purpose::STANDARD.encode(Md5::digest(body))
    };

    parts.headers.insert(http::header::DATE, time_string.parse()?);
    parts.headers.insert(CONTENT_MD5, content_md5.parse()?);
    parts.headers.insert(X_CA_SIGNATURE_METHOD, self.digest.method().parse()?);
    parts
      .headers
      .insert(X_CA_TIMESTAMP, date.timestamp_millis().to_string().parse()?);
    parts.headers.insert(X_CA_KEY, self.key.id().parse()?);
    parts.headers.insert(X_CA_NONCE, nonce.parse()?);

    let base = SignatureBase::from_parts(parts, &self.signature_headers);
    let signature = self.digest.sign(&base.to_string(), self.key.secret());
    debug!(
      method = self.digest.method(),
      signed_headers = %base.signed_header_names(),
      "signed request"
    );

    let mut signature_value: HeaderValue = signature.parse()?;
    signature_value.set_sensitive(true);
    parts.headers.insert(X_CA_SIGNATURE, signature_value);
    parts
      .headers
      .insert(X_CA_SIGNATURE_HEADERS, base.signed_header_names().parse()?);

    Ok(())
  }
}

impl std::fmt::Debug for RequestSigner {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("RequestSigner")
      .field("key", &self.key)
      .field("digest", &self.digest.method())
      .field("signature_headers", &self.signature_headers)
      .finish()
  }
}

/// HTTP-date in GMT, e.g. `Tue, 28 Apr 2020 00:00:00 GMT`
fn format_http_date(date: &DateTime<Utc>) -> String {
  date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn http_date_format() {
    let date = Utc.with_ymd_and_hms(2020, 4, 28, 0, 0, 0).unwrap();
    assert_eq!(format_http_date(&date), "Tue, 28 Apr 2020 00:00:00 GMT");
  }

  #[test]
  fn debug_shows_digest_method_not_secret() {
    let signer = RequestSigner::new(Key::new("1234", "5678"));
    let debug = format!("{:?}", signer);
    assert!(debug.contains("HmacSHA256"));
    assert!(!debug.contains("5678"));
  }
}
