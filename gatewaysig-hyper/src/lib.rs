//! # gatewaysig-hyper
//!
//! `gatewaysig-hyper` is a crate that provides a convenient API for `Hyper` users to sign
//! outgoing HTTP requests for X-Ca style API gateway authentication.
//! This crate extends hyper's http request messages with the ability to buffer the body,
//! compute its content hash, and apply the full x-ca signature header set before the
//! request is sent.
//!
//! ## Async-first design
//!
//! The primary API is fully async via [`SignableRequest`], buffering arbitrary
//! `http_body::Body` implementations.
//!
//! ## Blocking API
//!
//! When the `blocking` feature is enabled (on by default), synchronous wrappers are provided via
//! [`SignableRequestSync`]. These use `futures::executor::block_on` internally and are intended
//! **exclusively for non-async contexts**.
//!
//! # Panics
//!
//! Calling any `*_sync` method from within an async runtime (e.g. inside a `tokio::spawn` task)
//! will panic. If you are already in an async context, use the async methods directly.

mod error;
mod hyper_http;

pub use error::{HyperSigError, HyperSigResult};
pub use gatewaysig::prelude;
pub use hyper_http::{BodyBytes, SignableRequest};

#[cfg(feature = "blocking")]
pub use hyper_http::SignableRequestSync;

/* ----------------------------------------------------------------- */
#[cfg(test)]
mod tests {
  use super::{prelude::*, *};
  use bytes::Bytes;
  use chrono::{TimeZone, Utc};
  use http::Request;
  use http_body_util::Full;

  fn test_signer() -> RequestSigner {
    RequestSigner::new(Key::new("1234", "5678"))
  }

  fn build_request(body: &'static [u8]) -> Request<Full<Bytes>> {
    Request::builder()
      .method(if body.is_empty() { "GET" } else { "POST" })
      .uri("https://example.com/v1.0/category/123/products?page=10")
      .header("Accept", "*/*")
      .header("Content-Type", "application/json")
      .header("X-Ca-Stage", "test")
      .body(Full::new(Bytes::from_static(body)))
      .unwrap()
  }

  #[tokio::test]
  async fn sign_empty_body_request_end_to_end() {
    let signer = test_signer();
    let date = Utc.with_ymd_and_hms(2020, 4, 30, 0, 0, 0).unwrap().fixed_offset();

    let signed = build_request(b"").sign_with(&signer, Some(date), Some("")).await.unwrap();

    assert_eq!(
      signed.headers().get(X_CA_SIGNATURE).unwrap(),
      "yIHfw2kU986NsOD+TynOqwkvPT6IWgMobUJ4jgPGkiw="
    );
    assert!(signed.headers().get(X_CA_SIGNATURE).unwrap().is_sensitive());
    assert_eq!(
      signed.headers().get(X_CA_SIGNATURE_HEADERS).unwrap(),
      "x-ca-key,x-ca-nonce,x-ca-signature-method,x-ca-stage,x-ca-timestamp"
    );
    assert_eq!(signed.headers().get(X_CA_KEY).unwrap(), "1234");
    assert_eq!(signed.headers().get(X_CA_TIMESTAMP).unwrap(), "1588204800000");
    assert_eq!(signed.headers().get(X_CA_SIGNATURE_METHOD).unwrap(), "HmacSHA256");
    assert_eq!(signed.headers().get(http::header::DATE).unwrap(), "Thu, 30 Apr 2020 00:00:00 GMT");
    assert_eq!(signed.headers().get(CONTENT_MD5).unwrap(), "");
  }

  #[tokio::test]
  async fn sign_buffers_body_and_sets_content_hash() {
    let signer = test_signer();

    let signed = build_request(b"{\"hello\":\"world\"}").sign_with(&signer, None, None).await.unwrap();

    assert_eq!(signed.headers().get(CONTENT_MD5).unwrap(), "+8JLzHoXlHWPwTJ/z+va9g==");
    assert!(signed.headers().contains_key(X_CA_SIGNATURE));
    assert!(signed.headers().contains_key(X_CA_NONCE));

    // the buffered body is carried through unchanged
    let body_bytes = signed.into_body().into_bytes().await.unwrap();
    assert_eq!(&body_bytes[..], &b"{\"hello\":\"world\"}"[..]);
  }

  #[cfg(feature = "blocking")]
  #[test]
  fn sign_request_sync() {
    let signer = test_signer();
    let date = Utc.with_ymd_and_hms(2020, 4, 30, 0, 0, 0).unwrap().fixed_offset();

    let signed = build_request(b"").sign_with_sync(&signer, Some(date), Some("")).unwrap();

    assert_eq!(
      signed.headers().get(X_CA_SIGNATURE).unwrap(),
      "yIHfw2kU986NsOD+TynOqwkvPT6IWgMobUJ4jgPGkiw="
    );
  }
}
