use crate::error::{HyperSigError, HyperSigResult};
use bytes::{Buf, Bytes};
use chrono::{DateTime, FixedOffset};
use gatewaysig::prelude::RequestSigner;
use http::Request;
use http_body::Body;
use http_body_util::{BodyExt, Full};
use std::future::Future;
use tracing::debug;

/* --------------------------------------- */
/// A trait to collect a request body into memory before signing
pub trait BodyBytes: http_body::Body {
  /// Returns the bytes object of the body
  fn into_bytes(self) -> impl Future<Output = Result<Bytes, Self::Error>> + Send
  where
    Self: Sized + Send,
    Self::Data: Send,
  {
    async {
      let mut body_buf = self.collect().await?.aggregate();
      Ok(body_buf.copy_to_bytes(body_buf.remaining()))
    }
  }
}

impl<T: ?Sized> BodyBytes for T where T: http_body::Body {}

/* --------------------------------------- */
/// A trait to sign an outgoing http request with a [`RequestSigner`].
///
/// The body is buffered so its content hash can be computed, then the request
/// is rebuilt around the buffered bytes with the full x-ca header set applied.
pub trait SignableRequest {
  type Error;

  /// Sign the request. `date` and `nonce` default to the current time and a
  /// fresh v4 uuid when `None`, which is what production callers want; fixed
  /// values are for deterministic tests.
  fn sign_with(
    self,
    signer: &RequestSigner,
    date: Option<DateTime<FixedOffset>>,
    nonce: Option<&str>,
  ) -> impl Future<Output = Result<Request<Full<Bytes>>, Self::Error>> + Send
  where
    Self: Sized;
}

impl<B> SignableRequest for Request<B>
where
  B: Body + Send,
  <B as Body>::Data: Send,
  <B as Body>::Error: std::fmt::Display,
{
  type Error = HyperSigError;

  async fn sign_with(
    self,
    signer: &RequestSigner,
    date: Option<DateTime<FixedOffset>>,
    nonce: Option<&str>,
  ) -> HyperSigResult<Request<Full<Bytes>>> {
    let (mut parts, body) = self.into_parts();
    let body_bytes = body
      .into_bytes()
      .await
      .map_err(|e| HyperSigError::HttpBodyError(e.to_string()))?;
    debug!(bytes = body_bytes.len(), "buffered request body for signing");

    signer.sign_parts(&mut parts, &body_bytes, date, nonce)?;

    Ok(Request::from_parts(parts, Full::new(body_bytes)))
  }
}

/* --------------------------------------- */
#[cfg(feature = "blocking")]
/// Synchronous counterpart of [`SignableRequest`].
///
/// Every method delegates to the corresponding async method via
/// `futures::executor::block_on`.
///
/// # Panics
///
/// All methods will panic if called from within an async runtime (e.g. a
/// `tokio` task). Use the async [`SignableRequest`] methods instead when you
/// are already in an async context.
pub trait SignableRequestSync: SignableRequest {
  /// Sign the request, blocking until the body is collected
  fn sign_with_sync(
    self,
    signer: &RequestSigner,
    date: Option<DateTime<FixedOffset>>,
    nonce: Option<&str>,
  ) -> Result<Request<Full<Bytes>>, Self::Error>
  where
    Self: Sized;
}

#[cfg(feature = "blocking")]
impl<B> SignableRequestSync for Request<B>
where
  B: Body + Send,
  <B as Body>::Data: Send,
  <B as Body>::Error: std::fmt::Display,
{
  fn sign_with_sync(
    self,
    signer: &RequestSigner,
    date: Option<DateTime<FixedOffset>>,
    nonce: Option<&str>,
  ) -> Result<Request<Full<Bytes>>, Self::Error> {
    futures::executor::block_on(self.sign_with(signer, date, nonce))
  }
}
