use thiserror::Error;

/// Result type for gateway request signing
pub type GatewaySigResult<T> = std::result::Result<T, GatewaySigError>;

/// Error type for gateway request signing
#[derive(Error, Debug)]
pub enum GatewaySigError {
  /// A produced header value (key id, nonce, signature) is not a legal http header value
  #[error("Failed to parse header value: {0}")]
  InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),

  /// Unknown digest method identifier
  #[error("Invalid digest method name: {0}")]
  InvalidDigestMethod(String),
}
