use gatewaysig::prelude::GatewaySigError;
use thiserror::Error;

/// Result type for signing hyper requests
pub type HyperSigResult<T> = std::result::Result<T, HyperSigError>;

/// Error type for signing hyper requests
#[derive(Error, Debug)]
pub enum HyperSigError {
  /// Http body error
  #[error("Http body error: {0}")]
  HttpBodyError(String),

  /// Inherited from GatewaySigError
  #[error("GatewaySigError: {0}")]
  GatewaySigError(#[from] GatewaySigError),
}
