mod digest;
mod error;
mod key;
mod signature_base;
mod signer;
mod trace;

pub mod prelude {
  pub use crate::{
    digest::{HmacDigest, SignatureDigest},
    error::{GatewaySigError, GatewaySigResult},
    key::Key,
    signature_base::SignatureBase,
    signer::{
      RequestSigner, CONTENT_MD5, X_CA_KEY, X_CA_NONCE, X_CA_SIGNATURE, X_CA_SIGNATURE_HEADERS, X_CA_SIGNATURE_METHOD,
      X_CA_STAGE, X_CA_TIMESTAMP,
    },
  };
}

/* ----------------------------------------------------------------- */
