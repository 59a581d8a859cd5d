use crate::error::GatewaySigError;
use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};

type HmacSha1 = Hmac<sha1::Sha1>;
type HmacSha256 = Hmac<sha2::Sha256>;

/* -------------------------------- */
/// Keyed-hash strategy producing the signature string sent to the gateway.
///
/// Implementations must be deterministic: identical `(message, secret)` pairs
/// yield identical output. The signer accepts any implementation, so new
/// algorithms can be added without touching it.
pub trait SignatureDigest {
  /// Base64 encoding of the raw keyed hash of `message` under `secret`
  fn sign(&self, message: &str, secret: &str) -> String;

  /// Identifier sent in the x-ca-signature-method header.
  /// Must match exactly what the verifying gateway expects.
  fn method(&self) -> &str;
}

/// Built-in HMAC digest variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HmacDigest {
  /// HmacSHA1
  Sha1,
  /// HmacSHA256
  #[default]
  Sha256,
}

impl HmacDigest {
  pub fn as_str(&self) -> &'static str {
    match self {
      HmacDigest::Sha1 => "HmacSHA1",
      HmacDigest::Sha256 => "HmacSHA256",
    }
  }
}

impl std::fmt::Display for HmacDigest {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

impl core::str::FromStr for HmacDigest {
  type Err = GatewaySigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "HmacSHA1" => Ok(Self::Sha1),
      "HmacSHA256" => Ok(Self::Sha256),
      _ => Err(GatewaySigError::InvalidDigestMethod(s.to_string())),
    }
  }
}

impl SignatureDigest for HmacDigest {
  /// Sign the message
  fn sign(&self, message: &str, secret: &str) -> String {
    let raw = match self {
      HmacDigest::Sha1 => {
        // new_from_slice accepts keys of any length
        let mut mac = HmacSha1::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        mac.finalize().into_bytes().to_vec()
      }
      HmacDigest::Sha256 => {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(message.as_bytes());
        mac.finalize().into_bytes().to_vec()
      }
    };
    general_purpose::STANDARD.encode(raw)
  }

  /// Get the method identifier
  fn method(&self) -> &str {
    self.as_str()
  }
}
