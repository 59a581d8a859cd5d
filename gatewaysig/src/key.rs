/// Key pair identifying the caller against the gateway.
///
/// Immutable once constructed. The secret is redacted from the `Debug`
/// representation so it cannot leak through logging or error formatting.
#[derive(Clone)]
pub struct Key {
  id: String,
  secret: String,
}

impl Key {
  /// Create a new key from its id and secret
  pub fn new(id: impl Into<String>, secret: impl Into<String>) -> Self {
    Self {
      id: id.into(),
      secret: secret.into(),
    }
  }

  /// Get the key id
  pub fn id(&self) -> &str {
    &self.id
  }

  /// Get the key secret
  pub fn secret(&self) -> &str {
    &self.secret
  }
}

impl std::fmt::Debug for Key {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Key").field("id", &self.id).field("secret", &"<redacted>").finish()
  }
}
