use crate::signer::CONTENT_MD5;
use http::request::Parts;
use http::HeaderMap;
use percent_encoding::percent_decode_str;
use std::collections::BTreeMap;

/// Signature base string.
///
/// The canonical byte sequence both the signer and the verifying gateway must
/// reconstruct identically before hashing. Fields are newline-joined in a
/// fixed order; the selected signed headers are sorted by lower-cased name so
/// the gateway can re-derive the same order.
pub struct SignatureBase {
  /// Upper-cased request method
  method: String,
  /// accept header line, empty if absent
  accept: String,
  /// content-md5 header line, empty if absent
  content_md5: String,
  /// content-type header line, empty if absent
  content_type: String,
  /// date header line
  date: String,
  /// selected signed headers, keyed by lower-cased name
  signed_headers: BTreeMap<String, String>,
  /// path plus once-decoded query
  resource: String,
}

impl SignatureBase {
  /// Builds the signature base from request parts already carrying the
  /// injected signing headers, selecting from `signature_headers` the names
  /// present on the request.
  pub fn from_parts(parts: &Parts, signature_headers: &[String]) -> Self {
    let signed_headers = signature_headers
      .iter()
      .map(|name| name.to_ascii_lowercase())
      .filter(|name| parts.headers.contains_key(name.as_str()))
      .map(|name| {
        let line = header_line(&parts.headers, &name);
        (name, line)
      })
      .collect::<BTreeMap<_, _>>();

    Self {
      method: parts.method.as_str().to_ascii_uppercase(),
      accept: header_line(&parts.headers, "accept"),
      content_md5: header_line(&parts.headers, CONTENT_MD5),
      content_type: header_line(&parts.headers, "content-type"),
      date: header_line(&parts.headers, "date"),
      signed_headers,
      resource: resource_to_sign(parts),
    }
  }

  /// Comma-joined sorted lower-cased names folded into the base, i.e. the
  /// value of the x-ca-signature-headers header
  pub fn signed_header_names(&self) -> String {
    self.signed_headers.keys().map(String::as_str).collect::<Vec<_>>().join(",")
  }

  /// Returns the signature base string as bytes to be signed
  pub fn as_bytes(&self) -> Vec<u8> {
    self.to_string().into_bytes()
  }
}

impl std::fmt::Display for SignatureBase {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let header_block = self
      .signed_headers
      .iter()
      .map(|(name, value)| format!("{name}:{value}"))
      .collect::<Vec<_>>()
      .join("\n");
    write!(
      f,
      "{}\n{}\n{}\n{}\n{}\n{}\n{}",
      self.method, self.accept, self.content_md5, self.content_type, self.date, header_block, self.resource
    )
  }
}

/// Path plus `?` and the once-decoded query when the raw query is non-empty
fn resource_to_sign(parts: &Parts) -> String {
  let query = parts.uri.query().unwrap_or("");
  if query.is_empty() {
    parts.uri.path().to_string()
  } else {
    format!("{}?{}", parts.uri.path(), percent_decode_str(query).decode_utf8_lossy())
  }
}

/// Single line value of a header, multiple values joined with ", ".
/// Empty string if the header is absent.
fn header_line(headers: &HeaderMap, name: &str) -> String {
  headers
    .get_all(name)
    .iter()
    .filter_map(|v| v.to_str().ok())
    .collect::<Vec<_>>()
    .join(", ")
}
