use bytes::Bytes;
use gatewaysig_hyper::{prelude::*, *};
use http::Request;
use http_body_util::Full;

fn build_request() -> Request<Full<Bytes>> {
  Request::builder()
    .method("POST")
    .uri("https://example.com/v1.0/category/123/products?page=10")
    .header("accept", "*/*")
    .header("content-type", "application/json")
    .body(Full::new(Bytes::from_static(b"{\"hello\":\"world\"}")))
    .unwrap()
}

/// Sign with the default HmacSHA256 digest and auto-generated nonce/timestamp
async fn scenario_default_digest() {
  println!("--------------  Scenario: HmacSHA256 with generated nonce  --------------");

  let signer = RequestSigner::new(Key::new("my-key-id", "my-key-secret"));
  let request = build_request();
  println!("Request header before signing:\n{:#?}", request.headers());

  let signed = request.sign_with(&signer, None, None).await.unwrap();
  println!("Request header after signing:\n{:#?}", signed.headers());

  assert!(signed.headers().contains_key(X_CA_SIGNATURE));
  assert_eq!(signed.headers().get(X_CA_SIGNATURE_METHOD).unwrap(), "HmacSHA256");
}

/// Sign with HmacSHA1 and a custom signed-header set
async fn scenario_custom_header_set() {
  println!("--------------  Scenario: HmacSHA1 with custom signed headers  --------------");

  let mut signer = RequestSigner::with_digest(Key::new("my-key-id", "my-key-secret"), HmacDigest::Sha1);
  signer.set_signature_headers([X_CA_KEY, X_CA_NONCE, X_CA_TIMESTAMP]);
  signer.add_signature_header("Content-Type");

  let signed = build_request().sign_with(&signer, None, None).await.unwrap();
  println!("Request header after signing:\n{:#?}", signed.headers());

  assert_eq!(signed.headers().get(X_CA_SIGNATURE_METHOD).unwrap(), "HmacSHA1");
  assert_eq!(
    signed.headers().get(X_CA_SIGNATURE_HEADERS).unwrap(),
    "content-type,x-ca-key,x-ca-nonce,x-ca-timestamp"
  );
}

#[tokio::main]
async fn main() {
  scenario_default_digest().await;
  println!("-------------------------------------------------------------");
  scenario_custom_header_set().await;
  println!("-------------------------------------------------------------");
}
