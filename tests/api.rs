use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use rsa_lab::{Config, app, handlers::MISSING_FIELDS, handlers::NON_NUMERIC_FIELDS};

fn test_app() -> Router {
    let config = Config {
        index_path: concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html").into(),
        ..Config::default()
    };
    app(&config)
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    read_json(app, request).await
}

async fn read_json(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_index_page() {
    let response = test_app().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("<title>RSA Lab</title>"));
}

#[tokio::test]
async fn test_index_page_missing() {
    let config = Config {
        index_path: "does/not/exist.html".into(),
        ..Config::default()
    };
    let (status, body) = read_json(app(&config), get("/")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "File not found"}));
}

#[tokio::test]
async fn test_index_page_rejects_head() {
    let request = Request::builder()
        .method("HEAD")
        .uri("/")
        .body(Body::empty())
        .unwrap();
    let response = test_app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_route() {
    let (status, body) = read_json(test_app(), get("/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));
}

#[tokio::test]
async fn test_wrong_method_is_not_found() {
    let (status, body) = read_json(test_app(), get("/api/encrypt")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "Not found"}));

    let (status, _) = post_json(test_app(), "/", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_generate_keys() {
    let (status, body) =
        post_json(test_app(), "/api/generate-keys", json!({"p": 7, "q": 11})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "p": 7,
            "q": 11,
            "n": 77,
            "phi": 60,
            "e": 7,
            "d": 43,
            "publicKey": {"e": 7, "n": 77},
            "privateKey": {"d": 43, "n": 77}
        })
    );
}

#[tokio::test]
async fn test_generate_keys_not_prime() {
    let (status, body) =
        post_json(test_app(), "/api/generate-keys", json!({"p": 4, "q": 11})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "p dan q harus bilangan prima!"}));
}

#[tokio::test]
async fn test_generate_keys_overflow_is_internal() {
    let p = 4_294_967_311_u64;
    let (status, body) =
        post_json(test_app(), "/api/generate-keys", json!({"p": p, "q": p})).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "overflow saat menghitung n = p * q");
}

#[tokio::test]
async fn test_generate_keys_overflow_fails_fast() {
    let (status, body) = post_json(
        test_app(),
        "/api/generate-keys",
        json!({"p": 18_446_744_073_709_551_557_u64, "q": 3}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "overflow saat menghitung n = p * q");
}

#[tokio::test]
async fn test_generate_keys_bad_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/api/generate-keys")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = read_json(test_app(), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post_json(test_app(), "/api/generate-keys", json!({"p": 7})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_encrypt_single_character() {
    let (status, body) = post_json(
        test_app(),
        "/api/encrypt",
        json!({"message": "A", "e": 7, "n": 77}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "originalMessage": "A",
            "asciiText": "065",
            "blocks": ["065"],
            "encryptedBlocks": [65],
            "encryptionSteps": [
                {"block": 1, "original": "065", "calculation": "065^7 mod 77", "result": 65}
            ],
            "ciphertext": "65"
        })
    );
}

#[tokio::test]
async fn test_encrypt_custom_block_size() {
    let (status, body) = post_json(
        test_app(),
        "/api/encrypt",
        json!({"message": "Hi!", "e": 7, "n": 3233, "blockSize": 4}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["asciiText"], "072105033");
    assert_eq!(body["blocks"], json!(["0721", "0503", "3"]));
    assert_eq!(body["encryptedBlocks"].as_array().unwrap().len(), 3);
    assert_eq!(body["encryptionSteps"][1]["calculation"], "0503^7 mod 3233");
}

#[tokio::test]
async fn test_encrypt_missing_fields() {
    for body in [
        json!({"e": 7, "n": 77}),
        json!({"message": "", "e": 7, "n": 77}),
        json!({"message": "A", "e": 0, "n": 77}),
        json!({"message": "A", "e": 7}),
    ] {
        let (status, response) = post_json(test_app(), "/api/encrypt", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"error": MISSING_FIELDS}));
    }
}

#[tokio::test]
async fn test_encrypt_rejects_wide_characters() {
    let (status, body) = post_json(
        test_app(),
        "/api/encrypt",
        json!({"message": "5€", "e": 7, "n": 3233}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("8364"));
}

#[tokio::test]
async fn test_decrypt_missing_fields() {
    for body in [
        json!({"d": 43, "n": 77}),
        json!({"cipherText": "   ", "d": 43, "n": 77}),
        json!({"cipherText": "65", "d": 43}),
    ] {
        let (status, response) = post_json(test_app(), "/api/decrypt", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"error": MISSING_FIELDS}));
    }
}

#[tokio::test]
async fn test_decrypt_bad_token() {
    let (status, body) = post_json(
        test_app(),
        "/api/decrypt",
        json!({"cipherText": "65 abc", "d": 43, "n": 77}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "ciphertext tidak valid: 'abc'"}));
}

#[tokio::test]
async fn test_encrypt_decrypt_round_trip() {
    let (_, keys) =
        post_json(test_app(), "/api/generate-keys", json!({"p": 61, "q": 53})).await;
    let message = "Kriptografi RSA 101!";

    let (status, encrypted) = post_json(
        test_app(),
        "/api/encrypt",
        json!({"message": message, "e": keys["e"], "n": keys["n"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, decrypted) = post_json(
        test_app(),
        "/api/decrypt",
        json!({"cipherText": encrypted["ciphertext"], "d": keys["d"], "n": keys["n"]}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decrypted["originalMessage"], message);
    assert_eq!(decrypted["asciiText"], encrypted["asciiText"]);
    assert_eq!(decrypted["decryptedBlocks"], encrypted["blocks"]);
    assert_eq!(decrypted["cipherText"], encrypted["ciphertext"]);
    assert_eq!(
        decrypted["decryptionSteps"].as_array().unwrap().len(),
        message.len()
    );
}

#[tokio::test]
async fn test_modular() {
    let (status, body) = post_json(
        test_app(),
        "/api/modular",
        json!({"base": "4", "exponent": 13, "modulus": "497"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"calculation": "4^13 mod 497", "result": 445}));
}

#[tokio::test]
async fn test_modular_non_numeric() {
    for body in [
        json!({"base": "x", "exponent": 13, "modulus": 497}),
        json!({"base": 4, "exponent": 13}),
        json!({"base": 4, "exponent": -1, "modulus": 497}),
    ] {
        let (status, response) = post_json(test_app(), "/api/modular", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(response, json!({"error": NON_NUMERIC_FIELDS}));
    }
}

#[tokio::test]
async fn test_modular_zero_modulus() {
    let (status, body) = post_json(
        test_app(),
        "/api/modular",
        json!({"base": 4, "exponent": 13, "modulus": 0}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "modulus harus lebih besar dari 0"}));
}
