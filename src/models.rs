use serde::{Deserialize, Serialize};
use serde_json::Value;

// Request/Response models for the RSA lab endpoints.
// Field names follow the camelCase used by the web page.

// Model for key generation request
#[derive(Debug, Deserialize)]
pub struct GenerateKeysRequest {
    pub p: u64,
    pub q: u64,
}

// Model for a public key (e, n)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PublicKey {
    pub e: u64,
    pub n: u64,
}

// Model for a private key (d, n)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PrivateKey {
    pub d: u64,
    pub n: u64,
}

// Model for key generation response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyResponse {
    pub p: u64,
    pub q: u64,
    pub n: u64,
    pub phi: u64,
    pub e: u64,
    pub d: u64,
    pub public_key: PublicKey,
    pub private_key: PrivateKey,
}

// Model for encryption request. Every field is optional at the schema level
// so that missing and empty values share one error message.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptRequest {
    pub message: Option<String>,
    pub e: Option<u64>,
    pub n: Option<u64>,
    pub block_size: Option<usize>,
}

// One row of the encryption trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptionStep {
    pub block: usize,
    pub original: String,
    pub calculation: String,
    pub result: u64,
}

// Model for encryption response
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EncryptResponse {
    pub original_message: String,
    pub ascii_text: String,
    pub blocks: Vec<String>,
    pub encrypted_blocks: Vec<u64>,
    pub encryption_steps: Vec<EncryptionStep>,
    pub ciphertext: String,
}

// Model for decryption request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptRequest {
    pub cipher_text: Option<String>,
    pub d: Option<u64>,
    pub n: Option<u64>,
}

// One row of the decryption trace
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DecryptionStep {
    pub block: usize,
    pub original: u64,
    pub calculation: String,
    pub result: u64,
}

// Model for decryption response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptResponse {
    pub cipher_text: String,
    pub decrypted_blocks: Vec<String>,
    pub ascii_text: String,
    pub original_message: String,
    pub decryption_steps: Vec<DecryptionStep>,
}

// Model for the modular calculator. Operands may be JSON integers or
// strings holding one; see `numeric`.
#[derive(Debug, Deserialize)]
pub struct ModularRequest {
    #[serde(default)]
    pub base: Value,
    #[serde(default)]
    pub exponent: Value,
    #[serde(default)]
    pub modulus: Value,
}

impl ModularRequest {
    /// Returns `(base, exponent, modulus)` if all three are non-negative integers.
    pub fn operands(&self) -> Option<(u64, u64, u64)> {
        Some((
            numeric(&self.base)?,
            numeric(&self.exponent)?,
            numeric(&self.modulus)?,
        ))
    }
}

/// Reads a non-negative integer from a JSON number or a numeric string.
pub fn numeric(value: &Value) -> Option<u64> {
    match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

// Model for modular calculator response
#[derive(Debug, Serialize)]
pub struct ModularResponse {
    pub calculation: String,
    pub result: u64,
}

// Model for error responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
