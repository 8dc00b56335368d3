//! Error types for the RSA lab service.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Failures raised by the arithmetic, the codec and the RSA computations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// A key generation input failed the primality test.
    #[error("p dan q harus bilangan prima!")]
    NotPrime,

    /// Modular arithmetic with a modulus of zero.
    #[error("modulus harus lebih besar dari 0")]
    ZeroModulus,

    /// `value` has no inverse modulo `modulus`.
    #[error("{value} tidak memiliki invers modulo {modulus}")]
    NotInvertible {
        /// The value that was inverted.
        value: u64,
        /// The modulus.
        modulus: u64,
    },

    /// No odd public exponent is coprime with phi.
    #[error("tidak ada eksponen publik e yang valid untuk phi = {phi}")]
    NoPublicExponent {
        /// Euler's totient of the modulus.
        phi: u64,
    },

    /// A character does not fit the fixed-width decimal encoding.
    #[error("karakter '{ch}' (kode {code}) tidak dapat dikodekan dalam 3 digit")]
    CodePointOutOfRange {
        /// The offending character.
        ch: char,
        /// Its code point.
        code: u32,
    },

    /// A chunk of the ASCII-digit string is not a decimal number.
    #[error("blok ASCII tidak valid: '{0}'")]
    InvalidDigits(String),

    /// Block size outside the supported range.
    #[error("ukuran blok tidak valid: {0}")]
    InvalidBlockSize(usize),

    /// A ciphertext token is not a non-negative integer.
    #[error("ciphertext tidak valid: '{0}'")]
    InvalidCiphertext(String),

    /// A derived quantity does not fit in 64 bits.
    #[error("overflow saat menghitung {0}")]
    Overflow(&'static str),
}

impl CryptoError {
    /// Returns `true` if the error was caused by the caller's input.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::NotInvertible { .. } | Self::Overflow(_))
    }
}

/// Outcome of a failed request, one variant per HTTP status the API emits.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Bad, missing or non-prime input.
    #[error("{0}")]
    Validation(String),

    /// Anything that went wrong while computing.
    #[error("{0}")]
    Internal(String),

    /// No route matched.
    #[error("Not found")]
    NotFound,
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl From<CryptoError> for ApiError {
    fn from(err: CryptoError) -> Self {
        if err.is_client_error() {
            Self::Validation(err.to_string())
        } else {
            Self::Internal(err.to_string())
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Internal(message) => tracing::error!(%message, "request failed"),
            Self::Validation(message) => tracing::debug!(%message, "request rejected"),
            Self::NotFound => {}
        }

        (
            status,
            Json(ErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
