//! Erros da camada HTTP e sua conversão em respostas `{"error": ...}`.

use axum::{
    extract::multipart::MultipartError,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use thiserror::Error;
use tracing::warn;

/// Erros da camada HTTP. O pipeline em si nunca falha; tudo aqui vem da
/// leitura e decodificação da requisição.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("no `file` field found in the upload")]
    MissingFile,

    #[error("file {filename:?} is not valid UTF-8 text")]
    InvalidEncoding { filename: String },

    #[error("file {filename:?} exceeds the limit of {limit} bytes")]
    PayloadTooLarge { filename: String, limit: usize },

    #[error("request exceeds the limit of {limit} bytes")]
    RequestTooLarge { limit: usize },

    #[error("malformed multipart request: {0}")]
    Multipart(MultipartError),

    #[error("invalid JSON request: {}", .0.body_text())]
    InvalidJson(#[from] JsonRejection),

    #[error("text is empty")]
    EmptyText,

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Converte um erro do multipart. Estouro do limite do corpo vira
    /// [`AppError::RequestTooLarge`], com o limite aplicado na mensagem.
    pub fn from_multipart(err: MultipartError, body_limit: usize) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::RequestTooLarge { limit: body_limit }
        } else {
            AppError::Multipart(err)
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFile | AppError::InvalidEncoding { .. } | AppError::EmptyText => {
                StatusCode::BAD_REQUEST
            }
            AppError::PayloadTooLarge { .. } | AppError::RequestTooLarge { .. } => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            AppError::Multipart(err) => err.status(),
            AppError::InvalidJson(rejection) => rejection.status(),
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        warn!(%status, error = %self, "requisição rejeitada");
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
