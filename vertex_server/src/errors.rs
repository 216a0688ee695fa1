use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use vertex_engine::{OrderStoreError, RatesApiError};

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("Order validation failed: {}", .0.join("; "))]
    ValidationError(Vec<String>),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("Rates service error. {0}")]
    RatesError(#[from] RatesApiError),
    #[error("Order store error. {0}")]
    StoreError(#[from] OrderStoreError),
    #[error("Authentication Error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No user id was supplied")]
    Required,
    #[error("The supplied user id is not on the admin allowlist")]
    Denied,
}

impl ServerError {
    /// The stable string code carried in the error envelope.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ValidationError(_) | Self::InvalidRequestBody(_) => "VALIDATION_ERROR",
            Self::RatesError(e) => match e {
                RatesApiError::Timeout => "REQUEST_TIMEOUT",
                RatesApiError::ServiceUnavailable { .. } => "API_SERVICE_UNAVAILABLE",
                RatesApiError::PairNotFound => "PAIR_NOT_FOUND",
                RatesApiError::InvalidResponse(_) => "INVALID_API_RESPONSE",
                RatesApiError::Network(_) => "NETWORK_ERROR",
            },
            Self::AuthenticationError(AuthError::Required) => "AUTH_REQUIRED",
            Self::AuthenticationError(AuthError::Denied) => "ACCESS_DENIED",
            Self::InitializeError(_) | Self::StoreError(_) | Self::IOError(_) | Self::Unspecified(_) => {
                "INTERNAL_SERVER_ERROR"
            },
        }
    }

    /// The user-facing Russian message for the envelope. `Display` stays English for the logs.
    fn envelope_message(&self) -> &'static str {
        match self {
            Self::ValidationError(_) => "Ошибка валидации данных",
            Self::InvalidRequestBody(_) => "Некорректный формат запроса",
            Self::RatesError(e) => match e {
                RatesApiError::Timeout => "Превышено время ожидания ответа от сервиса курсов",
                RatesApiError::ServiceUnavailable { .. } => "Сервис курсов валют временно недоступен",
                RatesApiError::PairNotFound => "Курс USDT/RUB не найден в ответе API",
                RatesApiError::InvalidResponse(_) => "Некорректный формат ответа от сервиса курсов",
                RatesApiError::Network(_) => "Ошибка сети при подключении к сервису курсов",
            },
            Self::AuthenticationError(AuthError::Required) => "Требуется авторизация",
            Self::AuthenticationError(AuthError::Denied) => "Доступ запрещен",
            Self::StoreError(_) => "Ошибка при сохранении заявки",
            Self::InitializeError(_) | Self::IOError(_) | Self::Unspecified(_) => "Внутренняя ошибка сервера",
        }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ValidationError(_) | Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::RatesError(e) => match e {
                RatesApiError::Timeout => StatusCode::GATEWAY_TIMEOUT,
                RatesApiError::ServiceUnavailable { .. } => StatusCode::BAD_GATEWAY,
                RatesApiError::PairNotFound => StatusCode::NOT_FOUND,
                RatesApiError::InvalidResponse(_) => StatusCode::INTERNAL_SERVER_ERROR,
                RatesApiError::Network(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            Self::AuthenticationError(AuthError::Required) => StatusCode::UNAUTHORIZED,
            Self::AuthenticationError(AuthError::Denied) => StatusCode::FORBIDDEN,
            Self::InitializeError(_) | Self::StoreError(_) | Self::IOError(_) | Self::Unspecified(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut body = json!({
            "success": false,
            "error": self.error_code(),
            "message": self.envelope_message(),
            "timestamp": Utc::now(),
        });
        if let Self::ValidationError(errors) = self {
            body["errors"] = json!(errors);
        }
        if let Self::RatesError(RatesApiError::ServiceUnavailable { status }) = self {
            body["statusCode"] = json!(status);
        }
        HttpResponse::build(self.status_code()).insert_header(ContentType::json()).body(body.to_string())
    }
}
