use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use payoutfolio_core::errors::Error as CoreError;
use payoutfolio_core::fx::FxError;
use payoutfolio_core::platform_fees::PlatformFeeError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::PlatformFee(PlatformFeeError::NotFound(_)) => StatusCode::NOT_FOUND,
                CoreError::PlatformFee(_) => StatusCode::BAD_REQUEST,
                CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::Fx(FxError::UnknownCurrency(_) | FxError::AmountOutOfRange(_)) => {
                    StatusCode::BAD_REQUEST
                }
                CoreError::Fx(FxError::InvalidRateTable(_)) => StatusCode::INTERNAL_SERVER_ERROR,
                CoreError::Database(_) => StatusCode::SERVICE_UNAVAILABLE,
            },
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", message);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<FxError> for ApiError {
    fn from(err: FxError) -> Self {
        ApiError::Core(err.into())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payoutfolio_core::errors::DatabaseError;

    #[test]
    fn test_status_mapping() {
        let forbidden: ApiError =
            CoreError::from(PlatformFeeError::Forbidden("nope".into())).into();
        assert_eq!(forbidden.status(), StatusCode::BAD_REQUEST);

        let missing: ApiError = CoreError::from(PlatformFeeError::NotFound("x".into())).into();
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);

        let invalid: ApiError =
            CoreError::from(PlatformFeeError::invalid("platformName", "must not be empty")).into();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

        let storage: ApiError =
            CoreError::from(DatabaseError::ConnectionFailed("down".into())).into();
        assert_eq!(storage.status(), StatusCode::SERVICE_UNAVAILABLE);

        let overflow: ApiError = FxError::AmountOutOfRange("too big".into()).into();
        assert_eq!(overflow.status(), StatusCode::BAD_REQUEST);

        let bad_table: ApiError = FxError::InvalidRateTable("missing euro".into()).into();
        assert_eq!(bad_table.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
