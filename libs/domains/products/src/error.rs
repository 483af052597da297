use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::messages;

#[derive(Debug, Error)]
pub enum ProductError {
    /// Pre-flight field check failed
    #[error("{0}")]
    Validation(String),

    /// The service answered with a failed outcome
    #[error("{0}")]
    Rejected(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{}", messages::INVALID_SORT_ORDER)]
    InvalidSortOrder,

    /// The store's unique name index refused a write
    #[error("Duplicate product name: {0}")]
    DuplicateName(String),

    /// Request body is not valid JSON for the payload type
    #[error(transparent)]
    Json(#[from] JsonRejection),

    #[error("Database error: {0}")]
    Database(DbErr),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => ProductError::DuplicateName(detail),
            _ => ProductError::Database(err),
        }
    }
}

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(msg) => AppError::Validation(msg),
            ProductError::Rejected(msg) => AppError::BadRequest(msg),
            ProductError::NotFound(msg) => AppError::NotFound(msg),
            ProductError::InvalidSortOrder => {
                AppError::BadRequest(messages::INVALID_SORT_ORDER.to_string())
            }
            ProductError::DuplicateName(_) => {
                AppError::BadRequest(messages::PRODUCT_NAME_DUPLICATE.to_string())
            }
            ProductError::Json(rejection) => AppError::JsonExtractorRejection(rejection),
            ProductError::Database(err) => AppError::Database(err),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_plain_db_error_stays_database() {
        let err: ProductError = DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, ProductError::Database(_)));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ProductError::Validation(messages::PRODUCT_EMPTY.into()), StatusCode::BAD_REQUEST),
            (ProductError::Rejected(messages::PRODUCT_NOT_FOUND.into()), StatusCode::BAD_REQUEST),
            (ProductError::NotFound(messages::PRODUCT_NOT_FOUND.into()), StatusCode::NOT_FOUND),
            (ProductError::InvalidSortOrder, StatusCode::BAD_REQUEST),
            (ProductError::DuplicateName("products_name_lower_key".into()), StatusCode::BAD_REQUEST),
            (
                ProductError::Database(DbErr::Custom("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
