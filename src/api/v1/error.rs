use crate::application_port::*;
use serde::Serialize;
use std::convert::Infallible;
use thiserror::Error;
use tracing::warn;
use warp::http::StatusCode;
use warp::{Rejection, reject};

pub const RESOURCE_NOT_FOUND: &str = "Ресурс не найден";
pub const METHOD_NOT_ALLOWED: &str = "Метод не поддерживается";
pub const INTERNAL_ERROR: &str = "Произошла непредвиденная ошибка.";

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

pub async fn recover_error(err: Rejection) -> Result<impl warp::Reply, Infallible> {
    let (status, message) = if let Some(err) = err.find::<ApiErrorCode>() {
        (err.status(), err.to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, RESOURCE_NOT_FOUND.to_owned())
    } else if let Some(err) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, err.to_string())
    } else if let Some(err) = err.find::<reject::InvalidQuery>() {
        (StatusCode::BAD_REQUEST, err.to_string())
    } else if let Some(err) = err.find::<reject::PayloadTooLarge>() {
        (StatusCode::PAYLOAD_TOO_LARGE, err.to_string())
    } else if let Some(err) = err.find::<reject::UnsupportedMediaType>() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, err.to_string())
    } else if err.find::<reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED.to_owned())
    } else {
        warn!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR.to_owned())
    };

    let json = warp::reply::json(&ErrorBody { error: message });
    Ok(warp::reply::with_status(json, status))
}

#[derive(Debug, Clone, Error)]
pub enum ApiErrorCode {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Произошла непредвиденная ошибка.")]
    InternalError,
}

impl ApiErrorCode {
    pub fn internal<E: std::fmt::Display>(error: E) -> ApiErrorCode {
        warn!("Internal error: {}", error);
        ApiErrorCode::InternalError
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiErrorCode::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiErrorCode::NotFound(_) => StatusCode::NOT_FOUND,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl reject::Reject for ApiErrorCode {}

impl From<CatalogError> for ApiErrorCode {
    fn from(error: CatalogError) -> Self {
        match error {
            CatalogError::Validation(message) => ApiErrorCode::BadRequest(message),
            CatalogError::NotFound(message) => ApiErrorCode::NotFound(message),
            CatalogError::Store(e) => ApiErrorCode::internal(e),
        }
    }
}
