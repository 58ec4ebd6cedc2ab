//! HTTP error mapping.
//!
//! Handler failures become an [`ApiError`] rejection carrying the status
//! code; [`handle_rejection`] renders every rejection as `{"detail": ...}`.

use std::convert::Infallible;

use serde::Serialize;
use skycast_weather::WeatherError;
use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::service::ServiceError;

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl warp::reject::Reject for ApiError {}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, detail)
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Weather(e) if e.is_upstream() => {
                let detail = match e {
                    WeatherError::ProviderUnavailable { body, .. } => {
                        format!("OpenWeather error: {}", body)
                    }
                    other => other.to_string(),
                };
                ApiError::new(StatusCode::BAD_GATEWAY, detail)
            }
            // Model unavailability, malformed payloads, non-finite output, chat failures
            other => ApiError::internal(other.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}

/// Error bodies stay readable cross-origin; CORS allows any origin.
fn error_reply(status: StatusCode, detail: &str) -> impl Reply {
    warp::reply::with_header(
        warp::reply::with_status(warp::reply::json(&ErrorBody { detail }), status),
        "access-control-allow-origin",
        "*",
    )
}

pub async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    if let Some(api) = err.find::<ApiError>() {
        if api.status.is_server_error() {
            tracing::error!("Request failed with {}: {}", api.status, api.detail);
        }
        return Ok(error_reply(api.status, &api.detail));
    }

    let (status, detail) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Unsupported Media Type".to_string())
    } else if let Some(e) = err.find::<warp::cors::CorsForbidden>() {
        (StatusCode::FORBIDDEN, e.to_string())
    } else if let Some(e) = err.find::<warp::reject::InvalidHeader>() {
        (StatusCode::BAD_REQUEST, e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_string())
    } else {
        tracing::error!("Unhandled rejection: {:?}", err);
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
    };

    Ok(error_reply(status, &detail))
}
