use std::sync::Arc;

use serde::{Deserialize, Serialize};
use skycast_models::ForecastSequence;
use warp::{Rejection, Reply};

use crate::error::ApiError;
use crate::service::WeatherService;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub city: String,
    pub forecast_celsius: ForecastSequence,
}

#[derive(Debug, Serialize)]
pub struct AnomalyResponse {
    pub city: String,
    pub current_temp_celsius: f64,
    pub is_anomaly: bool,
    pub message: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
}

pub async fn root(service: Arc<WeatherService>) -> Result<impl Reply, Rejection> {
    Ok(warp::reply::json(&StatusResponse {
        status: "ok",
        message: format!("{} Weather API is running", service.city()),
    }))
}

pub async fn forecast(service: Arc<WeatherService>) -> Result<impl Reply, Rejection> {
    let sequence = service
        .forecast_week()
        .await
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?;

    Ok(warp::reply::json(&ForecastResponse {
        city: service.city().to_string(),
        forecast_celsius: sequence,
    }))
}

pub async fn anomaly(service: Arc<WeatherService>) -> Result<impl Reply, Rejection> {
    let report = service
        .check_anomaly()
        .await
        .map_err(|e| warp::reject::custom(ApiError::from(e)))?;

    Ok(warp::reply::json(&AnomalyResponse {
        city: service.city().to_string(),
        current_temp_celsius: report.current_temp_celsius,
        is_anomaly: report.label.is_anomaly(),
        message: report.label.message(),
    }))
}

/// Any failure on this route is a 500; provider trouble on the chat side is
/// already folded into the reply text by the chat client.
pub async fn chat(req: ChatRequest, service: Arc<WeatherService>) -> Result<impl Reply, Rejection> {
    let reply = service
        .chat(&req.message)
        .await
        .map_err(|e| warp::reject::custom(ApiError::internal(e.to_string())))?;

    Ok(warp::reply::json(&ChatResponse { reply }))
}
