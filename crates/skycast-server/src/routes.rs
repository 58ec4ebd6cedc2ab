use std::convert::Infallible;
use std::sync::Arc;

use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

use crate::error::{handle_rejection, ApiError};
use crate::handlers;
use crate::service::WeatherService;

const MAX_CHAT_BODY_BYTES: u64 = 16 * 1024;

/// Reject bodies that declare a length above `MAX_CHAT_BODY_BYTES`.
///
/// Chunked bodies carry no length and are let through.
fn declared_length_within_limit() -> impl Filter<Extract = (), Error = Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and_then(|length: Option<u64>| async move {
            match length {
                Some(n) if n > MAX_CHAT_BODY_BYTES => Err(warp::reject::custom(ApiError::new(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    "Payload Too Large",
                ))),
                _ => Ok(()),
            }
        })
        .untuple_one()
}

fn with_service(
    service: Arc<WeatherService>,
) -> impl Filter<Extract = (Arc<WeatherService>,), Error = Infallible> + Clone {
    warp::any().map(move || service.clone())
}

/// All routes with CORS, rejection rendering and request tracing applied.
pub fn routes(
    service: Arc<WeatherService>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let root = warp::path::end()
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(handlers::root);

    let forecast = warp::path("forecast")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(handlers::forecast);

    let anomaly = warp::path("anomaly")
        .and(warp::path::end())
        .and(warp::get())
        .and(with_service(service.clone()))
        .and_then(handlers::anomaly);

    let chat = warp::path("chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(declared_length_within_limit())
        .and(warp::body::json())
        .and(with_service(service))
        .and_then(handlers::chat);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "HEAD", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
        .allow_headers(vec![
            "accept",
            "accept-language",
            "authorization",
            "cache-control",
            "content-language",
            "content-type",
            "origin",
            "pragma",
            "x-requested-with",
        ]);

    // CORS sits inside `recover` so forbidden preflights get a JSON body too
    root.or(forecast)
        .or(anomaly)
        .or(chat)
        .with(cors)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

/// Serve until the process receives Ctrl-C.
///
/// # Errors
///
/// Fails if `addr` cannot be bound.
pub async fn serve(
    service: Arc<WeatherService>,
    addr: std::net::SocketAddr,
) -> Result<(), warp::Error> {
    let (bound, server) =
        warp::serve(routes(service)).try_bind_with_graceful_shutdown(addr, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
            tracing::info!("Shutting down");
        })?;

    tracing::info!("Listening on http://{}", bound);
    server.await;
    Ok(())
}
