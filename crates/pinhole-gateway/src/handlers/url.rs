use crate::error::{AppError, Result};
use crate::model::{CreateUrlRequest, CreateUrlResponse};
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pinhole_core::{ShortCode, ShortenerError};
use tracing::debug;

pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateUrlResponse>)> {
    let Json(request) = payload?;

    let code = state.shortener().create(&request.url).await?;
    debug!(code = %code, "shortened URL");

    Ok((
        StatusCode::CREATED,
        Json(CreateUrlResponse {
            short_url: code.to_url(state.base_url()),
            short_id: code.to_string(),
        }),
    ))
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // a malformed code can never have been created
    let code = ShortCode::new(short_code.as_str())
        .map_err(|_| ShortenerError::NotFound(short_code.clone()))?;

    let url = state.shortener().resolve(&code).await?;
    let location = HeaderValue::from_str(&url).map_err(|_| AppError::InvalidRedirect)?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}
