use crate::error::HttpAppError;
use crate::handlers::VideoNameQuery;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
};
use std::sync::Arc;
use streamsign_core::constants::HLS_CONTENT_TYPE;
use streamsign_core::VideoName;

/// `GET /playlist?name=<video>`: the video's manifest with every segment reference signed.
///
/// The body is only produced once the whole manifest has been rewritten, so a failure at
/// any stage yields an error response and never a partial playlist.
pub async fn get_playlist(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VideoNameQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let name = VideoName::parse(query.name.as_deref())?;
    let manifest = state.streaming.resolve_playlist(&name).await?;

    Ok((
        [
            (header::CONTENT_TYPE, HLS_CONTENT_TYPE),
            // Body embeds expiring URLs.
            (header::CACHE_CONTROL, "no-store"),
        ],
        manifest.into_bytes(),
    ))
}
