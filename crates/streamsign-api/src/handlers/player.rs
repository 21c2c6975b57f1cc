//! Browser entry points: `/video` resolves and signs a manifest, `/stream` embeds it in a
//! video.js page.

use crate::error::HttpAppError;
use crate::handlers::VideoNameQuery;
use crate::state::AppState;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use std::sync::Arc;
use streamsign_core::{AppError, VideoName};

#[derive(Debug, Default, Deserialize)]
pub struct StreamPageQuery {
    #[serde(rename = "presignedURL")]
    pub presigned_url: Option<String>,
}

/// `GET /video?name=<video>`: sign the manifest with the player expiry and redirect (302)
/// to the player page.
pub async fn watch_video(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VideoNameQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let name = VideoName::parse(query.name.as_deref())?;
    let manifest = state.streaming.player_url(&name).await?;

    tracing::info!(
        video_name = %name,
        manifest_key = %manifest.key,
        expires_in_secs = manifest.expires_in.as_secs(),
        "Redirecting to player"
    );

    let location = format!(
        "/stream?presignedURL={}",
        urlencoding::encode(&manifest.url)
    );
    Ok((StatusCode::FOUND, [(header::LOCATION, location)]))
}

/// `GET /stream?presignedURL=<url>`: HTML page playing the given manifest URL.
pub async fn stream_page(
    Query(query): Query<StreamPageQuery>,
) -> Result<impl IntoResponse, HttpAppError> {
    let url = query
        .presigned_url
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::MissingParameter("presignedURL".to_string()))?;

    Ok(Html(render_player_page(&url)))
}

fn render_player_page(source_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>HLS Video Streaming</title>
    <link href="https://vjs.zencdn.net/7.18.1/video-js.css" rel="stylesheet">
</head>
<body>
    <h1>HLS Video Streaming with Video.js</h1>
    <video id="player" class="video-js vjs-default-skin" controls preload="auto" width="640" height="264">
        <source src="{}" type="application/x-mpegURL">
        <p class="vjs-no-js">
            To view this video please enable JavaScript, and consider upgrading to a web browser that
            <a href="https://videojs.com/html5-video-support/" target="_blank">supports HTML5 video</a>
        </p>
    </video>
    <script src="https://vjs.zencdn.net/7.18.1/video.min.js"></script>
    <script>
        var player = videojs('player');
    </script>
</body>
</html>
"#,
        escape_attribute(source_url)
    )
}

fn escape_attribute(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
