//! HTTP handlers.

pub mod health;
pub mod player;
pub mod playlist;

use serde::Deserialize;

/// `?name=<video>` as sent by players and links.
#[derive(Debug, Default, Deserialize)]
pub struct VideoNameQuery {
    pub name: Option<String>,
}
