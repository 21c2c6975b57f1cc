//! Application state shared by every handler.

use streamsign_services::StreamingService;

/// Immutable after startup; handlers receive it as `State<Arc<AppState>>`.
#[derive(Clone)]
pub struct AppState {
    pub streaming: StreamingService,
}
