//! HTTP launch surface for external triggers (shortcut, quick-settings tile)
//! and the overlay's own callbacks:
//! - POST /capture/shortcut - shortcut launch with the capture grant
//! - POST /capture/quick-tile - quick-tile launch, same flow
//! - POST /capture/confirm - overlay user-start callback
//! - POST /capture/stop - overlay/user stop callback
//! - GET /capture/status - session state and stats
//! - GET /health - health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
