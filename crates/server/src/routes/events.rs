//! Realtime change feed over Server-Sent Events.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::Sse;
use axum::response::sse::{Event, KeepAlive};
use tokio::sync::broadcast::error::RecvError;

use crate::state::AppState;

/// GET /api/events
///
/// Streams every change published after the connection was opened, one SSE
/// event per change, named after the collection's channel
/// (`productUpdate` / `orderUpdate` / `reviewUpdate`). Subscribers that
/// need current state do the initial REST fetch; there is no replay.
pub async fn subscribe(
    State(state): State<AppState>,
) -> Sse<impl futures::Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.events().subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(change) => {
                    let data = serde_json::to_string(&change).unwrap_or_else(|_| {
                        r#"{"error":"failed to serialize event"}"#.to_string()
                    });
                    yield Ok::<Event, Infallible>(
                        Event::default().event(change.channel()).data(data),
                    );
                }
                Err(RecvError::Lagged(skipped)) => {
                    // At-most-once delivery: a slow consumer just misses
                    // events, it is never caught up retroactively.
                    tracing::warn!(skipped, "event subscriber lagged, dropping events");
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
