use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
    routing::get,
    Router,
};
use futures_util::{Stream, StreamExt};
use tokio_stream::wrappers::BroadcastStream;

use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/events", get(stream_events))
}

/// GET /v1/events
/// Live feed of published variants, accepted orders and rejected prices
pub async fn stream_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let stream = BroadcastStream::new(state.events.subscribe()).filter_map(|result| async move {
        match result {
            Ok(event) => Some(Event::default().event(event.kind()).json_data(&event)),
            Err(err) => {
                // slow subscriber; missed events are not replayed
                tracing::warn!("Event stream lagged: {}", err);
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
