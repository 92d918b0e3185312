//! `/api/events`: one `solution` event per stored record.
//!
//! The payload is the JSON form of [`AppEvent`]; the browser reacts by
//! re-fetching `/api/solve/history` rather than patching its list.

use axum::response::sse::{Event, KeepAlive, Sse};
use axum::extract::State;
use futures_core::Stream;
use std::convert::Infallible;
use std::time::Duration;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::StreamExt;

use crate::state::{AppEvent, SharedState};

/// Streams [`AppEvent::SolutionCreated`] notices with a `ping` comment every 15s.
pub async fn sse_handler(
    State(state): State<SharedState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.subscribe();
    // Lagged receivers just skip what they missed.
    let stream = BroadcastStream::new(rx)
        .filter_map(|result| result.ok().and_then(solution_event).map(Ok));

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn solution_event(event: AppEvent) -> Option<Event> {
    let data = serde_json::to_string(&event).ok()?;
    Some(Event::default().event("solution").data(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use stepwise_common::ProblemType;

    #[test]
    fn test_solution_event_serializes_payload() {
        let event = AppEvent::SolutionCreated {
            id: uuid::Uuid::nil(),
            problem_type: ProblemType::CompoundInterest,
            created_at: chrono::Utc::now(),
        };
        assert!(solution_event(event).is_some());
    }
}
