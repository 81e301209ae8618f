use std::convert::Infallible;
use std::time::Duration;

use axum::response::sse::{Event, KeepAlive, Sse};
use futures_util::{Stream, StreamExt};
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;

use crate::api::rest::dto::AddressEvent;
use crate::domain::events::AddressDomainEvent;
use crate::domain::ports::EventPublisher;

/// Fan-out of typed events to any number of SSE subscribers.
///
/// Slow subscribers that fall behind the channel capacity skip the missed
/// events instead of blocking publishers.
pub struct SseBroadcaster<T> {
    tx: broadcast::Sender<T>,
}

impl<T> Clone for SseBroadcaster<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T: Clone + Send + Serialize + 'static> SseBroadcaster<T> {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Send to current subscribers; events without subscribers are dropped.
    pub fn send(&self, value: T) {
        if self.tx.send(value).is_err() {
            tracing::trace!("No SSE subscribers, event dropped");
        }
    }

    pub fn subscribe_stream(&self) -> impl Stream<Item = T> + Send + 'static + use<T> {
        BroadcastStream::new(self.tx.subscribe()).filter_map(|item| async move {
            match item {
                Ok(value) => Some(value),
                Err(e) => {
                    tracing::debug!(error = %e, "SSE subscriber lagged");
                    None
                }
            }
        })
    }

    pub fn sse_response(
        &self,
    ) -> Sse<impl Stream<Item = Result<Event, Infallible>> + Send + 'static + use<T>> {
        let stream = self.subscribe_stream().map(|value| {
            let event = Event::default()
                .json_data(&value)
                .unwrap_or_else(|_| Event::default().comment("unserializable event"));
            Ok(event)
        });
        Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
    }
}

/// Adapter: domain events → REST SSE payloads
pub struct SseAddressEventPublisher {
    out: SseBroadcaster<AddressEvent>,
}

impl SseAddressEventPublisher {
    #[must_use]
    pub fn new(out: SseBroadcaster<AddressEvent>) -> Self {
        Self { out }
    }
}

impl EventPublisher<AddressDomainEvent> for SseAddressEventPublisher {
    fn publish(&self, event: &AddressDomainEvent) {
        self.out.send(AddressEvent::from(event));
    }
}
