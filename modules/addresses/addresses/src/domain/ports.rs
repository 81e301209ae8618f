/// Output port for domain events.
///
/// Implementations must not block: publishing happens after commit on the
/// request path.
pub trait EventPublisher<E>: Send + Sync + 'static {
    fn publish(&self, event: &E);
}
