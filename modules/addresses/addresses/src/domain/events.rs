use addresses_sdk::Address;
use time::OffsetDateTime;
use uuid::Uuid;

/// Transport-agnostic domain events, emitted only after the owning
/// operation has committed.
#[derive(Debug, Clone)]
pub enum AddressDomainEvent {
    Created {
        address: Address,
        at: OffsetDateTime,
    },
    Updated {
        address: Address,
        at: OffsetDateTime,
    },
    SoftDeleted {
        ids: Vec<Uuid>,
        at: OffsetDateTime,
    },
    Restored {
        ids: Vec<Uuid>,
        at: OffsetDateTime,
    },
    ForceDeleted {
        ids: Vec<Uuid>,
        at: OffsetDateTime,
    },
}
