pub mod addresses_sea_repo;
pub mod entity;
pub mod mapper;
pub mod migrations;
pub mod regions_sea_repo;

pub use addresses_sea_repo::OrmAddressesRepository;
pub use regions_sea_repo::OrmRegionsRepository;

/// Page size bounds applied to list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitCfg {
    pub default: u64,
    pub max: u64,
}

impl LimitCfg {
    /// Requested size, or the default, clamped to `1..=max`.
    #[must_use]
    pub fn per_page(self, requested: Option<u64>) -> u64 {
        requested.unwrap_or(self.default).clamp(1, self.max.max(1))
    }
}
