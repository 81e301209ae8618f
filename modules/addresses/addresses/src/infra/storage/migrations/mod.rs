use sea_orm_migration::prelude as mig;

mod m001_create_reference_tables;
mod m002_create_addresses;
mod m003_create_address_owners;

pub struct Migrator;

#[async_trait::async_trait]
impl mig::MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn mig::MigrationTrait>> {
        vec![
            Box::new(m001_create_reference_tables::Migration),
            Box::new(m002_create_addresses::Migration),
            Box::new(m003_create_address_owners::Migration),
        ]
    }
}

fn iden(name: &str) -> mig::Alias {
    mig::Alias::new(name)
}
