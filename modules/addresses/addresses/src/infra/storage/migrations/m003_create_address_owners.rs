use sea_orm_migration::prelude as mig;

use super::iden;

pub struct Migration;

impl mig::MigrationName for Migration {
    fn name(&self) -> &'static str {
        "m003_create_address_owners"
    }
}

#[async_trait::async_trait]
impl mig::MigrationTrait for Migration {
    async fn up(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .create_table(
                mig::Table::create()
                    .table(iden("hc_address_owner"))
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(iden("count"))
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        mig::ColumnDef::new(iden("created_at"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        mig::ColumnDef::new(iden("updated_at"))
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(mig::ColumnDef::new(iden("record_id")).uuid().not_null())
                    .col(mig::ColumnDef::new(iden("owner_id")).uuid().not_null())
                    .col(mig::ColumnDef::new(iden("owner_type")).string().not_null())
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_hc_address_owner_record_id")
                            .from(iden("hc_address_owner"), iden("record_id"))
                            .to(iden("hc_address"), iden("id"))
                            .on_delete(mig::ForeignKeyAction::Cascade)
                            .on_update(mig::ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                mig::Index::create()
                    .name("idx_hc_address_owner_owner")
                    .table(iden("hc_address_owner"))
                    .col(iden("owner_id"))
                    .col(iden("owner_type"))
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                mig::Index::create()
                    .name("uq_hc_address_owner_record_owner")
                    .table(iden("hc_address_owner"))
                    .col(iden("record_id"))
                    .col(iden("owner_id"))
                    .col(iden("owner_type"))
                    .unique()
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .drop_table(
                mig::Table::drop()
                    .table(iden("hc_address_owner"))
                    .to_owned(),
            )
            .await
    }
}
