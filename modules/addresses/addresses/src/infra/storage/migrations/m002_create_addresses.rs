use sea_orm_migration::prelude as mig;

use super::iden;

pub struct Migration;

impl mig::MigrationName for Migration {
    fn name(&self) -> &'static str {
        "m002_create_addresses"
    }
}

#[async_trait::async_trait]
impl mig::MigrationTrait for Migration {
    async fn up(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .create_table(
                mig::Table::create()
                    .table(iden("hc_address"))
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(iden("id"))
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(mig::ColumnDef::new(iden("label")).string().null())
                    .col(mig::ColumnDef::new(iden("address_line")).string().not_null())
                    .col(
                        mig::ColumnDef::new(iden("postal_code"))
                            .string_len(20)
                            .not_null(),
                    )
                    .col(mig::ColumnDef::new(iden("city_id")).uuid().not_null())
                    .col(mig::ColumnDef::new(iden("user_id")).uuid().not_null())
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
                    .col(
                        mig::ColumnDef::new(iden("deleted_at"))
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_hc_address_city_id")
                            .from(iden("hc_address"), iden("city_id"))
                            .to(iden("hc_region_city"), iden("id")),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_hc_address_user_id")
                            .from(iden("hc_address"), iden("user_id"))
                            .to(iden("hc_user"), iden("id")),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                mig::Index::create()
                    .name("idx_hc_address_user_id")
                    .table(iden("hc_address"))
                    .col(iden("user_id"))
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                mig::Index::create()
                    .name("idx_hc_address_deleted_at")
                    .table(iden("hc_address"))
                    .col(iden("deleted_at"))
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .drop_table(mig::Table::drop().table(iden("hc_address")).to_owned())
            .await
    }
}
