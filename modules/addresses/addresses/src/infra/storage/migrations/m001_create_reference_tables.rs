//! Region and user tables referenced by addresses.
//!
//! They belong to other modules; they are only created here when missing,
//! and never dropped.

use sea_orm_migration::prelude as mig;

use super::iden;

pub struct Migration;

impl mig::MigrationName for Migration {
    fn name(&self) -> &'static str {
        "m001_create_reference_tables"
    }
}

#[async_trait::async_trait]
impl mig::MigrationTrait for Migration {
    async fn up(&self, manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        manager
            .create_table(
                mig::Table::create()
                    .table(iden("hc_region_country"))
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(iden("id"))
                            .string_len(10)
                            .not_null()
                            .primary_key(),
                    )
                    .col(mig::ColumnDef::new(iden("label")).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                mig::Table::create()
                    .table(iden("hc_region_city"))
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(iden("id"))
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        mig::ColumnDef::new(iden("country_id"))
                            .string_len(10)
                            .not_null(),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_hc_region_city_country_id")
                            .from(iden("hc_region_city"), iden("country_id"))
                            .to(iden("hc_region_country"), iden("id"))
                            .on_delete(mig::ForeignKeyAction::Cascade)
                            .on_update(mig::ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                mig::Table::create()
                    .table(iden("hc_region_city_translation"))
                    .if_not_exists()
                    .col(mig::ColumnDef::new(iden("record_id")).uuid().not_null())
                    .col(
                        mig::ColumnDef::new(iden("language_code"))
                            .string_len(2)
                            .not_null(),
                    )
                    .col(mig::ColumnDef::new(iden("label")).string().not_null())
                    .primary_key(
                        mig::Index::create()
                            .col(iden("record_id"))
                            .col(iden("language_code")),
                    )
                    .foreign_key(
                        mig::ForeignKey::create()
                            .name("fk_hc_region_city_translation_record_id")
                            .from(iden("hc_region_city_translation"), iden("record_id"))
                            .to(iden("hc_region_city"), iden("id"))
                            .on_delete(mig::ForeignKeyAction::Cascade)
                            .on_update(mig::ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                mig::Table::create()
                    .table(iden("hc_user"))
                    .if_not_exists()
                    .col(
                        mig::ColumnDef::new(iden("id"))
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(mig::ColumnDef::new(iden("email")).string().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, _manager: &mig::SchemaManager) -> Result<(), mig::DbErr> {
        Ok(())
    }
}
