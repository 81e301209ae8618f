use sea_orm::entity::prelude::*;
use time::OffsetDateTime;
use uuid::Uuid;

/// Polymorphic owner link of an address. Rows go away with their address
/// through the `record_id` foreign key.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "hc_address_owner")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub count: i64,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub record_id: Uuid,
    pub owner_id: Uuid,
    pub owner_type: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::address::Entity",
        from = "Column::RecordId",
        to = "super::address::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Address,
}

impl ActiveModelBehavior for ActiveModel {}

impl Related<super::address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Address.def()
    }
}
