//! Entity → SDK model conversion.
//!
//! Addresses are returned with their city, translated city label and owner
//! already resolved. The related rows are batch-loaded once per result set.

use std::collections::{BTreeSet, HashMap};

use addresses_sdk::{Address, CitySummary, OwnerSummary};
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::infra::storage::entity::{address, city, city_translation, user};

/// City label for `locale`, falling back to the first translation by
/// language code.
fn pick_labels(
    translations: Vec<city_translation::Model>,
    locale: &str,
) -> HashMap<Uuid, String> {
    let mut labels = HashMap::new();
    for t in translations {
        if t.language_code == locale {
            labels.insert(t.record_id, t.label);
        } else {
            labels.entry(t.record_id).or_insert(t.label);
        }
    }
    labels
}

#[must_use]
pub fn full_address(address_line: &str, city_label: Option<&str>) -> String {
    match city_label {
        Some(label) => format!("{address_line}, {label}"),
        None => address_line.to_owned(),
    }
}

pub async fn hydrate<C: ConnectionTrait>(
    conn: &C,
    locale: &str,
    rows: Vec<address::Model>,
) -> Result<Vec<Address>, DbErr> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let city_ids: Vec<Uuid> = rows
        .iter()
        .map(|r| r.city_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let user_ids: Vec<Uuid> = rows
        .iter()
        .map(|r| r.user_id)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let cities: HashMap<Uuid, city::Model> = city::Entity::find()
        .filter(city::Column::Id.is_in(city_ids.clone()))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| (c.id, c))
        .collect();

    let translations = city_translation::Entity::find()
        .filter(city_translation::Column::RecordId.is_in(city_ids))
        .order_by_asc(city_translation::Column::LanguageCode)
        .all(conn)
        .await?;
    let labels = pick_labels(translations, locale);

    let emails: HashMap<Uuid, String> = user::Entity::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, u.email))
        .collect();

    Ok(rows
        .into_iter()
        .map(|row| {
            let label = labels.get(&row.city_id).cloned();
            let city = cities.get(&row.city_id).map(|c| CitySummary {
                id: c.id,
                country_id: c.country_id.clone(),
                label: label.clone(),
            });
            let owner = emails.get(&row.user_id).map(|email| OwnerSummary {
                id: row.user_id,
                email: email.clone(),
            });

            Address {
                id: row.id,
                full_address: full_address(&row.address_line, label.as_deref()),
                country_id: city.as_ref().map(|c| c.country_id.clone()),
                label: row.label,
                address_line: row.address_line,
                postal_code: row.postal_code,
                city_id: row.city_id,
                user_id: row.user_id,
                city,
                owner,
                created_at: row.created_at,
                updated_at: row.updated_at,
                deleted_at: row.deleted_at,
            }
        })
        .collect())
}
