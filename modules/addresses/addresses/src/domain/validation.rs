//! Request rules for address writes and batch lifecycle operations.
//!
//! Rules are checked together and every violation is reported at once,
//! keyed by field name, before anything touches the database.

use std::collections::BTreeMap;

use addresses_sdk::{NewAddress, UpdateAddress};
use uuid::Uuid;

pub const POSTAL_CODE_MAX_LEN: usize = 20;

/// Field name to messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.into());
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }

    #[must_use]
    pub fn into_map(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{field}: {}", messages.join(", "))?;
        }
        Ok(())
    }
}

fn required(field: &str) -> String {
    format!("The {field} field is required.")
}

/// Unvalidated address payload, shared by create and update.
///
/// Every field is optional here so that missing values are reported as
/// rule violations rather than as decoding failures.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressDraft {
    pub id: Option<Uuid>,
    pub label: Option<String>,
    pub address_line: Option<String>,
    pub postal_code: Option<String>,
    pub city_id: Option<Uuid>,
    pub user_id: Option<Uuid>,
}

impl From<NewAddress> for AddressDraft {
    fn from(new: NewAddress) -> Self {
        Self {
            id: new.id,
            label: new.label,
            address_line: Some(new.address_line),
            postal_code: Some(new.postal_code),
            city_id: Some(new.city_id),
            user_id: Some(new.user_id),
        }
    }
}

impl From<UpdateAddress> for AddressDraft {
    fn from(update: UpdateAddress) -> Self {
        Self {
            id: None,
            label: update.label,
            address_line: Some(update.address_line),
            postal_code: Some(update.postal_code),
            city_id: Some(update.city_id),
            user_id: Some(update.user_id),
        }
    }
}

impl AddressDraft {
    /// City referenced by the draft, if any; the caller resolves its
    /// existence before calling [`AddressDraft::validate`].
    #[must_use]
    pub fn city_id(&self) -> Option<Uuid> {
        self.city_id
    }

    /// Apply the address rules.
    ///
    /// # Errors
    /// Returns every violated rule keyed by field.
    pub fn validate(self, city_exists: bool) -> Result<UpdateAddress, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let address_line = self
            .address_line
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());
        if address_line.is_none() {
            errors.add("address_line", required("address_line"));
        }

        let postal_code = self
            .postal_code
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());
        match &postal_code {
            None => errors.add("postal_code", required("postal_code")),
            Some(code) if code.chars().count() > POSTAL_CODE_MAX_LEN => errors.add(
                "postal_code",
                format!(
                    "The postal_code may not be greater than {POSTAL_CODE_MAX_LEN} characters."
                ),
            ),
            Some(_) => {}
        }

        match self.city_id {
            None => errors.add("city_id", required("city_id")),
            Some(_) if !city_exists => errors.add("city_id", "The selected city_id is invalid."),
            Some(_) => {}
        }

        if self.user_id.is_none() {
            errors.add("user", required("user"));
        }

        let label = self
            .label
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty());

        match (address_line, postal_code, self.city_id, self.user_id) {
            (Some(address_line), Some(postal_code), Some(city_id), Some(user_id))
                if errors.is_empty() =>
            {
                Ok(UpdateAddress {
                    label,
                    address_line,
                    postal_code,
                    city_id,
                    user_id,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Check the id list of a batch lifecycle request.
///
/// # Errors
/// Returns a `list` violation when the list is absent or empty.
pub fn check_ids(list: Option<Vec<Uuid>>) -> Result<Vec<Uuid>, ValidationErrors> {
    match list {
        Some(ids) if !ids.is_empty() => Ok(ids),
        _ => {
            let mut errors = ValidationErrors::new();
            errors.add("list", required("list"));
            Err(errors)
        }
    }
}
