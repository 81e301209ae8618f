//! Static admin UI metadata: the address form descriptor and the index page
//! configuration. Rendering is up to the admin frontend.

use serde::Serialize;
use utoipa::ToSchema;

pub const PERMISSION_PREFIX: &str = "honey_comb_addresses_address_admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum FieldType {
    SingleLine,
    DropDownList,
    DropDownSearchable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldOption {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormField {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<FieldOption>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Fields whose value narrows this field's options.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
}

impl FormField {
    fn new(field_type: FieldType, label: Option<&str>) -> Self {
        Self {
            field_type,
            label: label.map(str::to_owned),
            required: false,
            options: None,
            url: None,
            dependencies: Vec::new(),
            new: None,
            search_url: None,
            original_label: None,
            value: None,
            hidden: false,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Form fields in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormStructure {
    pub label: FormField,
    pub country_id: FormField,
    pub city_id: FormField,
    pub address_line: FormField,
    pub postal_code: FormField,
    pub user: FormField,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hc_new: Option<FormField>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SubmitButton {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FormButtons {
    pub submit: SubmitButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FormDescriptor {
    pub storage_url: String,
    pub buttons: FormButtons,
    pub structure: FormStructure,
}

/// Inputs of the form descriptor that vary per request.
#[derive(Debug, Clone, Default)]
pub struct FormRequest {
    pub edit: bool,
    pub hc_new: bool,
}

fn admin_url(prefix: &str, path: &str) -> String {
    format!("/{}/{}", prefix.trim_matches('/'), path.trim_start_matches('/'))
}

#[must_use]
pub fn build_form(
    prefix: &str,
    locale: &str,
    countries: Vec<(String, String)>,
    req: &FormRequest,
) -> FormDescriptor {
    let mut country = FormField::new(FieldType::DropDownList, Some("Country")).required();
    country.options = Some(
        countries
            .into_iter()
            .map(|(id, label)| FieldOption { id, label })
            .collect(),
    );

    let mut city = FormField::new(FieldType::DropDownList, Some("City")).required();
    city.url = Some(admin_url(prefix, &format!("api/regions/city/options/{locale}")));
    city.dependencies = vec!["country_id".to_owned()];
    city.new = Some(admin_url(prefix, "api/form-manager/regions.city-new"));

    let mut user = FormField::new(FieldType::DropDownSearchable, Some("Owner")).required();
    user.search_url = Some(admin_url(prefix, "api/user/options"));
    user.original_label = Some("email".to_owned());

    let hc_new = req.hc_new.then(|| {
        let mut marker = FormField::new(FieldType::SingleLine, None).required();
        marker.value = Some("1".to_owned());
        marker.hidden = true;
        marker
    });

    FormDescriptor {
        storage_url: admin_url(prefix, "api/address"),
        buttons: FormButtons {
            submit: SubmitButton {
                label: if req.edit { "Update" } else { "Create" }.to_owned(),
            },
        },
        structure: FormStructure {
            label: FormField::new(FieldType::SingleLine, Some("Label")),
            country_id: country,
            city_id: city,
            address_line: FormField::new(FieldType::SingleLine, Some("Address line")).required(),
            postal_code: FormField::new(FieldType::SingleLine, Some("Postal code")).required(),
            user,
            hc_new,
        },
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TableHeader {
    pub key: String,
    #[serde(rename = "type")]
    pub header_type: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct IndexAction {
    pub name: String,
    pub permission: String,
}

/// Admin list page configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct IndexConfig {
    pub title: String,
    pub url: String,
    pub form: String,
    pub headers: Vec<TableHeader>,
    pub actions: Vec<IndexAction>,
}

#[must_use]
pub fn build_index(prefix: &str) -> IndexConfig {
    let headers = [
        ("label", "Label"),
        ("address_line", "Address line"),
        ("postal_code", "Postal code"),
        ("city.label", "City"),
    ]
    .into_iter()
    .map(|(key, label)| TableHeader {
        key: key.to_owned(),
        header_type: "text".to_owned(),
        label: label.to_owned(),
    })
    .collect();

    let actions = [
        ("search", "list"),
        ("new", "create"),
        ("update", "update"),
        ("delete", "delete"),
        ("restore", "restore"),
        ("forceDelete", "delete_force"),
    ]
    .into_iter()
    .map(|(name, permission)| IndexAction {
        name: name.to_owned(),
        permission: format!("{PERMISSION_PREFIX}_{permission}"),
    })
    .collect();

    IndexConfig {
        title: "Addresses".to_owned(),
        url: admin_url(prefix, "api/address"),
        form: admin_url(prefix, "api/address/form"),
        headers,
        actions,
    }
}
