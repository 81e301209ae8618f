use utoipa::OpenApi;

use crate::api::rest::dto::{
    AddressDto, AddressEvent, AddressPageDto, AddressReq, CityDto, ListIdsReq, OptionDto,
    OwnerDto, OwnerRef, ProcessedIdsDto, SortFieldDto, SortOrderDto, TrashedDto,
};
use crate::api::rest::error::Problem;
use crate::api::rest::form::{
    FieldOption, FieldType, FormButtons, FormDescriptor, FormField, FormStructure, IndexAction,
    IndexConfig, SubmitButton, TableHeader,
};
use crate::api::rest::handlers;
use crate::api::rest::response::FrontendResponse;

/// OpenAPI document for the address admin endpoints. Paths are relative to
/// the configured admin prefix, which is set as the server URL at runtime.
#[derive(OpenApi)]
#[openapi(
    info(title = "HoneyComb Addresses admin API"),
    paths(
        handlers::index_page,
        handlers::list_addresses_page,
        handlers::list_addresses,
        handlers::address_options,
        handlers::address_form,
        handlers::create_address,
        handlers::delete_soft,
        handlers::delete_force,
        handlers::restore,
        handlers::get_address,
        handlers::update_address,
    ),
    components(schemas(
        AddressDto,
        AddressEvent,
        AddressPageDto,
        AddressReq,
        CityDto,
        ListIdsReq,
        OptionDto,
        OwnerDto,
        OwnerRef,
        ProcessedIdsDto,
        SortFieldDto,
        SortOrderDto,
        TrashedDto,
        Problem,
        FrontendResponse,
        FieldOption,
        FieldType,
        FormButtons,
        FormDescriptor,
        FormField,
        FormStructure,
        IndexAction,
        IndexConfig,
        SubmitButton,
        TableHeader,
    )),
    tags((name = "addresses", description = "Address administration"))
)]
pub struct ApiDoc;
