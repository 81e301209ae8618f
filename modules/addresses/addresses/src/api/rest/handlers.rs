use std::sync::Arc;

use addresses_sdk::{AddressOption, LifecycleTransition};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Extension, Path, Query};
use axum::http::Uri;
use axum::response::IntoResponse;
use axum::Json;
use tracing::{field::Empty, info};
use utoipa::OpenApi;
use uuid::Uuid;

use crate::api::rest::dto::{
    AddressDto, AddressEvent, AddressPageDto, AddressReq, CreateParams, FormParams, ListIdsReq,
    ListParams, OptionDto, OptionsParams, ProcessedIdsDto,
};
use crate::api::rest::error::{ApiResult, Problem, domain_error_to_problem};
use crate::api::rest::form::{FormDescriptor, FormRequest, IndexConfig, build_form, build_index};
use crate::api::rest::openapi::ApiDoc;
use crate::api::rest::response::FrontendResponse;
use crate::api::rest::sse_adapter::SseBroadcaster;
use crate::config::AddressesConfig;
use crate::domain::error::DomainError;
use crate::module::ConcreteService;

type Svc = Arc<ConcreteService>;

/// Transactional operations answer failures with the error envelope; only
/// validation failures are reported as problems.
fn envelope_or_problem(e: DomainError, uri: &Uri) -> ApiResult<FrontendResponse> {
    match e {
        DomainError::Validation { .. } => Err(domain_error_to_problem(&e, uri.path())),
        other => Ok(FrontendResponse::error(other.raw_message())),
    }
}

async fn run_transition(
    svc: &Svc,
    uri: &Uri,
    kind: LifecycleTransition,
    req: ListIdsReq,
    message: &str,
) -> ApiResult<FrontendResponse> {
    match svc.transition(kind, req.list).await {
        Ok(ids) => Ok(FrontendResponse::success(message).with_data(&ProcessedIdsDto { ids })),
        Err(e) => envelope_or_problem(e, uri),
    }
}

/// Admin list page configuration
#[utoipa::path(
    get,
    path = "/address",
    tag = "addresses",
    responses((status = 200, description = "Index page configuration", body = IndexConfig))
)]
#[tracing::instrument(skip(cfg), fields(request_id = Empty))]
pub(crate) async fn index_page(Extension(cfg): Extension<Arc<AddressesConfig>>) -> Json<IndexConfig> {
    Json(build_index(&cfg.admin_prefix))
}

/// Paginated address list
#[utoipa::path(
    get,
    path = "/api/address",
    tag = "addresses",
    params(ListParams),
    responses(
        (status = 200, description = "Page of addresses", body = AddressPageDto),
        (status = 400, description = "Malformed query", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, params, uri), fields(request_id = Empty))]
pub(crate) async fn list_addresses_page(
    uri: Uri,
    Extension(svc): Extension<Svc>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<AddressPageDto>> {
    let Query(params) = params?;
    let page = svc
        .list_addresses_page(&params.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(page.into()))
}

/// Unpaginated address list
#[utoipa::path(
    get,
    path = "/api/address/list",
    tag = "addresses",
    params(ListParams),
    responses((status = 200, description = "Matching addresses", body = [AddressDto]))
)]
#[tracing::instrument(skip(svc, params, uri), fields(request_id = Empty))]
pub(crate) async fn list_addresses(
    uri: Uri,
    Extension(svc): Extension<Svc>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> ApiResult<Json<Vec<AddressDto>>> {
    let Query(params) = params?;
    let items = svc
        .list_addresses(&params.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(items.into_iter().map(AddressDto::from).collect()))
}

/// `{id, label}` options of one owner's addresses
#[utoipa::path(
    get,
    path = "/api/address/options",
    tag = "addresses",
    params(OptionsParams),
    responses((status = 200, description = "Options; empty without user_id", body = [OptionDto]))
)]
#[tracing::instrument(skip(svc, params, uri), fields(request_id = Empty))]
pub(crate) async fn address_options(
    uri: Uri,
    Extension(svc): Extension<Svc>,
    params: Result<Query<OptionsParams>, QueryRejection>,
) -> ApiResult<Json<Vec<OptionDto>>> {
    let Query(params) = params?;
    let options = svc
        .options(&params.into())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(options.into_iter().map(OptionDto::from).collect()))
}

/// Address form descriptor
#[utoipa::path(
    get,
    path = "/api/address/form",
    tag = "addresses",
    params(FormParams),
    responses((status = 200, description = "Form descriptor", body = FormDescriptor))
)]
#[tracing::instrument(skip(svc, cfg, params, uri), fields(request_id = Empty))]
pub(crate) async fn address_form(
    uri: Uri,
    Extension(svc): Extension<Svc>,
    Extension(cfg): Extension<Arc<AddressesConfig>>,
    params: Result<Query<FormParams>, QueryRejection>,
) -> ApiResult<Json<FormDescriptor>> {
    let Query(params) = params?;
    let countries = svc
        .country_options()
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;

    let req = FormRequest {
        edit: params.is_edit(),
        hc_new: params.wants_new_marker(),
    };
    Ok(Json(build_form(&cfg.admin_prefix, &cfg.locale, countries, &req)))
}

/// SSE endpoint returning a live stream of `AddressEvent`.
#[tracing::instrument(skip(sse), fields(request_id = Empty))]
pub(crate) async fn address_events(
    Extension(sse): Extension<SseBroadcaster<AddressEvent>>,
) -> impl IntoResponse {
    sse.sse_response()
}

/// OpenAPI document of the address endpoints, relative to the admin prefix.
#[tracing::instrument(skip(cfg), fields(request_id = Empty))]
pub(crate) async fn openapi_json(
    Extension(cfg): Extension<Arc<AddressesConfig>>,
) -> Json<utoipa::openapi::OpenApi> {
    let mut doc = ApiDoc::openapi();
    doc.servers = Some(vec![utoipa::openapi::Server::new(format!(
        "/{}",
        cfg.admin_prefix.trim_matches('/')
    ))]);
    Json(doc)
}

/// Create an address
#[utoipa::path(
    post,
    path = "/api/address",
    tag = "addresses",
    params(CreateParams),
    request_body = AddressReq,
    responses(
        (status = 200, description = "Created", body = FrontendResponse),
        (status = 400, description = "Rolled back; error envelope", body = FrontendResponse),
        (status = 422, description = "Validation failed", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, params, body, uri), fields(request_id = Empty))]
pub(crate) async fn create_address(
    uri: Uri,
    Extension(svc): Extension<Svc>,
    params: Result<Query<CreateParams>, QueryRejection>,
    body: Result<Json<AddressReq>, JsonRejection>,
) -> ApiResult<FrontendResponse> {
    let Query(params) = params?;
    let Json(req) = body?;
    let wants_options = req.wants_options() || params.hc_options.is_some();

    info!(wants_options, "Creating address");

    match svc.create_address(req.into_new_draft()).await {
        Ok(address) => {
            let response = FrontendResponse::success("Created");
            if wants_options {
                let option = OptionDto::from(AddressOption::from(&address));
                Ok(response.with_data(&option))
            } else {
                Ok(response)
            }
        }
        Err(e) => envelope_or_problem(e, &uri),
    }
}

/// Soft-delete addresses
#[utoipa::path(
    delete,
    path = "/api/address",
    tag = "addresses",
    request_body = ListIdsReq,
    responses(
        (status = 200, description = "Processed ids in `data.ids`", body = FrontendResponse),
        (status = 400, description = "Rolled back; error envelope", body = FrontendResponse),
        (status = 422, description = "Validation failed", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, body, uri), fields(request_id = Empty))]
pub(crate) async fn delete_soft(
    uri: Uri,
    Extension(svc): Extension<Svc>,
    body: Result<Json<ListIdsReq>, JsonRejection>,
) -> ApiResult<FrontendResponse> {
    let Json(req) = body?;
    run_transition(&svc, &uri, LifecycleTransition::SoftDelete, req, "Successfully deleted").await
}

/// Permanently delete addresses, trashed ones included
#[utoipa::path(
    delete,
    path = "/api/address/force",
    tag = "addresses",
    request_body = ListIdsReq,
    responses(
        (status = 200, description = "Processed ids in `data.ids`", body = FrontendResponse),
        (status = 400, description = "Rolled back; error envelope", body = FrontendResponse),
        (status = 422, description = "Validation failed", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, body, uri), fields(request_id = Empty))]
pub(crate) async fn delete_force(
    uri: Uri,
    Extension(svc): Extension<Svc>,
    body: Result<Json<ListIdsReq>, JsonRejection>,
) -> ApiResult<FrontendResponse> {
    let Json(req) = body?;
    run_transition(&svc, &uri, LifecycleTransition::ForceDelete, req, "Successfully deleted").await
}

/// Restore soft-deleted addresses
#[utoipa::path(
    post,
    path = "/api/address/restore",
    tag = "addresses",
    request_body = ListIdsReq,
    responses(
        (status = 200, description = "Processed ids in `data.ids`", body = FrontendResponse),
        (status = 400, description = "Rolled back; error envelope", body = FrontendResponse),
        (status = 422, description = "Validation failed", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, body, uri), fields(request_id = Empty))]
pub(crate) async fn restore(
    uri: Uri,
    Extension(svc): Extension<Svc>,
    body: Result<Json<ListIdsReq>, JsonRejection>,
) -> ApiResult<FrontendResponse> {
    let Json(req) = body?;
    run_transition(&svc, &uri, LifecycleTransition::Restore, req, "Successfully restored").await
}

/// Get one live address
#[utoipa::path(
    get,
    path = "/api/address/{id}",
    tag = "addresses",
    params(("id" = Uuid, Path, description = "Address id")),
    responses(
        (status = 200, description = "Address", body = AddressDto),
        (status = 404, description = "Not found", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, id, uri), fields(request_id = Empty))]
pub(crate) async fn get_address(
    uri: Uri,
    Extension(svc): Extension<Svc>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<Json<AddressDto>> {
    let Path(id) = id?;
    let address = svc
        .get_address(id)
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(Json(address.into()))
}

/// Replace an address
#[utoipa::path(
    put,
    path = "/api/address/{id}",
    tag = "addresses",
    params(("id" = Uuid, Path, description = "Address id")),
    request_body = AddressReq,
    responses(
        (status = 200, description = "Updated", body = FrontendResponse),
        (status = 404, description = "Not found", body = Problem),
        (status = 422, description = "Validation failed", body = Problem),
        (status = 500, description = "Storage failure", body = Problem),
    )
)]
#[tracing::instrument(skip(svc, id, body, uri), fields(request_id = Empty))]
pub(crate) async fn update_address(
    uri: Uri,
    Extension(svc): Extension<Svc>,
    id: Result<Path<Uuid>, PathRejection>,
    body: Result<Json<AddressReq>, JsonRejection>,
) -> ApiResult<FrontendResponse> {
    let Path(id) = id?;
    let Json(req) = body?;

    info!(address_id = %id, "Updating address");

    svc.update_address(id, req.into_update_draft())
        .await
        .map_err(|e| domain_error_to_problem(&e, uri.path()))?;
    Ok(FrontendResponse::success("Updated"))
}
