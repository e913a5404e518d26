use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use axum_helpers::{
    ObjectIdPath, ValidatedJson,
    errors::responses::{
        BadRequestObjectIdResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ShowResult;
use crate::models::{
    Address, ChecklistItem, CreatedShow, NewChecklistItem, NewShow, Show, ShowUpdate,
    parse_show_id,
};
use crate::repository::ShowRepository;
use crate::service::ShowService;

/// OpenAPI documentation for Shows API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_shows,
        create_show,
        get_show,
        update_show,
        delete_show,
        add_item,
        remove_item,
    ),
    components(
        schemas(Show, Address, ChecklistItem, NewShow, ShowUpdate, NewChecklistItem, CreatedShow),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestObjectIdResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Shows", description = "Live-event records and their checklists (MongoDB)")
    )
)]
pub struct ApiDoc;

/// Create the shows router; mount it under `/shows`
pub fn router<R: ShowRepository + 'static>(service: ShowService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_shows).post(create_show))
        .route("/{id}", get(get_show).put(update_show).delete(delete_show))
        .route("/{id}/items", post(add_item))
        .route("/{id}/items/{item_id}", delete(remove_item))
        .with_state(shared_service)
}

/// List every show
#[utoipa::path(
    get,
    path = "",
    tag = "Shows",
    responses(
        (status = 200, description = "All stored shows", body = Vec<Show>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_shows<R: ShowRepository>(
    State(service): State<Arc<ShowService<R>>>,
) -> ShowResult<Json<Vec<Show>>> {
    let shows = service.list_shows().await?;
    Ok(Json(shows))
}

/// Create a show
#[utoipa::path(
    post,
    path = "",
    tag = "Shows",
    request_body = NewShow,
    responses(
        (status = 201, description = "Show created", body = CreatedShow),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_show<R: ShowRepository>(
    State(service): State<Arc<ShowService<R>>>,
    ValidatedJson(input): ValidatedJson<NewShow>,
) -> ShowResult<impl IntoResponse> {
    let id = service.create_show(input).await?;
    Ok((StatusCode::CREATED, Json(CreatedShow { id })))
}

/// Get a show by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Shows",
    params(
        ("id" = String, Path, description = "Show ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Show found", body = Show),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_show<R: ShowRepository>(
    State(service): State<Arc<ShowService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ShowResult<Json<Show>> {
    let show = service.get_show(id).await?;
    Ok(Json(show))
}

/// Update the given fields of a show
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Shows",
    params(
        ("id" = String, Path, description = "Show ObjectId (24 hex characters)")
    ),
    request_body = ShowUpdate,
    responses(
        (status = 200, description = "Show updated", body = bool),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_show<R: ShowRepository>(
    State(service): State<Arc<ShowService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(update): ValidatedJson<ShowUpdate>,
) -> ShowResult<Json<bool>> {
    service.update_show(id, update).await?;
    Ok(Json(true))
}

/// Delete a show
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Shows",
    params(
        ("id" = String, Path, description = "Show ObjectId (24 hex characters)")
    ),
    responses(
        (status = 200, description = "Show deleted", body = bool),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_show<R: ShowRepository>(
    State(service): State<Arc<ShowService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
) -> ShowResult<Json<bool>> {
    service.delete_show(id).await?;
    Ok(Json(true))
}

/// Append a checklist item
#[utoipa::path(
    post,
    path = "/{id}/items",
    tag = "Shows",
    params(
        ("id" = String, Path, description = "Show ObjectId (24 hex characters)")
    ),
    request_body = NewChecklistItem,
    responses(
        (status = 200, description = "Show with the new item", body = Show),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn add_item<R: ShowRepository>(
    State(service): State<Arc<ShowService<R>>>,
    ObjectIdPath(id): ObjectIdPath,
    ValidatedJson(input): ValidatedJson<NewChecklistItem>,
) -> ShowResult<Json<Show>> {
    let show = service.add_item(id, input).await?;
    Ok(Json(show))
}

/// Remove a checklist item; unknown item ids leave the show unchanged
#[utoipa::path(
    delete,
    path = "/{id}/items/{item_id}",
    tag = "Shows",
    params(
        ("id" = String, Path, description = "Show ObjectId (24 hex characters)"),
        ("item_id" = String, Path, description = "Checklist item id")
    ),
    responses(
        (status = 200, description = "Show after removal", body = Show),
        (status = 400, response = BadRequestObjectIdResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn remove_item<R: ShowRepository>(
    State(service): State<Arc<ShowService<R>>>,
    Path((id, item_id)): Path<(String, String)>,
) -> ShowResult<Json<Show>> {
    let show_id = parse_show_id(&id)?;
    let show = service.remove_item(show_id, item_id).await?;
    Ok(Json(show))
}
