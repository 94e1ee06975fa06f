use super::{found, some, IdResponse, ListResponse, OneResponse};
use crate::error::ErrorBody;
use crate::extractors::{ApiJson, CurrentUser, IdPath};
use crate::models::{ActualizarMesa, Mesa, MesaDisponible, NuevaMesa};
use crate::response::{changed, created, success_many, success_one_ok, RowId, SuccessMany, SuccessOne};
use crate::service::{MesaService, Validate};
use crate::state::AppState;
use axum::extract::State;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/mesas",
    responses(
        (status = 200, description = "All tables, deleted ones included", body = SuccessMany<Mesa>),
        (status = 401, description = "Invalid token", body = ErrorBody),
        (status = 403, description = "Missing token", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "mesas"
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ListResponse<Mesa> {
    Ok(success_many(MesaService::list(&state.pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/mesasDisp",
    responses((status = 200, description = "Tables open for booking", body = SuccessMany<MesaDisponible>)),
    tag = "mesas"
)]
#[instrument(skip(state))]
pub async fn disponibles(State(state): State<AppState>) -> ListResponse<MesaDisponible> {
    Ok(success_many(MesaService::list_disponibles(&state.pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/mesas/{id}",
    params(("id" = i32, Path, description = "pk_id_mesa")),
    responses(
        (status = 200, body = SuccessOne<Mesa>),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "mesas"
)]
#[instrument(skip(state))]
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> OneResponse<Mesa> {
    let mesa = some(MesaService::get(&state.pool, id).await?, "mesa", id)?;
    Ok(success_one_ok(mesa))
}

#[utoipa::path(
    post,
    path = "/api/mesas",
    request_body = NuevaMesa,
    responses(
        (status = 201, description = "Table created as Disponible", body = SuccessOne<RowId>),
        (status = 400, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "mesas"
)]
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    ApiJson(body): ApiJson<NuevaMesa>,
) -> IdResponse {
    body.validate()?;
    let id = MesaService::create(&state.pool, &body).await?;
    tracing::info!(mesa = id, by = %user.usuario, "mesa created");
    Ok(created(id, "Mesa creada"))
}

#[utoipa::path(
    put,
    path = "/api/mesas/{id}",
    params(("id" = i32, Path, description = "pk_id_mesa")),
    request_body = ActualizarMesa,
    responses(
        (status = 200, body = SuccessOne<RowId>),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "mesas"
)]
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<ActualizarMesa>,
) -> IdResponse {
    body.validate()?;
    found(MesaService::update(&state.pool, id, &body).await?, "mesa", id)?;
    Ok(changed(id, "Mesa actualizada"))
}

#[utoipa::path(
    delete,
    path = "/api/mesas/{id}",
    params(("id" = i32, Path, description = "pk_id_mesa")),
    responses(
        (status = 200, description = "Marked Eliminada", body = SuccessOne<RowId>),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "mesas"
)]
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> IdResponse {
    found(MesaService::soft_delete(&state.pool, id).await?, "mesa", id)?;
    Ok(changed(id, "Mesa eliminada"))
}
