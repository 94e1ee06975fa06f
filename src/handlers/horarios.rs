use super::{found, some, IdResponse, ListResponse, OneResponse};
use crate::error::ErrorBody;
use crate::extractors::{ApiJson, IdPath};
use crate::models::{ActualizarHorario, Horario, HorarioDisponible, NuevoHorario};
use crate::response::{changed, created, success_many, success_one_ok, RowId, SuccessMany, SuccessOne};
use crate::service::HorarioService;
use crate::state::AppState;
use axum::extract::State;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/horarios",
    responses(
        (status = 200, description = "All time slots ordered by hora", body = SuccessMany<Horario>),
        (status = 403, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "horarios"
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ListResponse<Horario> {
    Ok(success_many(HorarioService::list(&state.pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/horariosDisp",
    responses((status = 200, description = "Slots open for booking", body = SuccessMany<HorarioDisponible>)),
    tag = "horarios"
)]
#[instrument(skip(state))]
pub async fn disponibles(State(state): State<AppState>) -> ListResponse<HorarioDisponible> {
    Ok(success_many(HorarioService::list_disponibles(&state.pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/horarios/{id}",
    params(("id" = i32, Path, description = "pk_id_horario")),
    responses((status = 200, body = SuccessOne<Horario>), (status = 404, body = ErrorBody)),
    security(("bearer" = [])),
    tag = "horarios"
)]
#[instrument(skip(state))]
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> OneResponse<Horario> {
    let horario = some(HorarioService::get(&state.pool, id).await?, "horario", id)?;
    Ok(success_one_ok(horario))
}

#[utoipa::path(
    post,
    path = "/api/horarios",
    request_body = NuevoHorario,
    responses((status = 201, body = SuccessOne<RowId>), (status = 400, body = ErrorBody)),
    security(("bearer" = [])),
    tag = "horarios"
)]
#[instrument(skip(state))]
pub async fn create(State(state): State<AppState>, ApiJson(body): ApiJson<NuevoHorario>) -> IdResponse {
    let id = HorarioService::create(&state.pool, &body).await?;
    Ok(created(id, "Horario creado"))
}

#[utoipa::path(
    put,
    path = "/api/horarios/{id}",
    params(("id" = i32, Path, description = "pk_id_horario")),
    request_body = ActualizarHorario,
    responses(
        (status = 200, body = SuccessOne<RowId>),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "horarios"
)]
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<ActualizarHorario>,
) -> IdResponse {
    found(HorarioService::update(&state.pool, id, &body).await?, "horario", id)?;
    Ok(changed(id, "Horario actualizado"))
}

#[utoipa::path(
    delete,
    path = "/api/horarios/{id}",
    params(("id" = i32, Path, description = "pk_id_horario")),
    responses((status = 200, description = "Marked Eliminado", body = SuccessOne<RowId>), (status = 404, body = ErrorBody)),
    security(("bearer" = [])),
    tag = "horarios"
)]
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> IdResponse {
    found(HorarioService::soft_delete(&state.pool, id).await?, "horario", id)?;
    Ok(changed(id, "Horario eliminado"))
}
