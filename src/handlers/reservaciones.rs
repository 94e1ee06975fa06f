use super::{found, some, IdResponse, ListResponse, OneResponse};
use crate::error::ErrorBody;
use crate::extractors::{ApiJson, CurrentUser, IdPath};
use crate::models::{ActualizarReservacion, NuevaReservacion, ReservacionDetalle, ReservacionVista};
use crate::response::{changed, created, success_many, success_one_ok, RowId, SuccessMany, SuccessOne};
use crate::service::{ReservacionService, Validate};
use crate::state::AppState;
use axum::extract::State;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/reservaciones",
    responses(
        (status = 200, description = "Reservations joined with client, table, and slot", body = SuccessMany<ReservacionVista>),
        (status = 403, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "reservaciones"
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ListResponse<ReservacionVista> {
    Ok(success_many(ReservacionService::list(&state.pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/reservaciones/{id}",
    params(("id" = i32, Path, description = "pk_id_reservacion")),
    responses((status = 200, body = SuccessOne<ReservacionDetalle>), (status = 404, body = ErrorBody)),
    security(("bearer" = [])),
    tag = "reservaciones"
)]
#[instrument(skip(state))]
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> OneResponse<ReservacionDetalle> {
    let row = some(ReservacionService::get(&state.pool, id).await?, "reservacion", id)?;
    Ok(success_one_ok(row))
}

/// Public: customers book without an account.
#[utoipa::path(
    post,
    path = "/api/reservaciones",
    request_body = NuevaReservacion,
    responses(
        (status = 201, description = "Reservation created; table and slot are now Ocupado", body = SuccessOne<RowId>),
        (status = 400, description = "Invalid body, unknown table or slot, party too large", body = ErrorBody),
        (status = 409, description = "Table or slot already taken", body = ErrorBody),
    ),
    tag = "reservaciones"
)]
#[instrument(skip(state, body), fields(mesa = %body.mesa, fecha = %body.fecha))]
pub async fn create(State(state): State<AppState>, ApiJson(body): ApiJson<NuevaReservacion>) -> IdResponse {
    body.validate()?;
    let id = ReservacionService::create(&state.pool, &body).await?;
    Ok(created(id, "Reservación creada"))
}

#[utoipa::path(
    put,
    path = "/api/reservaciones/{id}",
    params(("id" = i32, Path, description = "pk_id_reservacion")),
    request_body = ActualizarReservacion,
    responses(
        (status = 200, body = SuccessOne<RowId>),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
        (status = 409, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "reservaciones"
)]
#[instrument(skip(state, user, body))]
pub async fn update(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<ActualizarReservacion>,
) -> IdResponse {
    body.validate()?;
    found(ReservacionService::update(&state.pool, id, &body).await?, "reservacion", id)?;
    tracing::info!(reservacion = id, by = %user.usuario, "reservation edited");
    Ok(changed(id, "Reservación actualizada"))
}

#[utoipa::path(
    delete,
    path = "/api/reservaciones/{id}",
    params(("id" = i32, Path, description = "pk_id_reservacion")),
    responses(
        (status = 200, description = "Cancelled; table and slot released", body = SuccessOne<RowId>),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "reservaciones"
)]
#[instrument(skip(state))]
pub async fn cancel(State(state): State<AppState>, IdPath(id): IdPath) -> IdResponse {
    found(ReservacionService::cancel(&state.pool, id).await?, "reservacion", id)?;
    Ok(changed(id, "Reservación cancelada"))
}
