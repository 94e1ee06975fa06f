use super::{found, some, IdResponse, ListResponse, OneResponse};
use crate::error::ErrorBody;
use crate::extractors::{ApiJson, IdPath};
use crate::models::{ActualizarEmpleado, Empleado, EmpleadoFila, NuevoEmpleado};
use crate::response::{changed, created, success_many, success_one_ok, RowId, SuccessMany, SuccessOne};
use crate::service::{EmpleadoService, Validate};
use crate::state::AppState;
use axum::extract::State;
use tracing::instrument;

#[utoipa::path(
    get,
    path = "/api/empleados",
    responses((status = 200, body = SuccessMany<Empleado>)),
    security(("bearer" = [])),
    tag = "empleados"
)]
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> ListResponse<Empleado> {
    Ok(success_many(EmpleadoService::list(&state.pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/empleadosTabla",
    responses((status = 200, description = "Compact rows for the staff table", body = SuccessMany<EmpleadoFila>)),
    security(("bearer" = [])),
    tag = "empleados"
)]
#[instrument(skip(state))]
pub async fn tabla(State(state): State<AppState>) -> ListResponse<EmpleadoFila> {
    Ok(success_many(EmpleadoService::tabla(&state.pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/empleados/{id}",
    params(("id" = i32, Path, description = "pk_id_empleado")),
    responses((status = 200, body = SuccessOne<Empleado>), (status = 404, body = ErrorBody)),
    security(("bearer" = [])),
    tag = "empleados"
)]
#[instrument(skip(state))]
pub async fn get(State(state): State<AppState>, IdPath(id): IdPath) -> OneResponse<Empleado> {
    let empleado = some(EmpleadoService::get(&state.pool, id).await?, "empleado", id)?;
    Ok(success_one_ok(empleado))
}

#[utoipa::path(
    post,
    path = "/api/empleados",
    request_body = NuevoEmpleado,
    responses(
        (status = 201, description = "User and employee rows created", body = SuccessOne<RowId>),
        (status = 400, description = "Invalid body or unknown puesto", body = ErrorBody),
        (status = 409, description = "Login name taken", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "empleados"
)]
#[instrument(skip_all, fields(usuario = %body.usuario, puesto = %body.puesto))]
pub async fn create(State(state): State<AppState>, ApiJson(body): ApiJson<NuevoEmpleado>) -> IdResponse {
    body.validate()?;
    let id = EmpleadoService::create(&state.pool, &body).await?;
    Ok(created(id, "Empleado creado"))
}

#[utoipa::path(
    put,
    path = "/api/empleados/{id}",
    params(("id" = i32, Path, description = "pk_id_empleado")),
    request_body = ActualizarEmpleado,
    responses(
        (status = 200, body = SuccessOne<RowId>),
        (status = 400, body = ErrorBody),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "empleados"
)]
#[instrument(skip(state, body))]
pub async fn update(
    State(state): State<AppState>,
    IdPath(id): IdPath,
    ApiJson(body): ApiJson<ActualizarEmpleado>,
) -> IdResponse {
    body.validate()?;
    found(EmpleadoService::update(&state.pool, id, &body).await?, "empleado", id)?;
    Ok(changed(id, "Empleado actualizado"))
}

#[utoipa::path(
    delete,
    path = "/api/empleados/{id}",
    params(("id" = i32, Path, description = "pk_id_empleado")),
    responses(
        (status = 200, description = "Employee and its user deactivated", body = SuccessOne<RowId>),
        (status = 404, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = "empleados"
)]
#[instrument(skip(state))]
pub async fn delete(State(state): State<AppState>, IdPath(id): IdPath) -> IdResponse {
    found(EmpleadoService::deactivate(&state.pool, id).await?, "empleado", id)?;
    Ok(changed(id, "Empleado desactivado"))
}
