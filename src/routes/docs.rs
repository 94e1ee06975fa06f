//! OpenAPI document for the `/api` surface, served as JSON.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::{administrador, empleados, horarios, login, mesas, reservaciones, usuarios};
use crate::models::*;
use crate::response::{MetaCount, RowId};
use axum::{routing::get, Json, Router};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        login::login,
        mesas::list,
        mesas::disponibles,
        mesas::get,
        mesas::create,
        mesas::update,
        mesas::delete,
        horarios::list,
        horarios::disponibles,
        horarios::get,
        horarios::create,
        horarios::update,
        horarios::delete,
        reservaciones::list,
        reservaciones::get,
        reservaciones::create,
        reservaciones::update,
        reservaciones::cancel,
        empleados::list,
        empleados::tabla,
        empleados::get,
        empleados::create,
        empleados::update,
        empleados::delete,
        usuarios::list,
        usuarios::get,
        usuarios::create,
        usuarios::update,
        usuarios::delete,
        administrador::list,
        administrador::update,
    ),
    components(
        schemas(
            LoginRequest,
            LoginResponse,
            Mesa,
            MesaDisponible,
            MesaEstado,
            NuevaMesa,
            ActualizarMesa,
            Horario,
            HorarioDisponible,
            HorarioEstado,
            NuevoHorario,
            ActualizarHorario,
            ReservacionVista,
            ReservacionDetalle,
            EstatusReservacion,
            NuevaReservacion,
            ActualizarReservacion,
            Empleado,
            EmpleadoFila,
            NuevoEmpleado,
            ActualizarEmpleado,
            Usuario,
            NuevoUsuario,
            ActualizarUsuario,
            PerfilAdministrador,
            ActualizarAdministrador,
            RowId,
            MetaCount,
            ErrorBody,
            ErrorDetail,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login and bearer tokens"),
        (name = "mesas", description = "Restaurant tables"),
        (name = "horarios", description = "Bookable time slots"),
        (name = "reservaciones", description = "Reservations"),
        (name = "empleados", description = "Staff records"),
        (name = "usuarios", description = "User accounts"),
        (name = "administrador", description = "Administrator profiles"),
    ),
    info(title = "Reservaciones API", description = "Restaurant reservation backend")
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            use utoipa::openapi::security::*;
            components.add_security_scheme(
                "bearer",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /api-docs/openapi.json
pub fn docs_routes() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}
