//! Per-entity services over `PgPool`, and request body validation.

mod empleados;
mod horarios;
mod mesas;
mod reservaciones;
mod usuarios;
mod validation;

pub use empleados::EmpleadoService;
pub use horarios::HorarioService;
pub use mesas::MesaService;
pub use reservaciones::ReservacionService;
pub use usuarios::UsuarioService;
pub use validation::Validate;
