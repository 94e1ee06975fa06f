//! Row structs, status enums, and request/response bodies per entity.

#[macro_use]
mod status;

pub mod empleado;
pub mod horario;
pub mod mesa;
pub mod reservacion;
pub mod usuario;

pub use empleado::*;
pub use horario::*;
pub use mesa::*;
pub use reservacion::*;
pub use status::UnknownStatus;
pub use usuario::*;
