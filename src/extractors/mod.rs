//! Request extractors that reject with [`crate::error::AppError`] so every failure is a JSON error body.

mod current_user;
mod json;
mod path;

pub use current_user::CurrentUser;
pub use json::ApiJson;
pub use path::IdPath;
