//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct SuccessOne<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct SuccessMany<T> {
    pub data: Vec<T>,
    pub meta: MetaCount,
}

#[derive(Serialize, ToSchema)]
pub struct MetaCount {
    pub count: u64,
}

/// Id of the row a mutation touched.
#[derive(Serialize, ToSchema, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowId {
    pub id: i32,
}

pub fn success_one_ok<T: Serialize>(data: T) -> (StatusCode, Json<SuccessOne<T>>) {
    (StatusCode::OK, Json(SuccessOne { data, message: None }))
}

pub fn success_many<T: Serialize>(data: Vec<T>) -> (StatusCode, Json<SuccessMany<T>>) {
    let count = data.len() as u64;
    (
        StatusCode::OK,
        Json(SuccessMany {
            data,
            meta: MetaCount { count },
        }),
    )
}

/// 201 with the new row id and a confirmation message.
pub fn created(id: i32, message: &str) -> (StatusCode, Json<SuccessOne<RowId>>) {
    (
        StatusCode::CREATED,
        Json(SuccessOne {
            data: RowId { id },
            message: Some(message.to_string()),
        }),
    )
}

/// 200 for updates and soft deletes.
pub fn changed(id: i32, message: &str) -> (StatusCode, Json<SuccessOne<RowId>>) {
    (
        StatusCode::OK,
        Json(SuccessOne {
            data: RowId { id },
            message: Some(message.to_string()),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn many_counts_rows() {
        let (status, Json(body)) = success_many(vec![1, 2, 3]);
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.meta.count, 3);
    }

    #[test]
    fn created_carries_id_and_message() {
        let (status, Json(body)) = created(7, "Mesa agregada correctamente.");
        assert_eq!(status, StatusCode::CREATED);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["data"]["id"], 7);
        assert_eq!(json["message"], "Mesa agregada correctamente.");
    }

    #[test]
    fn ok_omits_message() {
        let (_, Json(body)) = success_one_ok(serde_json::json!({"hora": "13:00:00"}));
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("message").is_none());
    }
}
