use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Uniform success wrapper: `{ "success": true, "message": ..., "data": ... }`.
/// `data` is omitted when there is nothing to return (e.g. deletes).
#[derive(Serialize, Debug)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self { success: true, message: message.into(), data: Some(data) }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self { success: true, message: message.into(), data: None }
    }
}

/// Failure wrapper: `{ "success": false, "status": 404, "message": ..., "stack"?: ... }`.
#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub success: bool,
    pub status: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_includes_data() {
        let v = serde_json::to_value(ApiResponse::ok("fetched", vec![1, 2])).unwrap();
        assert_eq!(v, json!({"success": true, "message": "fetched", "data": [1, 2]}));
    }

    #[test]
    fn message_only_envelope_omits_data() {
        let v = serde_json::to_value(ApiResponse::message("deleted")).unwrap();
        assert_eq!(v, json!({"success": true, "message": "deleted"}));
    }

    #[test]
    fn error_body_omits_missing_stack() {
        let body = ErrorBody { success: false, status: 404, message: "Customer not found".into(), stack: None };
        let v = serde_json::to_value(body).unwrap();
        assert_eq!(v, json!({"success": false, "status": 404, "message": "Customer not found"}));
    }
}
