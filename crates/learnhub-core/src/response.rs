use serde::Serialize;

/// Success envelope: `{ "success": true, "message"?: ..., "data"?: ... }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_shapes() {
        let with_data = serde_json::to_value(ApiResponse::data(json!({"id": 1}))).unwrap();
        assert_eq!(with_data, json!({"success": true, "data": {"id": 1}}));

        let message_only = serde_json::to_value(ApiResponse::message("Course deleted successfully")).unwrap();
        assert_eq!(
            message_only,
            json!({"success": true, "message": "Course deleted successfully"})
        );
    }
}
