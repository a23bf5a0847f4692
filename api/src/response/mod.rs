use serde::Serialize;
use validator::ValidationErrors;

/// Envelope for every successful JSON response:
/// ```json
/// { "success": true, "data": { ... }, "message": "Session started" }
/// ```
///
/// Failures use [`crate::error::ApiError`] instead.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    /// Machine readable kind, e.g. `not_found`.
    pub error: &'static str,
    pub message: String,
}

/// Joins the messages of every failed field into one line.
pub fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(m) => m.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.join("; ")
}
