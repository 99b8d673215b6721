use serde::Serialize;

/// Plain message envelope returned by mutation endpoints.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome description.
    #[schema(example = "Food reserved successfully")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Validate that a required string field is present and non-empty.
///
/// Presence only, no length or format rules.
pub fn require_non_empty(value: &str, field: &str) -> Result<(), crate::error::AppError> {
    if value.trim().is_empty() {
        return Err(crate::error::AppError::Validation(format!(
            "{field} is required"
        )));
    }
    Ok(())
}
