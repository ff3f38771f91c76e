/// Domain-level validation failure: malformed wire payloads, unknown
/// action or status names.
///
/// Not-found and storage failures are owned by the metadata store
/// crate, broker failures by the broker crate; this crate only knows
/// about input that fails to mean anything.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Failure reported by the external transform capability.
///
/// The capability is opaque to the core: whatever went wrong inside the
/// codec or filesystem is flattened into a message plus an optional
/// source. The dispatcher maps this to `failed` status; it is never
/// process-fatal.
#[derive(Debug, thiserror::Error)]
#[error("Transform failed: {message}")]
pub struct TransformError {
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
