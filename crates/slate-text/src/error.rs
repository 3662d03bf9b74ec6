use thiserror::Error;

/// Failure reported by a host paint surface primitive.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct SurfaceError {
    message: String,
}

impl SurfaceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Errors from engine operations that touch host-owned resources.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The paint surface rejected a primitive. Nothing after the failing
    /// call was drawn and no engine or document state changed; the host may
    /// re-invoke the render after remediation.
    #[error("paint surface rejected a primitive: {0}")]
    Surface(#[from] SurfaceError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_surface_error_display() {
        let err = SurfaceError::new("context lost");
        assert_eq!(err.to_string(), "context lost");
        let render: RenderError = err.into();
        assert_eq!(
            render.to_string(),
            "paint surface rejected a primitive: context lost"
        );
    }
}
