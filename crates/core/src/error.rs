use thiserror::Error;

/// Failure raised by a layer callback.
#[derive(Debug, Error)]
pub enum LayerError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl LayerError {
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

/// Errors that stop the application loop.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("layer '{layer}' failed during update")]
    Layer {
        layer: String,
        #[source]
        source: LayerError,
    },
    #[error("window update failed: {0}")]
    Window(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn layer_error_keeps_source() {
        let err = CoreError::Layer {
            layer: "Sandbox".into(),
            source: LayerError::msg("shader missing"),
        };
        assert_eq!(err.to_string(), "layer 'Sandbox' failed during update");
        assert_eq!(
            err.source().map(ToString::to_string).as_deref(),
            Some("shader missing")
        );
    }

    #[test]
    fn boxed_errors_convert() {
        let io = std::io::Error::other("disk");
        let err = LayerError::from(Box::new(io) as Box<dyn std::error::Error + Send + Sync>);
        assert_eq!(err.to_string(), "disk");
    }
}
