use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum NimbusError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("renderer error: {0}")]
    Renderer(String),

    #[error("signal error: {0}")]
    Signal(String),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("visualizer.point_count must be > 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: visualizer.point_count must be > 0"
        );
    }

    #[test]
    fn nimbus_error_from_config() {
        let config_err = ConfigError::ParseError("bad toml".into());
        let err: NimbusError = config_err.into();
        assert!(matches!(err, NimbusError::Config(_)));
        assert!(err.to_string().contains("bad toml"));
    }

    #[test]
    fn nimbus_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: NimbusError = io_err.into();
        assert!(matches!(err, NimbusError::Io(_)));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn nimbus_error_other_variants() {
        let err = NimbusError::Renderer("no adapter".into());
        assert_eq!(err.to_string(), "renderer error: no adapter");

        let err = NimbusError::Signal("stdin closed".into());
        assert_eq!(err.to_string(), "signal error: stdin closed");

        let err = NimbusError::Other("something went wrong".into());
        assert_eq!(err.to_string(), "something went wrong");
    }
}
