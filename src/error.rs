//! Error types

use thiserror::Error;

/// Failures raised while creating or driving the OS window
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The window class could not be registered
    #[error("failed to make window class: {0}")]
    ClassRegistration(String),

    /// The window handle could not be created
    #[error("failed to create window: {0}")]
    WindowCreation(String),
}

#[cfg(windows)]
impl WindowError {
    pub(crate) fn class_registration(err: windows::core::Error) -> Self {
        WindowError::ClassRegistration(err.to_string())
    }

    pub(crate) fn window_creation(err: windows::core::Error) -> Self {
        WindowError::WindowCreation(err.to_string())
    }
}

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_error_messages() {
        let err = WindowError::ClassRegistration("class already exists".into());
        assert_eq!(
            err.to_string(),
            "failed to make window class: class already exists"
        );

        let err = WindowError::WindowCreation("invalid size".into());
        assert_eq!(err.to_string(), "failed to create window: invalid size");
    }
}
