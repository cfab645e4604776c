//! Error types for starsphere.
//!
//! Startup is the only place anything can fail: reading a scene config,
//! acquiring a GPU, or creating the window and event loop. Once the first
//! frame renders, per-frame surface errors are handled inside the render loop.

use std::path::PathBuf;

/// Errors that can occur during GPU initialization.
#[derive(Debug, thiserror::Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found, not even a software fallback.
    #[error("no compatible GPU adapter found; a Vulkan, Metal, DX12 or GL capable device is required")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The adapter cannot present to the window surface.
    #[error("the GPU adapter reports no usable formats for this window surface")]
    UnsupportedSurface,
}

/// Errors that can occur while loading or validating a [`SceneConfig`](crate::SceneConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The config file is not valid JSON for a scene config.
    #[error("failed to parse scene config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is outside the range the geometry generators accept.
    #[error("invalid scene config: {field} {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors that can occur when running the scene.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    /// Failed to create or run the event loop.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create the window.
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// The scene config was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = ConfigError::invalid("horizontal_rings.count", "must be at least 2, got 1");
        assert_eq!(
            err.to_string(),
            "invalid scene config: horizontal_rings.count must be at least 2, got 1"
        );
    }

    #[test]
    fn test_no_adapter_display() {
        let err = GpuError::NoAdapter;
        assert!(err.to_string().starts_with("no compatible GPU adapter found"));
    }

    #[test]
    fn test_run_error_wraps_config_transparently() {
        let err: RunError = ConfigError::invalid("stars[0].count", "must be positive").into();
        assert_eq!(
            err.to_string(),
            "invalid scene config: stars[0].count must be positive"
        );
    }

    #[test]
    fn test_parse_error_converts() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
