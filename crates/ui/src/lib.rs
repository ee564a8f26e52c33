//! # Care Admin UI
//!
//! Dioxus Desktop UI for the Care Admin panel.
//!
//! ## Features
//!
//! - One tab per registered table
//! - Record table with row selection and attachment thumbnails
//! - Create / update modal form built from the table schema
//! - Delete with confirmation
//! - Transient success and error banner
//!

// ============================================================================
// Modules
// ============================================================================

pub mod app;
pub mod components;
pub mod file_ops;
pub mod state;

// ============================================================================
// Re-exports
// ============================================================================

pub use careadmin_client;
pub use careadmin_view;

pub use app::App;
pub use file_ops::pick_upload;
pub use state::{
    APP_STATE, Admin, AppState, CONFIRM, DialogConfirm, PendingConfirm, UiStore, answer_confirm,
};

pub use components::{ConfirmDialog, DataTable, FormFieldInput, FormModal};

use careadmin_client::{AdminConfig, HttpTransport};
use careadmin_core::{AdminError, AdminResult};
use careadmin_schema::TableRegistry;
use std::sync::{Arc, OnceLock};

// ============================================================================
// Constants
// ============================================================================

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const NAME: &str = "Care Admin";

/// CSS styles for the application
const STYLES: &str = include_str!("../../../assets/styles/main.css");

// ============================================================================
// Runtime
// ============================================================================

/// What the root component needs from `main`
#[derive(Debug, Clone)]
pub struct Runtime {
    pub config: AdminConfig,
    pub registry: Arc<TableRegistry>,
    pub transport: Arc<HttpTransport>,
}

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// The runtime installed by `launch`
pub fn runtime() -> Option<&'static Runtime> {
    RUNTIME.get()
}

// ============================================================================
// Launch Function
// ============================================================================

/// Launch the Care Admin desktop application
///
/// Blocks until the window closes.
///
/// # Example
///
/// ```rust,ignore
/// let config = AdminConfig::from_env()?;
/// careadmin_ui::launch(config, TableRegistry::standard())?;
/// ```
pub fn launch(config: AdminConfig, registry: TableRegistry) -> AdminResult<()> {
    tracing::info!("Starting {} v{}", NAME, VERSION);

    let transport = Arc::new(HttpTransport::new(&config)?);
    let runtime = Runtime {
        config: config.clone(),
        registry: Arc::new(registry),
        transport,
    };
    RUNTIME
        .set(runtime)
        .map_err(|_| AdminError::InvalidConfig("application already launched".to_string()))?;

    let custom_head = format!(r#"<style type="text/css">{}</style>"#, STYLES);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(config.window_title.as_str())
                        .with_resizable(true)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(
                            config.window_width,
                            config.window_height,
                        ))
                        .with_min_inner_size(dioxus::desktop::LogicalSize::new(800.0, 600.0)),
                )
                .with_menu(None)
                .with_custom_head(custom_head),
        )
        .launch(App);

    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_styles_loaded() {
        assert!(!STYLES.is_empty());
        assert!(STYLES.contains(".data-table"));
        assert!(STYLES.contains(".banner.success"));
        assert!(STYLES.contains(".banner.error"));
    }
}
