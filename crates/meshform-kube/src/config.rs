//! Provider-level configuration
//!
//! An explicit value handed to each handler constructor. There is no
//! package-level singleton; two handlers can run with different
//! configurations in the same process.

/// Default field manager name for Server-Side Apply
pub const DEFAULT_FIELD_MANAGER: &str = "meshform";

/// Provider-wide apply defaults
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Field manager recorded against applied fields
    pub field_manager: String,

    /// Whether apply takes ownership of fields held by other managers
    pub force_conflicts: bool,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            field_manager: DEFAULT_FIELD_MANAGER.to_string(),
            force_conflicts: false,
        }
    }
}

impl ProviderConfig {
    /// Resolve effective apply options for one resource instance
    ///
    /// A `Some` override on the instance wins; `None` falls back to the
    /// provider default unchanged.
    pub fn apply_options(
        &self,
        field_manager: Option<&str>,
        force_conflicts: Option<bool>,
    ) -> ApplyOptions {
        ApplyOptions {
            field_manager: field_manager.unwrap_or(&self.field_manager).to_string(),
            force: force_conflicts.unwrap_or(self.force_conflicts),
        }
    }
}

/// Effective options for a single server-side-apply PATCH
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyOptions {
    pub field_manager: String,
    pub force: bool,
}
