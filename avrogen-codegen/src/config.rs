//! Generator configuration.

use crate::error::CodegenError;
use crate::naming;

/// Module name used when none is configured.
pub const DEFAULT_MODULE_NAME: &str = "generated";

/// Options for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    module_name: String,
    encoders: bool,
}

impl GenConfig {
    /// Creates a configuration emitting into the given module.
    #[must_use]
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            encoders: false,
        }
    }

    /// Enables or disables the root encoder helpers.
    #[must_use]
    pub fn encoders(mut self, enabled: bool) -> Self {
        self.encoders = enabled;
        self
    }

    /// Returns the configured module name.
    #[must_use]
    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    /// Returns true if encoder helpers are generated.
    #[must_use]
    pub const fn encoders_enabled(&self) -> bool {
        self.encoders
    }

    /// Returns the Rust identifier of the module.
    ///
    /// # Errors
    /// Returns `CodegenError::InvalidConfig` if the name cannot form an identifier.
    pub fn module_ident(&self) -> Result<String, CodegenError> {
        naming::module_ident(&self.module_name).ok_or_else(|| {
            CodegenError::invalid_config(format!(
                "module name '{}' is not a valid identifier",
                self.module_name
            ))
        })
    }
}

impl Default for GenConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MODULE_NAME)
    }
}
