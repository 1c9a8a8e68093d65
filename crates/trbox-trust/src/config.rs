//! Partitioning configuration.

/// Options controlling how external calls are partitioned.
///
/// Every field is optional; `None` falls back to the documented default.
#[derive(Debug, Clone, Default)]
pub struct PartitionConfig {
    /// Replace calls found in the objective too. Default: `true`.
    pub scan_objective: Option<bool>,
    /// Accept call arguments that reference no variables. Default: `false`.
    pub allow_constant_arguments: Option<bool>,
    /// Give new output placeholders the black-box value at the current
    /// point when every input has a value. Default: `true`.
    pub initialize_outputs: Option<bool>,
}

impl PartitionConfig {
    /// Create a new configuration with all defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_scan_objective(mut self, enabled: bool) -> Self {
        self.scan_objective = Some(enabled);
        self
    }

    pub fn with_allow_constant_arguments(mut self, enabled: bool) -> Self {
        self.allow_constant_arguments = Some(enabled);
        self
    }

    pub fn with_initialize_outputs(mut self, enabled: bool) -> Self {
        self.initialize_outputs = Some(enabled);
        self
    }

    pub fn scans_objective(&self) -> bool {
        self.scan_objective.unwrap_or(true)
    }

    pub fn allows_constant_arguments(&self) -> bool {
        self.allow_constant_arguments.unwrap_or(false)
    }

    pub fn initializes_outputs(&self) -> bool {
        self.initialize_outputs.unwrap_or(true)
    }

    /// Check if this configuration is completely empty (all defaults).
    pub fn is_empty(&self) -> bool {
        self.scan_objective.is_none()
            && self.allow_constant_arguments.is_none()
            && self.initialize_outputs.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new_is_empty() {
        let config = PartitionConfig::new();
        assert!(config.is_empty());
        assert!(config.scans_objective());
        assert!(!config.allows_constant_arguments());
        assert!(config.initializes_outputs());
    }

    #[test]
    fn test_config_builder_pattern() {
        let config = PartitionConfig::new()
            .with_scan_objective(false)
            .with_allow_constant_arguments(true)
            .with_initialize_outputs(false);

        assert!(!config.is_empty());
        assert!(!config.scans_objective());
        assert!(config.allows_constant_arguments());
        assert!(!config.initializes_outputs());
    }

    #[test]
    fn test_config_partial_is_not_empty() {
        let config = PartitionConfig::new().with_allow_constant_arguments(true);
        assert!(!config.is_empty());
        assert_eq!(config.scan_objective, None);
    }
}
