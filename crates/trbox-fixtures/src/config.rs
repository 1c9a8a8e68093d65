//! Fixture configuration.

use std::path::PathBuf;

/// Environment variable overriding the expected-results directory.
pub const RESULTS_DIR_ENV: &str = "TRBOX_RESULTS_DIR";

const DEFAULT_TOLERANCE: f64 = 1e-6;

/// Where expected results live and how closely values must match.
#[derive(Debug, Clone, Default)]
pub struct FixtureConfig {
    pub results_dir: Option<PathBuf>,
    pub tolerance: Option<f64>,
}

impl FixtureConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.results_dir = Some(dir.into());
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }

    /// Explicit directory, then `TRBOX_RESULTS_DIR`, then the bundled
    /// `results/` directory of this crate.
    pub fn results_dir(&self) -> PathBuf {
        if let Some(dir) = &self.results_dir {
            return dir.clone();
        }
        match std::env::var_os(RESULTS_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => bundled_results_dir(),
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(DEFAULT_TOLERANCE)
    }
}

fn bundled_results_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("results")
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn explicit_values_win() {
        let config = FixtureConfig::new()
            .with_results_dir("/tmp/expected")
            .with_tolerance(1e-3);
        assert_eq!(config.results_dir(), PathBuf::from("/tmp/expected"));
        assert_eq!(config.tolerance(), 1e-3);
    }

    #[test]
    fn default_tolerance() {
        assert_eq!(FixtureConfig::new().tolerance(), 1e-6);
    }

    #[test]
    fn bundled_dir_is_inside_crate() {
        assert!(bundled_results_dir().ends_with("results"));
        assert!(bundled_results_dir().join("LP_unique_duals.json").is_file());
    }
}
