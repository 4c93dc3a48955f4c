//! Search configuration.

/// Tunable knobs for one [`Engine`](crate::Engine).
///
/// The defaults are what the engine plays with; tests and the harness
/// override individual fields through the `with_*` builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest iteration the controller will start.
    pub max_depth: u8,
    /// Stop once `elapsed × time_restriction` exceeds the time left at turn start.
    pub time_restriction: u32,
    /// Whether checks and pawn pushes to the penultimate rank extend the search.
    pub extensions: bool,
    /// Total extension plies allowed along a single line.
    pub max_extensions: u8,
    /// The clock is only consulted at nodes whose remaining depth is greater than this.
    pub time_check_depth: u8,
}

impl SearchConfig {
    pub const DEFAULT_MAX_DEPTH: u8 = 128;
    pub const DEFAULT_TIME_RESTRICTION: u32 = 30;
    pub const DEFAULT_MAX_EXTENSIONS: u8 = 16;
    pub const DEFAULT_TIME_CHECK_DEPTH: u8 = 2;

    pub fn with_max_depth(mut self, max_depth: u8) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_time_restriction(mut self, restriction: u32) -> Self {
        self.time_restriction = restriction;
        self
    }

    pub fn with_extensions(mut self, enabled: bool) -> Self {
        self.extensions = enabled;
        self
    }

    pub fn with_max_extensions(mut self, max_extensions: u8) -> Self {
        self.max_extensions = max_extensions;
        self
    }

    pub fn with_time_check_depth(mut self, depth: u8) -> Self {
        self.time_check_depth = depth;
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
            time_restriction: Self::DEFAULT_TIME_RESTRICTION,
            extensions: true,
            max_extensions: Self::DEFAULT_MAX_EXTENSIONS,
            time_check_depth: Self::DEFAULT_TIME_CHECK_DEPTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.max_depth, 128);
        assert_eq!(config.time_restriction, 30);
        assert!(config.extensions);
        assert_eq!(config.max_extensions, 16);
        assert_eq!(config.time_check_depth, 2);
    }

    #[test]
    fn builders_override_single_fields() {
        let config = SearchConfig::default()
            .with_max_depth(4)
            .with_extensions(false);
        assert_eq!(config.max_depth, 4);
        assert!(!config.extensions);
        assert_eq!(config.time_restriction, 30);
    }

    #[test]
    fn time_and_extension_builders() {
        let config = SearchConfig::default()
            .with_time_restriction(10)
            .with_max_extensions(0)
            .with_time_check_depth(0);
        assert_eq!(config.time_restriction, 10);
        assert_eq!(config.max_extensions, 0);
        assert_eq!(config.time_check_depth, 0);
        assert!(config.extensions);
    }
}
