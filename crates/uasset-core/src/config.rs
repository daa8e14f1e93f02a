//! Parser configuration.

/// Default upper bound for any serialized element count
pub const DEFAULT_MAX_TABLE_LEN: usize = 16 * 1024 * 1024;

/// Configuration for [`crate::PackageParser`]
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Reject int32-encoded booleans that are neither 0 nor 1
    pub strict_bools: bool,
    /// Walk the property tag stream of every Blueprint export
    pub walk_blueprints: bool,
    /// Maximum element count accepted for any array (filters garbage)
    pub max_table_len: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            strict_bools: false,
            walk_blueprints: true,
            max_table_len: DEFAULT_MAX_TABLE_LEN,
        }
    }
}

impl ParserConfig {
    /// Creates a new parser config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether out-of-range booleans are an error
    pub fn strict_bools(mut self, strict: bool) -> Self {
        self.strict_bools = strict;
        self
    }

    /// Sets whether Blueprint exports get their tag streams walked
    pub fn walk_blueprints(mut self, walk: bool) -> Self {
        self.walk_blueprints = walk;
        self
    }

    /// Sets the maximum array element count
    pub fn max_table_len(mut self, len: usize) -> Self {
        self.max_table_len = len;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parser_config_builder() {
        let config = ParserConfig::new()
            .strict_bools(true)
            .walk_blueprints(false)
            .max_table_len(64);

        assert!(config.strict_bools);
        assert!(!config.walk_blueprints);
        assert_eq!(config.max_table_len, 64);
    }

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert!(!config.strict_bools);
        assert!(config.walk_blueprints);
        assert_eq!(config.max_table_len, DEFAULT_MAX_TABLE_LEN);
    }
}
