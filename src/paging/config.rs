//! Pager configuration.

use crate::core::ConfigError;
use crate::core::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// How a page decides that the list is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExhaustionPolicy {
    /// Fewer raw records than the page size.
    #[default]
    RawCount,
    /// Fewer displayable (post-discard) items than the page size.
    Displayable,
}

/// Pager configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerConfig {
    /// Records requested per page.
    pub page_size: usize,

    /// Records hydrated at once. Defaults to the page size.
    pub max_concurrent_lookups: Option<usize>,

    /// Exhaustion rule.
    pub exhaustion: ExhaustionPolicy,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_concurrent_lookups: None,
            exhaustion: ExhaustionPolicy::RawCount,
        }
    }
}

impl PagerConfig {
    /// Effective bound on concurrently hydrated records.
    pub fn lookup_limit(&self) -> usize {
        self.max_concurrent_lookups.unwrap_or(self.page_size)
    }

    /// Check the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        if self.page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::PageSizeTooLarge {
                requested: self.page_size,
                max: MAX_PAGE_SIZE,
            });
        }
        if self.max_concurrent_lookups == Some(0) {
            return Err(ConfigError::ZeroConcurrency);
        }
        Ok(())
    }

    /// Whether a page with these counts ends the list.
    pub fn is_last_page(&self, raw: usize, displayable: usize, has_cursor: bool) -> bool {
        let counted = match self.exhaustion {
            ExhaustionPolicy::RawCount => raw,
            ExhaustionPolicy::Displayable => displayable,
        };
        !has_cursor || counted < self.page_size
    }
}

/// Builder for [`PagerConfig`].
#[derive(Debug, Default)]
pub struct PagerConfigBuilder {
    config: PagerConfig,
}

impl PagerConfigBuilder {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page size.
    pub fn page_size(mut self, size: usize) -> Self {
        self.config.page_size = size;
        self
    }

    /// Bound concurrent hydration.
    pub fn max_concurrent_lookups(mut self, max: usize) -> Self {
        self.config.max_concurrent_lookups = Some(max);
        self
    }

    /// Set the exhaustion rule.
    pub fn exhaustion(mut self, policy: ExhaustionPolicy) -> Self {
        self.config.exhaustion = policy;
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<PagerConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}
