//! Session configuration.
//!
//! # Responsibility
//! - Provide defaults for the pending-command delay and list paging.
//! - Apply environment overrides with explicit normalization errors.
//!
//! # Invariants
//! - `default_page_size` is always one of `page_size_options`.
//! - Reading config never panics.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// Environment variable overriding the pending delay in milliseconds.
pub const PENDING_DELAY_ENV: &str = "DOCDESK_PENDING_DELAY_MS";
/// Environment variable overriding the initial rows per page.
pub const DEFAULT_PAGE_SIZE_ENV: &str = "DOCDESK_DEFAULT_PAGE_SIZE";

const DEFAULT_PENDING_DELAY_MS: u64 = 1_000;
const MAX_PENDING_DELAY_MS: u64 = 60_000;
const PAGE_SIZE_OPTIONS: [usize; 4] = [2, 5, 10, 20];

/// Configuration value rejected during normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Value is not an unsigned integer.
    NotANumber { key: &'static str, value: String },
    /// Delay exceeds the accepted ceiling.
    DelayTooLong { millis: u64, max: u64 },
    /// Page size is not one of the offered options.
    UnsupportedPageSize { value: usize, options: Vec<usize> },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber { key, value } => {
                write!(f, "`{key}` must be an unsigned integer, got `{value}`")
            }
            Self::DelayTooLong { millis, max } => {
                write!(f, "pending delay {millis}ms exceeds maximum {max}ms")
            }
            Self::UnsupportedPageSize { value, options } => {
                write!(f, "page size {value} is not one of {options:?}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Settings for one document session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pending_delay: Duration,
    page_size_options: Vec<usize>,
    default_page_size: usize,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            pending_delay: Duration::from_millis(DEFAULT_PENDING_DELAY_MS),
            page_size_options: PAGE_SIZE_OPTIONS.to_vec(),
            default_page_size: PAGE_SIZE_OPTIONS[0],
        }
    }
}

impl DeskConfig {
    /// Defaults with environment overrides applied.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides read through `lookup`.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = non_blank(lookup(PENDING_DELAY_ENV)) {
            let millis = parse_unsigned(PENDING_DELAY_ENV, &raw)?;
            config = config.with_pending_delay(Duration::from_millis(millis))?;
        }

        if let Some(raw) = non_blank(lookup(DEFAULT_PAGE_SIZE_ENV)) {
            let size = parse_unsigned(DEFAULT_PAGE_SIZE_ENV, &raw)?;
            let size = usize::try_from(size).unwrap_or(usize::MAX);
            config = config.with_default_page_size(size)?;
        }

        Ok(config)
    }

    /// Artificial delay between issuing and resolving a CRUD command.
    pub fn pending_delay(&self) -> Duration {
        self.pending_delay
    }

    /// Rows-per-page choices offered by the pager.
    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    /// Rows per page when the list first opens.
    pub fn default_page_size(&self) -> usize {
        self.default_page_size
    }

    /// Replaces the pending delay after range checking.
    pub fn with_pending_delay(mut self, delay: Duration) -> Result<Self, ConfigError> {
        let millis = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX);
        if millis > MAX_PENDING_DELAY_MS {
            return Err(ConfigError::DelayTooLong {
                millis,
                max: MAX_PENDING_DELAY_MS,
            });
        }
        self.pending_delay = delay;
        Ok(self)
    }

    /// Replaces the initial page size; must be an offered option.
    pub fn with_default_page_size(mut self, size: usize) -> Result<Self, ConfigError> {
        if !self.page_size_options.contains(&size) {
            return Err(ConfigError::UnsupportedPageSize {
                value: size,
                options: self.page_size_options.clone(),
            });
        }
        self.default_page_size = size;
        Ok(self)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
}

fn parse_unsigned(key: &'static str, raw: &str) -> Result<u64, ConfigError> {
    raw.parse::<u64>().map_err(|_| ConfigError::NotANumber {
        key,
        value: raw.to_string(),
    })
}
