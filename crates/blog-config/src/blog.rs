//! Listing and pagination settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default articles per page when the caller omits `pageSize`.
const fn default_page_size() -> u32 {
    10
}

/// Upper bound accepted for `pageSize`.
const fn default_max_page_size() -> u32 {
    100
}

/// Default articles per archive page.
const fn default_archive_page_size() -> u32 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlogSettings {
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    #[serde(default = "default_max_page_size")]
    pub max_page_size: u32,

    #[serde(default = "default_archive_page_size")]
    pub archive_page_size: u32,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            archive_page_size: default_archive_page_size(),
        }
    }
}

impl BlogSettings {
    /// Check that page sizes are positive and within `max_page_size`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_page_size == 0 {
            return Err(invalid("blog.max_page_size", "must be at least 1"));
        }
        for (field, value) in [
            ("blog.page_size", self.page_size),
            ("blog.archive_page_size", self.archive_page_size),
        ] {
            if value == 0 || value > self.max_page_size {
                return Err(invalid(
                    field,
                    &format!("must be between 1 and {}", self.max_page_size),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
