//! General application configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Attach storage error detail to failure envelopes for unauthorized callers.
    ///
    /// Authorized callers always receive it.
    #[serde(default)]
    pub expose_error_detail: bool,
}
