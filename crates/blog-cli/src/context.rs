//! Application context: configuration plus the open store.

use blog_api::Api;
use blog_config::BlogConfig;

use crate::cli::GlobalFlags;

pub struct AppContext {
    pub config: BlogConfig,
    pub api: Api,
}

impl AppContext {
    /// Load configuration (with `.env`), apply the `--db` override and open
    /// the store.
    pub async fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let mut config = BlogConfig::load_with_dotenv()?;
        if let Some(ref path) = flags.db {
            config.database.path.clone_from(path);
        }
        tracing::debug!(path = %config.database.path, "opening blog store");
        let api = Api::from_config(&config).await?;
        Ok(Self { config, api })
    }
}
