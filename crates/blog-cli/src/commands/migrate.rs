use serde_json::json;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

/// Handle `blogctl migrate`.
///
/// Migrations run when the store is opened, so reaching this point means the
/// schema is current; report what is in it.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let counts = ctx.api.service().statistics(true).await?;
    output(
        &json!({
            "database": ctx.config.database.path,
            "migrated": true,
            "count": counts,
        }),
        flags.format,
    )
}
