use clap::{Args, Subcommand};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Send one request through the dispatch table and print the envelope.
    Request(RequestArgs),
    /// Open (or create) the configured store and apply migrations.
    Migrate,
    /// Print the JSON schema of a wire type.
    Schema(SchemaArgs),
}

#[derive(Clone, Debug, Args)]
pub struct RequestArgs {
    /// GET, POST, PUT, PATCH or DELETE.
    pub method: String,
    /// Request path, e.g. /articles or /articles/<id>/like.
    pub path: String,
    /// Query parameter as key=value. Repeatable.
    #[arg(short = 'Q', long = "query")]
    pub query: Vec<String>,
    /// JSON request body.
    #[arg(short, long)]
    pub body: Option<String>,
    /// Send the request as an authorized editor.
    #[arg(short, long)]
    pub authorized: bool,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Wire type name (envelope, article, article-view, article-detail,
    /// article-state, category, tag, comment, pagination, archive-year,
    /// statistics).
    pub type_name: String,
}
