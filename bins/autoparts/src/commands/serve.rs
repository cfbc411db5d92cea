//! Serve command

use crate::context::AppContext;
use crate::server::{self, AppState};
use anyhow::Result;

/// Start the HTTP API
pub async fn run(ctx: AppContext, bind: Option<&str>) -> Result<()> {
    let bind = bind
        .map(String::from)
        .unwrap_or_else(|| ctx.config.schema.server.bind.clone());

    let state = AppState::new(ctx.store, ctx.searcher);
    server::run(state, &bind).await
}
