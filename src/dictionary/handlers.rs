use super::embedded::Dictionary;
use super::seed::seed;
use crate::config::Config;
use crate::entities::repository::Repository;
use crate::error::ApiError;
use crate::shutdown::Shutdown;

use axum::Extension;
use axum::response::Redirect;
use std::sync::Arc;
use std::time::Duration;

/// Grace period between answering the seed request and shutting down.
pub const RESTART_DELAY: Duration = Duration::from_secs(2);

pub async fn handle_populate(
    Extension(repo): Extension<Arc<Repository>>,
    Extension(dictionary): Extension<Arc<Dictionary>>,
    Extension(config): Extension<Arc<Config>>,
    Extension(shutdown): Extension<Shutdown>,
) -> Result<Redirect, ApiError> {
    seed(&repo, &dictionary, config.index_ready_timeout())
        .await
        .map_err(ApiError::SeedingFailed)?;

    if config.restart_after_seed() {
        tracing::info!(
            "Container host is {:?}, restarting in {:?}",
            config.container_host,
            RESTART_DELAY
        );
        shutdown.trigger_after(RESTART_DELAY);
    }

    Ok(Redirect::to("/"))
}
