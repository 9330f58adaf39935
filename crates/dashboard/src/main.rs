use std::sync::Arc;

use oplps_dashboard::{AppState, BadgePoller, Config};
use oplps_views::{dashboard_metrics, notifications};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    oplps_observability::init();

    let config = Config::from_env();
    let session = config.session();
    let client = config.client();
    let state = Arc::new(AppState::new());

    tracing::info!(
        api_url = config.api_url,
        user = %session.user_id(),
        role = session.role().as_str(),
        "oplps dashboard starting"
    );

    // Initial full fetch; failures degrade to an empty view plus a message,
    // the poller retries on its own schedule.
    for (label, result) in [
        ("parts", state.refresh_parts(&client).await),
        ("pending", state.refresh_pending(&client).await),
        ("history", state.refresh_history(&client).await),
    ] {
        if let Err(err) = result {
            tracing::warn!(collection = label, error = %err, "initial fetch failed");
        }
    }

    let now = chrono::Utc::now();
    let parts = state.parts_snapshot().await;
    let pending = state.pending_snapshot().await;

    let metrics = dashboard_metrics(&parts, &pending, now);
    println!(
        "parts: {}  units: {}  pending approval: {}",
        metrics.total_parts, metrics.total_units, metrics.pending_approval
    );
    println!(
        "overdue: >14d {}  >30d {}  >90d {}",
        metrics.overdue.over14, metrics.overdue.over30, metrics.overdue.over90
    );
    for row in notifications(&parts, now) {
        println!("  [{}] {}: {} days", row.bucket.as_str(), row.part_no, row.days);
    }

    let poller = BadgePoller::new(client, config.poll_interval);
    let mut badges = poller.subscribe();
    let handle = poller.start();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutdown requested");
                break;
            }
            changed = badges.changed() => {
                if changed.is_err() {
                    break;
                }
                let counts = *badges.borrow_and_update();
                tracing::info!(
                    over14 = counts.over14,
                    over30 = counts.over30,
                    over90 = counts.over90,
                    "badge counts refreshed"
                );
            }
        }
    }

    handle.stop().await;
    Ok(())
}
