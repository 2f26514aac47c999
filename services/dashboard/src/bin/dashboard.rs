//! services/dashboard/src/bin/dashboard.rs

use dashboard_lib::{
    adapters::{FileSessionStorage, ReqwestTransport},
    config::Config,
    error::ClientError,
    guard::{self, Route},
    views::{CoinsHistoryView, DashboardView},
    ApiClient, SessionStore,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), ClientError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. API origin: {}", config.api_base_url);

    // --- 2. Restore the Persisted Session ---
    let storage = Arc::new(FileSessionStorage::new(config.session_file.clone()));
    let session = Arc::new(SessionStore::restore(storage).await);

    // --- 3. Build the API Client ---
    let transport = Arc::new(ReqwestTransport::new());
    let client = ApiClient::new(transport, session.clone(), config.api_base_url.clone());

    // --- 4. Route Guard & Login ---
    if guard::resolve(&session).await == Route::Login {
        let (Some(phone), Some(password)) =
            (config.student_phone.as_deref(), config.student_password.as_deref())
        else {
            info!("No session and no STUDENT_PHONE/STUDENT_PASSWORD set; nothing to show.");
            return Ok(());
        };
        info!("Logging in as {}...", phone);
        client.login(phone, password).await.map_err(|err| {
            error!("Login failed: {}", err);
            err
        })?;
    }

    // --- 5. Load the Home Dashboard ---
    let dashboard = DashboardView::load(&client).await?;
    info!("{}", dashboard.welcome);
    info!(
        "Coins: {} | Level: {} | Ranking: {} | Modules: {}",
        dashboard.coins, dashboard.level, dashboard.ranking, dashboard.modules
    );
    for entry in &dashboard.leaderboard {
        info!(
            "  #{} {} - {} coins, {} modules",
            entry.rank,
            entry.name.as_deref().unwrap_or("?"),
            entry.coins.unwrap_or(0),
            entry.modules.unwrap_or(0)
        );
    }

    // --- 6. Load the Coin History ---
    let coins = CoinsHistoryView::load(&client, None).await?;
    if coins.is_empty() {
        info!("No transactions found");
    } else {
        info!("Net balance: {} coins", coins.net_balance);
        for row in &coins.rows {
            info!(
                "  {} {} {} ({}) {}",
                row.index,
                row.amount_label,
                row.kind.as_str(),
                row.reason,
                row.date_label
            );
        }
        if let Some(summary) = &coins.pagination_summary {
            info!("{}", summary);
        }
    }

    Ok(())
}
