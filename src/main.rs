mod alerts;
mod catalog;
mod config;
mod controller;
mod fetcher;
mod model;
mod normalizer;
mod storage;
mod ui;
mod utils;
mod wishlist;

use alerts::AlertStore;
use catalog::SortKey;
use config::load_config;
use controller::DealsController;
use fetcher::DealsFetcher;
use storage::SqliteStorage;
use ui::console::ConsoleUi;
use ui::console::command_handler::CommandContext;
use ui::console::listener;
use wishlist::WishlistStore;

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    // Load configuration from file (defaults when the file is absent)
    let config = match load_config("config.json") {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            return;
        }
    };
    info!("Deals endpoint: {}", config.deals_url);

    // Initialize storage (SQLite) with async access (wrapped in a Mutex)
    let storage = match SqliteStorage::new(&config.db_path) {
        Ok(s) => Arc::new(Mutex::new(s)),
        Err(e) => {
            error!("Failed to initialize storage: {:?}", e);
            return;
        }
    };

    let fetcher = Arc::new(DealsFetcher::new(
        config.deals_url.clone(),
        Duration::from_secs(config.http_timeout_seconds),
    ));

    // The console front end fills all three collaborator seams.
    let console = Arc::new(ConsoleUi::new());

    let controller = Arc::new(Mutex::new(DealsController::new(
        fetcher,
        AlertStore::new(storage.clone()),
        WishlistStore::new(storage),
        console.clone(),
        console.clone(),
        console,
        config.page_size,
        SortKey::parse(&config.default_sort),
    )));

    let refresh_notify = Arc::new(Notify::new());
    let shutdown_notify = Arc::new(Notify::new());

    // Spawn listener for typed commands (e.g. /refresh, /page, /alert)
    listener::spawn_listener(CommandContext {
        controller: controller.clone(),
        refresh_notify: refresh_notify.clone(),
        shutdown_notify: shutdown_notify.clone(),
    });

    println!("🚀 dealgrid started! Type /help for commands.");

    // Initial load; afterwards fetches happen on manual refresh only.
    controller.lock().await.refresh().await;

    loop {
        tokio::select! {
            _ = refresh_notify.notified() => {
                info!("Manual refresh triggered.");
                controller.lock().await.refresh().await;
            }
            _ = shutdown_notify.notified() => {
                info!("Shutdown requested.");
                break;
            }
        }
    }

    println!("👋 Bye.");
}
