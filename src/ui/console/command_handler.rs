// ui/console/command_handler.rs

use crate::catalog::SortKey;
use crate::controller::DealsController;
use std::sync::Arc;
use tokio::sync::{Mutex, Notify};
use tracing::info;

/// Shared handles the command handler needs to drive the app.
#[derive(Clone)]
pub struct CommandContext {
    pub controller: Arc<Mutex<DealsController>>,
    pub refresh_notify: Arc<Notify>,
    pub shutdown_notify: Arc<Notify>,
}

/// Handles one typed command line and triggers the corresponding action.
pub async fn handle_command(line: &str, ctx: &CommandContext) {
    info!("Handling command: {}", line);
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");
    let args: Vec<&str> = parts.collect();

    match command {
        "/help" => {
            let help_msg = "📋 Available commands:\n\
                /refresh — reload deals from the API\n\
                /page <n> — jump to a page\n\
                /next, /prev — step through pages\n\
                /sort <key> — price-asc, price-desc, brand-asc, brand-desc, relevance\n\
                /alert <id> — toggle a price alert\n\
                /alert <id> <price> [email] — confirm an alert\n\
                /alerts — list price alerts\n\
                /wish <id> — toggle a wishlist entry\n\
                /wishlist — list wishlist entries\n\
                /compare <id> — open the compare view\n\
                /category <type> — open a filtered listing (e.g. android)\n\
                /status — current view state\n\
                /quit — exit";
            println!("{help_msg}");
        }
        "/refresh" => {
            println!("🔄 Refresh requested...");
            ctx.refresh_notify.notify_one();
        }
        "/page" => {
            let Some(page) = args.first().and_then(|a| a.parse::<usize>().ok()) else {
                println!("Usage: /page <number>");
                return;
            };
            let mut ctrl = ctx.controller.lock().await;
            let total = ctrl.total_pages();
            if page == 0 || page > total {
                println!("⚠️ Page {page} is out of range (1..{total})");
                return;
            }
            ctrl.change_page(page);
        }
        "/next" => {
            let mut ctrl = ctx.controller.lock().await;
            let next = ctrl.current_page() + 1;
            if next > ctrl.total_pages() {
                println!("⚠️ Already on the last page");
                return;
            }
            ctrl.change_page(next);
        }
        "/prev" => {
            let mut ctrl = ctx.controller.lock().await;
            if ctrl.current_page() <= 1 {
                println!("⚠️ Already on the first page");
                return;
            }
            let prev = ctrl.current_page() - 1;
            ctrl.change_page(prev);
        }
        "/sort" => {
            let Some(key) = args.first() else {
                println!("Usage: /sort price-asc|price-desc|brand-asc|brand-desc|relevance");
                return;
            };
            ctx.controller.lock().await.change_sort(SortKey::parse(key));
        }
        "/alert" => match args.as_slice() {
            [id] => {
                let ctrl = ctx.controller.lock().await;
                if let Some(prompt) = ctrl.on_alert_bell_click(id).await {
                    println!(
                        "🔔 Set an alert for {} (current ${:.2})?",
                        prompt.product_name, prompt.current_price
                    );
                    println!(
                        "   Confirm with: /alert {} {} [email]",
                        prompt.product_id, prompt.suggested_price
                    );
                }
            }
            [id, price, rest @ ..] => {
                let Ok(price) = price.parse::<f64>() else {
                    println!("⚠️ '{price}' is not a number");
                    return;
                };
                let email = rest.first().map(|s| s.to_string());
                let ctrl = ctx.controller.lock().await;
                ctrl.on_alert_confirm(id, price, email).await;
            }
            _ => println!("Usage: /alert <id> [price [email]]"),
        },
        "/alerts" => {
            let ctrl = ctx.controller.lock().await;
            let alerts = ctrl.alerts().get_all().await;
            if alerts.is_empty() {
                println!("📭 No price alerts set.");
                return;
            }
            println!("🔔 Price alerts:");
            let mut records: Vec<_> = alerts.into_values().collect();
            records.sort_by(|a, b| a.date_created.cmp(&b.date_created));
            for record in records {
                println!(
                    "  {} — below ${:.2} (current ${:.2}, since {})",
                    record.product_name,
                    record.alert_price,
                    record.current_price,
                    record.date_created.format("%Y-%m-%d")
                );
            }
        }
        "/wish" => {
            let Some(id) = args.first() else {
                println!("Usage: /wish <id>");
                return;
            };
            let ctrl = ctx.controller.lock().await;
            ctrl.on_wishlist_click(id).await;
        }
        "/wishlist" => {
            let ctrl = ctx.controller.lock().await;
            let entries = ctrl.wishlist().get_all().await;
            if entries.is_empty() {
                println!("📭 Wishlist is empty.");
                return;
            }
            println!("💙 Wishlist:");
            let mut entries: Vec<_> = entries.into_values().collect();
            entries.sort_by(|a, b| a.name.cmp(&b.name));
            for entry in entries {
                println!("  {} — {}", entry.name, entry.price);
            }
        }
        "/compare" => {
            let Some(id) = args.first() else {
                println!("Usage: /compare <id>");
                return;
            };
            ctx.controller.lock().await.on_compare_click(id);
        }
        "/category" => {
            let Some(kind) = args.first() else {
                println!("Usage: /category <type>");
                return;
            };
            ctx.controller.lock().await.on_category_click(kind);
        }
        "/status" => {
            let ctrl = ctx.controller.lock().await;
            let alerts = ctrl.alerts().get_all().await;
            let wishlist = ctrl.wishlist().get_all().await;
            println!(
                "📊 {} products · page {}/{} · sort: {} · {} alerts · {} wishlisted",
                ctrl.product_count(),
                ctrl.current_page(),
                ctrl.total_pages(),
                ctrl.sort_by().as_str(),
                alerts.len(),
                wishlist.len()
            );
        }
        "/quit" => {
            ctx.shutdown_notify.notify_one();
        }
        _ => {
            println!("🤖 Unknown command. Type /help for a list of commands.");
        }
    }
}
