// ui/console/listener.rs

use crate::ui::console::command_handler::{CommandContext, handle_command};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Reads command lines from stdin and processes them until the input closes.
pub async fn listen_for_commands(ctx: CommandContext) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        handle_command(line, &ctx).await;
    }
    info!("Command input closed.");
}

/// Spawns the listener as a background task.
pub fn spawn_listener(ctx: CommandContext) {
    tokio::spawn(async move {
        info!("▶️ Starting command listener...");
        listen_for_commands(ctx).await;
        info!("🛑 Command listener ended.");
    });
}
