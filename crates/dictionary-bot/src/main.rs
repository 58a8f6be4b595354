//! Dictionary Bot - Main entry point.

use anyhow::Context;
use dictionary_bot::commands::*;
use dictionary_bot::config::Config;
use dictionary_bot::error::AppResult;
use matrix_client::{MatrixClient, MessageReceiver};
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio_stream::StreamExt;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot.log_level);

    info!("Starting Dictionary Bot...");

    // Initialize clients
    let source = config
        .dictionary
        .build_source()
        .context("Failed to create dictionary backend")?;

    let matrix = MatrixClient::new(
        &config.matrix.homeserver_url,
        &config.matrix.access_token,
        Duration::from_secs(30),
    )
    .context("Failed to create Matrix client")?;

    let user_id = match matrix.whoami().await {
        Ok(user_id) => user_id,
        Err(e) => {
            error!(
                "Matrix homeserver not usable at {}: {}",
                config.matrix.homeserver_url, e
            );
            return Err(e.into());
        }
    };
    info!("Logged in as {}", user_id);
    info!("Dictionary backend: {}", source.name());

    // Create command handlers
    let prefix = &config.bot.command_prefix;
    let mut handlers: Vec<Box<dyn CommandHandler>> =
        vec![Box::new(DefineHandler::new(prefix, source))];
    let help_lines = handlers.iter().filter_map(|h| h.help_line()).collect();
    handlers.push(Box::new(HelpHandler::new(prefix, help_lines)));
    let handlers = Arc::new(handlers);

    info!("Registered {} command handlers", handlers.len());
    info!("Listening for messages...");

    // Start message receiver
    let receiver = MessageReceiver::new(
        matrix.clone(),
        user_id,
        config.matrix.sync_timeout,
        config.matrix.auto_join,
    );
    let mut stream = Box::pin(receiver.stream());

    // Main message loop
    loop {
        tokio::select! {
            Some(message) = stream.next() => {
                let handlers = handlers.clone();
                let matrix = matrix.clone();

                tokio::spawn(async move {
                    match dispatch(&handlers, &message).await {
                        Ok(Some(response)) => {
                            if let Err(e) = matrix.reply(&message, &response).await {
                                debug!("Failed to send reply: {}", e);
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            warn!("Handler error: {}", e);
                        }
                    }
                });
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
