//! Console event adapter for the palaver chat relay.
//!
//! Reads `user_id<TAB>text` lines from stdin, drives the orchestrator, and
//! prints replies. A text of `/reset` clears that user's conversation. All
//! platform-specific wiring lives here; the library crates stay agnostic to
//! how events arrive.

mod config;
mod event;

use config::RelayConfig;
use event::InboundEvent;
use palaver_ai::{DecodingConfig, OpenAiBackend};
use palaver_conversation::ConversationStore;
use palaver_dialogue::Orchestrator;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RelayConfig::from_env().expect("failed to load configuration");
    tracing::info!(model = %config.openai.model, max_turns = config.max_turns, "loaded configuration");

    let decoding = DecodingConfig::new(config.openai.model.clone())
        .with_max_tokens(config.openai.max_tokens)
        .with_temperature(config.openai.temperature);
    let backend = OpenAiBackend::with_base_url(
        config.openai.api_key.clone(),
        decoding,
        config.openai.base_url.clone(),
    )
    .with_timeout(Duration::from_secs(config.openai.timeout_secs));

    let store = ConversationStore::new(config.system_message.clone(), config.max_turns);
    let orchestrator = Arc::new(Orchestrator::new(store, Arc::new(backend)));

    tracing::info!("relay ready, reading user_id<TAB>text lines from stdin");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                break;
            }
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let event = match InboundEvent::parse_line(&line) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!(error = %e, "rejected malformed event");
                println!("! {e}");
                continue;
            }
        };

        // Each event runs on its own task so one user's slow completion
        // never stalls another user's.
        let orchestrator = Arc::clone(&orchestrator);
        tokio::spawn(async move {
            let InboundEvent {
                user_id,
                text,
                reset,
            } = event;

            if reset {
                match orchestrator.reset_history(&user_id).await {
                    Ok(()) => println!("> conversation reset < - {user_id}"),
                    Err(e) => {
                        tracing::error!(user = %user_id, error = %e, "reset failed");
                        println!("! oops, something went wrong");
                    }
                }
                return;
            }

            match orchestrator.get_response(&user_id, text).await {
                Ok(reply) => println!("{user_id} > {reply}"),
                Err(e) => {
                    // The Display text is user-safe; the cause goes to the log.
                    tracing::error!(user = %user_id, error = ?e, "response failed");
                    println!("! {e}");
                }
            }
        });
    }
}
