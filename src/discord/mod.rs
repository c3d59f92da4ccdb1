// src/discord/mod.rs

//! Discord front end on poise and serenity.
//!
//! Wires the herald to the gateway: prefix commands, link previews on
//! incoming messages, and the periodic chapter check started once the bot is
//! ready.

mod commands;
mod platform;

use std::sync::Arc;
use std::time::Duration;

use poise::serenity_prelude as serenity;
use tokio::time::MissedTickBehavior;

use crate::error::{AppError, Result};
use crate::herald::Herald;
use crate::models::Config;
use crate::services::ChatSink;

pub use platform::{SerenityPlatform, create_message, create_reply};

/// State shared with command handlers.
pub struct BotData {
    pub herald: Arc<Herald>,
    pub command_prefix: String,
}

pub type Context<'a> = poise::Context<'a, BotData, AppError>;

/// Connect to Discord and run until the gateway shuts down.
pub async fn run(config: Config) -> Result<()> {
    config.validate_for_run()?;
    let herald = Arc::new(Herald::from_config(&config)?);
    if !config.discord.threads_enabled() {
        log::info!("Series threads disabled");
    }

    let intents =
        serenity::GatewayIntents::non_privileged() | serenity::GatewayIntents::MESSAGE_CONTENT;

    let setup_herald = Arc::clone(&herald);
    let command_prefix = config.discord.command_prefix.clone();
    let activity = config.discord.activity.clone();
    let interval = config.poll.interval();

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![commands::list_all_titles(), commands::show_title()],
            prefix_options: poise::PrefixFrameworkOptions {
                prefix: Some(command_prefix.clone()),
                ..Default::default()
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, _framework| {
            Box::pin(async move {
                log::info!("Connected to Discord as {}", ready.user.name);
                ctx.set_activity(Some(serenity::ActivityData::playing(activity)));

                setup_herald.seed().await;
                let platform = SerenityPlatform::new(ctx.http.clone(), ctx.cache.clone());
                tokio::spawn(poll_loop(Arc::clone(&setup_herald), platform, interval));

                Ok(BotData {
                    herald: setup_herald,
                    command_prefix,
                })
            })
        })
        .build();

    let mut client = serenity::ClientBuilder::new(&config.discord.token, intents)
        .framework(framework)
        .event_handler(MessageHandler { herald })
        .await?;

    client.start().await?;
    Ok(())
}

/// Run a chapter check every `period`; a slow cycle pushes the next tick back.
async fn poll_loop(herald: Arc<Herald>, platform: SerenityPlatform, period: Duration) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        match herald.poll_cycle(&platform).await {
            Ok(report) => {
                let elapsed = report.finished_at - report.started_at;
                log::debug!(
                    "Chapter check: {} series, {} new, {} failed sends in {}ms",
                    report.catalog_size,
                    report.events.len(),
                    report.send_failures,
                    elapsed.num_milliseconds()
                );
            }
            Err(e) => log::error!("Chapter check failed: {}", e),
        }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, AppError>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            log::error!("Bot setup failed: {}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            log::error!("Command {} failed: {}", ctx.command().name, error);
            if let Err(e) = ctx.say("❌ Bir hata oluştu.").await {
                log::warn!("Could not report command failure: {}", e);
            }
        }
        other => {
            if let Err(e) = poise::builtins::on_error(other).await {
                log::error!("Error while handling framework error: {}", e);
            }
        }
    }
}

/// Expands reader links posted by users.
struct MessageHandler {
    herald: Arc<Herald>,
}

#[serenity::async_trait]
impl serenity::EventHandler for MessageHandler {
    async fn message(&self, ctx: serenity::Context, new_message: serenity::Message) {
        if new_message.author.bot {
            return;
        }

        let cards = self.herald.expand_links(&new_message.content).await;
        if cards.is_empty() {
            return;
        }

        let platform = SerenityPlatform::new(ctx.http.clone(), ctx.cache.clone());
        let channel_id = new_message.channel_id.get();
        for (i, card) in cards.iter().enumerate() {
            if i > 0 {
                self.herald.pace().await;
            }
            if let Err(e) = platform.send(channel_id, card).await {
                log::warn!("Link preview failed in {}: {}", channel_id, e);
            }
        }
    }
}
