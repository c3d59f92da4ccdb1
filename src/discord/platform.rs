// src/discord/platform.rs

//! Serenity implementation of the chat seams.

use std::sync::Arc;

use async_trait::async_trait;
use poise::serenity_prelude as serenity;

use crate::error::{AppError, Result};
use crate::models::Announcement;
use crate::services::{ChatSink, ThreadDirectory, ThreadInfo, ThreadParent};

/// Discord REST client plus the gateway cache.
#[derive(Clone)]
pub struct SerenityPlatform {
    http: Arc<serenity::Http>,
    cache: Arc<serenity::Cache>,
}

impl SerenityPlatform {
    pub fn new(http: Arc<serenity::Http>, cache: Arc<serenity::Cache>) -> Self {
        Self { http, cache }
    }

    async fn guild_channel(&self, channel_id: u64) -> Result<serenity::GuildChannel> {
        let channel = serenity::ChannelId::new(channel_id)
            .to_channel(self.http.as_ref())
            .await?;
        channel
            .guild()
            .ok_or_else(|| AppError::config(format!("channel {channel_id} is not in a guild")))
    }
}

/// Map a card onto a message with an embed and an optional link button.
pub fn create_message(announcement: &Announcement) -> serenity::CreateMessage {
    let mut message = serenity::CreateMessage::new().embed(create_embed(announcement));
    if let Some(link) = &announcement.link {
        message = message.components(vec![serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new_link(&link.url).label(&link.label),
        ])]);
    }
    message
}

/// Same mapping for replies sent through a command context.
pub fn create_reply(announcement: &Announcement) -> poise::CreateReply {
    let mut reply = poise::CreateReply::default().embed(create_embed(announcement));
    if let Some(link) = &announcement.link {
        reply = reply.components(vec![serenity::CreateActionRow::Buttons(vec![
            serenity::CreateButton::new_link(&link.url).label(&link.label),
        ])]);
    }
    reply
}

fn create_embed(announcement: &Announcement) -> serenity::CreateEmbed {
    let mut embed = serenity::CreateEmbed::new()
        .title(&announcement.title)
        .color(announcement.color);

    if !announcement.description.is_empty() {
        embed = embed.description(&announcement.description);
    }
    for field in &announcement.fields {
        embed = embed.field(&field.name, &field.value, field.inline);
    }
    if let Some(image) = &announcement.image {
        embed = embed.image(image);
    }
    if let Some(thumbnail) = &announcement.thumbnail {
        embed = embed.thumbnail(thumbnail);
    }
    if let Some(footer) = &announcement.footer {
        embed = embed.footer(serenity::CreateEmbedFooter::new(footer));
    }
    embed
}

fn thread_info(channel: &serenity::GuildChannel) -> ThreadInfo {
    ThreadInfo {
        id: channel.id.get(),
        name: channel.name.clone(),
        parent_id: channel.parent_id.map(|id| id.get()),
    }
}

#[async_trait]
impl ChatSink for SerenityPlatform {
    async fn check_channel(&self, channel_id: u64) -> Result<()> {
        serenity::ChannelId::new(channel_id)
            .to_channel(self.http.as_ref())
            .await?;
        Ok(())
    }

    async fn send(&self, channel_id: u64, announcement: &Announcement) -> Result<()> {
        serenity::ChannelId::new(channel_id)
            .send_message(self.http.as_ref(), create_message(announcement))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ThreadDirectory for SerenityPlatform {
    async fn resolve_parent(&self, parent_id: u64) -> Result<ThreadParent> {
        let channel = self.guild_channel(parent_id).await?;
        Ok(ThreadParent {
            channel_id: channel.id.get(),
            guild_id: channel.guild_id.get(),
            accepts_new_threads: channel.kind == serenity::ChannelType::Text,
        })
    }

    async fn loaded_threads(&self, parent: &ThreadParent) -> Result<Vec<ThreadInfo>> {
        let parent_id = serenity::ChannelId::new(parent.channel_id);
        let threads = self
            .cache
            .guild(serenity::GuildId::new(parent.guild_id))
            .map(|guild| {
                guild
                    .threads
                    .iter()
                    .filter(|t| t.parent_id == Some(parent_id))
                    .map(thread_info)
                    .collect()
            })
            .unwrap_or_default();
        Ok(threads)
    }

    async fn active_threads(&self, parent: &ThreadParent) -> Result<Vec<ThreadInfo>> {
        let data = serenity::GuildId::new(parent.guild_id)
            .get_active_threads(self.http.as_ref())
            .await?;
        Ok(data.threads.iter().map(thread_info).collect())
    }

    async fn archived_threads(&self, parent: &ThreadParent, limit: u64) -> Result<Vec<ThreadInfo>> {
        let data = serenity::ChannelId::new(parent.channel_id)
            .get_archived_public_threads(self.http.as_ref(), None, Some(limit))
            .await?;
        Ok(data.threads.iter().map(thread_info).collect())
    }

    async fn create_thread(
        &self,
        parent: &ThreadParent,
        name: &str,
        intro: &Announcement,
    ) -> Result<ThreadInfo> {
        let channel_id = serenity::ChannelId::new(parent.channel_id);
        let message = channel_id
            .send_message(self.http.as_ref(), create_message(intro))
            .await
            .map_err(|e| AppError::thread(name, e))?;
        let thread = channel_id
            .create_thread_from_message(
                self.http.as_ref(),
                message.id,
                serenity::CreateThread::new(name),
            )
            .await
            .map_err(|e| AppError::thread(name, e))?;
        Ok(thread_info(&thread))
    }
}
