// src/discord/commands.rs

//! Prefix commands.

use crate::discord::platform::create_reply;
use crate::discord::Context;
use crate::error::{AppError, Result};

const LOADING: &str = "📚 Seriler yükleniyor...";
const EMPTY_CATALOG: &str = "❌ Hiç seri bulunamadı.";
const LIST_FAILED: &str = "❌ Seriler yüklenirken hata oluştu.";
const SHOW_FAILED: &str = "❌ Seri yüklenirken hata oluştu.";

/// List every series in the catalog.
#[poise::command(prefix_command, rename = "list-all-titles", aliases("seriler"))]
pub async fn list_all_titles(ctx: Context<'_>) -> Result<()> {
    if let Err(e) = send_catalog(ctx).await {
        log::error!("list-all-titles failed: {}", e);
        ctx.say(LIST_FAILED).await?;
    }
    Ok(())
}

async fn send_catalog(ctx: Context<'_>) -> Result<()> {
    let loading = ctx.say(LOADING).await?;
    let herald = &ctx.data().herald;

    let cards = match herald.list_titles().await {
        Ok(cards) => cards,
        Err(AppError::EmptyCatalog) => {
            loading
                .edit(ctx, poise::CreateReply::default().content(EMPTY_CATALOG))
                .await?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };
    loading.delete(ctx).await?;

    for (i, card) in cards.iter().enumerate() {
        if i > 0 {
            herald.pace().await;
        }
        ctx.send(create_reply(card)).await?;
    }
    ctx.say(format!("📊 Toplam **{}** seri listelendi!", cards.len())).await?;
    Ok(())
}

/// Show one series. Usage: `++seri Ölüm Paktı`
#[poise::command(prefix_command, rename = "show-title", aliases("seri"))]
pub async fn show_title(ctx: Context<'_>, #[rest] name: Option<String>) -> Result<()> {
    let name = name.unwrap_or_default();
    let name = name.trim();
    if name.is_empty() {
        let prefix = &ctx.data().command_prefix;
        ctx.say(format!(
            "❌ Kullanım: `{prefix}seri <seri adı>`\nÖrnek: `{prefix}seri Ölüm Paktı`"
        ))
        .await?;
        return Ok(());
    }

    match ctx.data().herald.show_title(name).await {
        Ok(card) => {
            ctx.send(create_reply(&card)).await?;
        }
        Err(AppError::NotFound(_)) => {
            ctx.say(format!("❌ **{name}** adında seri bulunamadı.")).await?;
        }
        Err(e) => {
            log::error!("show-title failed for {}: {}", name, e);
            ctx.say(SHOW_FAILED).await?;
        }
    }
    Ok(())
}
