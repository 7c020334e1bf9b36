//! # Market Commands
//!
//! Handles `%price` (and the `$<coin>` shortcut), `%chart`, `%daily` and `%convert`
//! (plus its `%s/sbd` and `%sbd/s` presets). All prices come from [`MarketData`].

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::application::handler::{CommandContext, CommandHandler};
use crate::application::utils::{format_change, format_large, format_price, sparkline};
use crate::domain::traits::MarketData;
use crate::domain::types::{CoinQuote, Color, Embed, EmbedField};
use crate::strings::messages;

pub const DEFAULT_VS: &str = "usd";
pub const CHART_DAYS: u32 = 7;
pub const CHART_WIDTH: usize = 28;
pub const DAILY_COUNT: usize = 12;

/// Currencies accepted on the fiat side of `%convert`.
pub const FIAT_CURRENCIES: &[&str] = &[
    "usd", "eur", "gbp", "jpy", "cny", "krw", "myr", "sgd", "aud", "cad", "chf", "hkd", "idr",
    "inr", "php", "thb", "twd", "rub", "brl", "nzd",
];

pub fn is_fiat(symbol: &str) -> bool {
    FIAT_CURRENCIES.contains(&symbol)
}

/// Accepts `%price BTC` as well as `$btc`.
fn normalize_symbol(raw: &str) -> String {
    raw.trim_start_matches('$').to_lowercase()
}

/// Quote embed shared by `%price` and `%steem`.
pub fn quote_embed(quote: &CoinQuote) -> Embed {
    let rising = quote.change_24h_pct.is_some_and(|c| c >= 0.0);
    let color = if rising { Color::Green } else { Color::Blue };

    let mut embed = Embed::new(color, messages::quote_title(&quote.name, &quote.symbol)).field(
        EmbedField::inline(
            messages::FIELD_PRICE,
            messages::priced(&format_price(quote.price), &quote.vs_currency),
        ),
    );
    if let Some(change) = quote.change_24h_pct {
        embed = embed.field(EmbedField::inline(messages::FIELD_CHANGE_24H, format_change(change)));
    }
    if let Some(cap) = quote.market_cap {
        embed = embed.field(EmbedField::inline(
            messages::FIELD_MARKET_CAP,
            messages::priced(&format_large(cap), &quote.vs_currency),
        ));
    }
    if let Some(volume) = quote.volume_24h {
        embed = embed.field(EmbedField::inline(
            messages::FIELD_VOLUME_24H,
            messages::priced(&format_large(volume), &quote.vs_currency),
        ));
    }
    if let Some(rank) = quote.rank {
        embed = embed.field(EmbedField::inline(messages::FIELD_RANK, format!("#{rank}")));
    }
    embed
}

pub struct PriceCommand {
    market: Arc<dyn MarketData>,
}

impl PriceCommand {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl CommandHandler for PriceCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        let Some(raw) = ctx.arg(0) else {
            return ctx.reply_error(messages::invalid_command(messages::PRICE_USAGE)).await;
        };
        let symbol = normalize_symbol(raw);

        match self.market.quote(&symbol, DEFAULT_VS).await? {
            Some(quote) => ctx.reply(quote_embed(&quote)).await,
            None => ctx.reply_error(messages::coin_not_found(&symbol)).await,
        }
    }
}

pub struct ChartCommand {
    market: Arc<dyn MarketData>,
}

impl ChartCommand {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl CommandHandler for ChartCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        let Some(raw) = ctx.arg(0) else {
            return ctx.reply_error(messages::invalid_command(messages::CHART_USAGE)).await;
        };
        let symbol = normalize_symbol(raw);

        let Some(quote) = self.market.quote(&symbol, DEFAULT_VS).await? else {
            return ctx.reply_error(messages::coin_not_found(&symbol)).await;
        };
        let points = self.market.history(&quote.id, DEFAULT_VS, CHART_DAYS).await?;
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return ctx.reply_error(messages::CHART_NO_DATA).await;
        };

        let low = points.iter().cloned().fold(f64::INFINITY, f64::min);
        let high = points.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let change = if *first != 0.0 {
            (last - first) / first * 100.0
        } else {
            0.0
        };

        let embed = Embed::new(
            Color::Blue,
            messages::chart_title(&quote.name, &quote.symbol, CHART_DAYS),
        )
        .description(format!("```\n{}\n```", sparkline(&points, CHART_WIDTH)))
        .fields([
            EmbedField::inline(messages::FIELD_LOW, messages::priced(&format_price(low), DEFAULT_VS)),
            EmbedField::inline(messages::FIELD_HIGH, messages::priced(&format_price(high), DEFAULT_VS)),
            EmbedField::inline(messages::FIELD_CHANGE, format_change(change)),
        ]);
        ctx.reply(embed).await
    }
}

pub struct DailyCommand {
    market: Arc<dyn MarketData>,
}

impl DailyCommand {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl CommandHandler for DailyCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        let coins = self.market.top(DAILY_COUNT, DEFAULT_VS).await?;
        let fields = coins.iter().map(|coin| {
            EmbedField::inline(
                messages::daily_entry_name(coin.rank, &coin.name, &coin.symbol),
                messages::daily_entry_value(
                    &format_price(coin.price),
                    &coin.change_24h_pct.map(format_change).unwrap_or_default(),
                ),
            )
        });
        let embed = Embed::new(Color::Blue, messages::daily_title(coins.len())).fields(fields);
        ctx.reply(embed).await
    }
}

pub struct ConvertCommand {
    market: Arc<dyn MarketData>,
}

impl ConvertCommand {
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }

    /// Price of one `from` expressed in `to`. `Err(symbol)` names the coin that was not found.
    async fn rate(&self, from: &str, to: &str) -> Result<std::result::Result<f64, String>> {
        match (is_fiat(from), is_fiat(to)) {
            (false, true) => Ok(self
                .market
                .quote(from, to)
                .await?
                .map(|q| q.price)
                .ok_or_else(|| from.to_string())),
            (true, false) => Ok(self
                .market
                .quote(to, from)
                .await?
                .filter(|q| q.price > 0.0)
                .map(|q| 1.0 / q.price)
                .ok_or_else(|| to.to_string())),
            _ => {
                let (a, b) = futures::try_join!(
                    self.market.quote(from, DEFAULT_VS),
                    self.market.quote(to, DEFAULT_VS)
                )?;
                Ok(match (a, b) {
                    (None, _) => Err(from.to_string()),
                    (_, None) => Err(to.to_string()),
                    (Some(_), Some(b)) if b.price <= 0.0 => Err(to.to_string()),
                    (Some(a), Some(b)) => Ok(a.price / b.price),
                })
            }
        }
    }
}

#[async_trait]
impl CommandHandler for ConvertCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        let (Some(amount_raw), Some(from), Some(to)) = (ctx.arg(0), ctx.arg(1), ctx.arg(2)) else {
            return ctx.reply_error(messages::invalid_command(messages::CONVERT_USAGE)).await;
        };
        let from = normalize_symbol(from);
        let to = normalize_symbol(to);

        let amount = match amount_raw.parse::<f64>() {
            Ok(a) if a.is_finite() && a > 0.0 => a,
            _ => return ctx.reply_error(messages::invalid_amount(amount_raw)).await,
        };
        if is_fiat(&from) && is_fiat(&to) {
            return ctx.reply_error(messages::FIAT_TO_FIAT).await;
        }

        match self.rate(&from, &to).await? {
            Ok(rate) => {
                let title = messages::conversion_result(
                    amount_raw,
                    &from,
                    &format_price(amount * rate),
                    &to,
                );
                ctx.reply(Embed::new(Color::Green, title)).await
            }
            Err(missing) => ctx.reply_error(messages::coin_not_found(&missing)).await,
        }
    }
}
