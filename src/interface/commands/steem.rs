//! # Steem Commands
//!
//! Handles `%steem [user]` and `%delegate [<from>] <to> <sp>`.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::application::handler::{CommandContext, CommandHandler};
use crate::application::utils::reputation_score;
use crate::domain::traits::{MarketData, SteemData};
use crate::domain::types::{Color, Embed, EmbedField, SteemAccount};
use crate::interface::commands::market::{DEFAULT_VS, quote_embed};
use crate::strings::messages;

pub const STEEM_SYMBOL: &str = "steem";
pub const STEEMCONNECT_DELEGATE_URL: &str = "https://steemconnect.com/sign/delegateVestingShares";

/// Account names are lowercase on chain; users often paste them with a leading `@`.
pub fn normalize_account(raw: &str) -> String {
    raw.trim_start_matches('@').to_lowercase()
}

fn account_embed(account: &SteemAccount) -> Embed {
    Embed::new(Color::Blue, messages::account_title(&account.name)).fields([
        EmbedField::inline(messages::FIELD_BALANCE, account.balance.clone()),
        EmbedField::inline(messages::FIELD_SBD_BALANCE, account.sbd_balance.clone()),
        EmbedField::inline(messages::FIELD_VESTING, account.vesting_shares.clone()),
        EmbedField::inline(
            messages::FIELD_REPUTATION,
            reputation_score(account.reputation).to_string(),
        ),
        EmbedField::inline(messages::FIELD_POSTS, account.post_count.to_string()),
    ])
}

pub struct SteemCommand {
    market: Arc<dyn MarketData>,
    steem: Arc<dyn SteemData>,
}

impl SteemCommand {
    pub fn new(market: Arc<dyn MarketData>, steem: Arc<dyn SteemData>) -> Self {
        Self { market, steem }
    }
}

#[async_trait]
impl CommandHandler for SteemCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        let Some(raw) = ctx.arg(0) else {
            return match self.market.quote(STEEM_SYMBOL, DEFAULT_VS).await? {
                Some(quote) => ctx.reply(quote_embed(&quote)).await,
                None => ctx.reply_error(messages::coin_not_found(STEEM_SYMBOL)).await,
            };
        };

        let name = normalize_account(raw);
        match self.steem.account(&name).await? {
            Some(account) => {
                ctx.reply(account_embed(&account)).await?;
                ctx.reply_text(messages::profile_link(&account.name)).await
            }
            None => ctx.reply_error(messages::account_not_found(&name)).await,
        }
    }
}

/// Builds a SteemConnect signing link. Without a delegator the signer picks the account.
pub fn delegate_link(from: Option<&str>, to: &str, amount: &str) -> String {
    let mut query = Vec::new();
    if let Some(from) = from {
        query.push(format!("delegator={from}"));
    }
    query.push(format!("delegatee={to}"));
    query.push(format!("vesting_shares={amount}%20SP"));
    format!("{STEEMCONNECT_DELEGATE_URL}?{}", query.join("&"))
}

pub struct DelegateCommand;

#[async_trait]
impl CommandHandler for DelegateCommand {
    async fn handle(&self, ctx: CommandContext) -> Result<()> {
        let (from, to, amount) = match ctx.args.as_slice() {
            [to, amount] => (None, to, amount),
            [from, to, amount, ..] => (Some(normalize_account(from)), to, amount),
            _ => {
                return ctx
                    .reply_error(messages::invalid_command(messages::DELEGATE_USAGE))
                    .await;
            }
        };

        match amount.parse::<f64>() {
            Ok(a) if a.is_finite() && a > 0.0 => {}
            _ => return ctx.reply_error(messages::invalid_amount(amount)).await,
        }

        let to = normalize_account(to);
        let link = delegate_link(from.as_deref(), &to, amount);
        let embed = Embed::new(Color::Green, messages::delegate_title(amount, &to))
            .field(EmbedField::new(messages::DELEGATE_LINK_NAME, link));
        ctx.reply(embed).await
    }
}
