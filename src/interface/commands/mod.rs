//! # Command Handlers
//!
//! Contains the handler for each supported command (e.g. `%price`, `%help`, `%hunt`)
//! and [`default_table`], which maps every command word and alias to its handler.

pub mod help;
pub mod hunt;
pub mod info;
pub mod market;
pub mod steem;

use anyhow::Result;
use std::sync::Arc;

use crate::application::router::{CommandSpec, CommandTable};
use crate::domain::traits::{MarketData, SteemData};
use crate::strings::messages;

/// Builds the full routing table. Fails when two commands claim the same alias.
pub fn default_table(
    market: Arc<dyn MarketData>,
    steem: Arc<dyn SteemData>,
    version: &str,
) -> Result<CommandTable> {
    let price = Arc::new(market::PriceCommand::new(market.clone()));
    let convert = Arc::new(market::ConvertCommand::new(market.clone()));

    CommandTable::new(vec![
        CommandSpec::new("price", &["price", "p"], price).min_args(1, messages::PRICE_USAGE),
        CommandSpec::new("chart", &["chart"], Arc::new(market::ChartCommand::new(market.clone())))
            .min_args(1, messages::CHART_USAGE),
        CommandSpec::new("ping", &["ping"], Arc::new(info::PingCommand)),
        CommandSpec::new("discord", &["discord"], Arc::new(info::DiscordCommand)),
        CommandSpec::new("bug", &["bug", "bugs"], Arc::new(info::BugCommand)),
        CommandSpec::new("donate", &["donate", "donation"], Arc::new(info::DonateCommand)),
        CommandSpec::new("help", &["help", "h"], Arc::new(help::HelpCommand::new(version))),
        CommandSpec::new(
            "steem",
            &["steem", "s"],
            Arc::new(steem::SteemCommand::new(market.clone(), steem.clone())),
        ),
        CommandSpec::new("s/sbd", &["s/sbd"], convert.clone()).preset_args(&["1", "steem", "sbd"]),
        CommandSpec::new("sbd/s", &["sbd/s"], convert.clone()).preset_args(&["1", "sbd", "steem"]),
        CommandSpec::new("delegate", &["delegate"], Arc::new(steem::DelegateCommand))
            .min_args(2, messages::DELEGATE_USAGE),
        CommandSpec::new("daily", &["daily"], Arc::new(market::DailyCommand::new(market))),
        CommandSpec::new("convert", &["convert"], convert).min_args(3, messages::CONVERT_USAGE),
        CommandSpec::new(
            "hunt",
            &["hunt", "sh", "steemhunt"],
            Arc::new(hunt::HuntCommand::new(steem)),
        )
        .min_args(1, messages::HUNT_USAGE),
    ])
}


#[cfg(test)]
mod tests {
    use super::fakes::{FakeMarket, FakeSteem};
    use super::*;
    use crate::application::dispatcher::{Dispatch, EventDispatcher};
    use crate::application::filter::Whitelist;
    use crate::application::outbound::Outbox;
    use crate::application::outbound::tests::{RecordingPlatform, Sent};
    use crate::application::router::{CommandRouter, Route};
    use crate::application::session::{SessionSnapshot, SessionState};
    use crate::domain::config::DispatchConfig;
    use crate::domain::traits::SessionSource;
    use crate::domain::types::{ChannelId, Color, CommandInvocation, InboundEvent, UserId};

    struct NoSession;

    impl SessionSource for NoSession {
        fn snapshot(&self) -> Option<SessionSnapshot> {
            None
        }
    }

    fn table() -> CommandTable {
        default_table(
            Arc::new(FakeMarket::standard()),
            Arc::new(FakeSteem::default()),
            "v2.3.0",
        )
        .unwrap()
    }

    #[test]
    fn test_default_table_has_no_overlaps() {
        let table = table();
        assert_eq!(table.specs().len(), 14);
        for word in [
            "price", "p", "chart", "ping", "discord", "bug", "bugs", "donate", "donation", "help",
            "h", "steem", "s", "s/sbd", "sbd/s", "delegate", "daily", "convert", "hunt", "sh",
            "steemhunt",
        ] {
            assert!(table.lookup(word).is_some(), "missing {word}");
        }
    }

    #[test]
    fn test_price_shortcut_routes_like_price_command() {
        let router = CommandRouter::new(table());
        let shortcut = CommandInvocation::parse("$btc").unwrap();
        let full = CommandInvocation::parse("%price btc").unwrap();

        match (router.route(&shortcut), router.route(&full)) {
            (
                Route::Invoke {
                    command: a,
                    handler: ha,
                    args: aa,
                },
                Route::Invoke {
                    command: b,
                    handler: hb,
                    args: ab,
                },
            ) => {
                assert_eq!(a, "price");
                assert_eq!(a, b);
                assert!(Arc::ptr_eq(&ha, &hb));
                assert_eq!(aa, vec!["btc"]);
                assert_eq!(aa, ab);
            }
            _ => panic!("both should invoke the price handler"),
        }
    }

    /// Sends one message through a full dispatcher and returns whether it was answered with a
    /// canned routing reply, plus everything delivered.
    async fn dispatch(content: &str) -> (bool, Vec<Sent>) {
        let platform = Arc::new(RecordingPlatform::default());
        let config = DispatchConfig::default();
        let outbox = Outbox::start(platform.clone(), &config);
        let dispatcher = EventDispatcher::new(
            Whitelist::new([ChannelId(9)]),
            Arc::new(CommandRouter::new(table())),
            SessionState::new(),
            outbox.embeds(),
            outbox.texts(),
            &config,
        );

        let event = InboundEvent::new(UserId(5), ChannelId(9), content);
        let outcome = dispatcher.handle_event(event, NoSession).await.unwrap();
        let replied = matches!(outcome, Dispatch::Replied);
        outcome.settle().await.unwrap();
        drop(dispatcher);
        outbox.shutdown().await.unwrap();
        (replied, platform.sent().await)
    }

    async fn run(content: &str) -> Vec<Sent> {
        dispatch(content).await.1
    }

    #[tokio::test]
    async fn test_every_command_rejects_too_few_arguments() {
        let table = table();
        let mut checked = Vec::new();
        for spec in table.specs().iter().filter(|s| s.min_args > 0) {
            let usage = spec.usage.expect("commands with a minimum carry usage text");
            for alias in spec.aliases {
                let args = vec!["x"; spec.min_args - 1];
                let content = format!("%{alias} {}", args.join(" "));

                let (replied, sent) = dispatch(content.trim_end()).await;
                assert!(replied, "{content} should get a routing reply");
                assert_eq!(sent.len(), 1, "{content} sent {sent:?}");
                let Sent::Embed(channel, embed) = &sent[0] else {
                    panic!("{content} should answer with an embed");
                };
                assert_eq!(*channel, ChannelId(9));
                assert_eq!(embed.color, Color::Red);
                assert_eq!(embed.title, messages::invalid_command(usage), "{content}");
                checked.push(*alias);
            }
        }
        checked.sort_unstable();
        assert_eq!(
            checked,
            vec!["chart", "convert", "delegate", "hunt", "p", "price", "sh", "steemhunt"]
        );
    }

    #[tokio::test]
    async fn test_help_scenario() {
        let sent = run("%help").await;
        assert_eq!(sent.len(), 1);
        let Sent::Embed(channel, embed) = &sent[0] else {
            panic!("expected an embed");
        };
        assert_eq!(*channel, ChannelId(9));
        assert!(embed.title.contains("v2.3.0"));
        let names: Vec<_> = embed.fields.iter().map(|f| f.name.as_str()).collect();
        let expected: Vec<_> = crate::strings::help::ENTRIES.iter().map(|(n, _)| *n).collect();
        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_price_without_coin_scenario() {
        let sent = run("%p").await;
        assert_eq!(sent.len(), 1);
        let Sent::Embed(_, embed) = &sent[0] else {
            panic!("expected an embed");
        };
        assert_eq!(embed.title, "Invalid command, try `%price <coin>`");
    }

    #[tokio::test]
    async fn test_price_shortcut_scenario() {
        let sent = run("$btc").await;
        assert_eq!(sent.len(), 1);
        let Sent::Embed(_, embed) = &sent[0] else {
            panic!("expected an embed");
        };
        assert_eq!(embed.title, "Bitcoin (BTC)");
    }

    #[tokio::test]
    async fn test_unknown_command_scenario() {
        let sent = run("%moon").await;
        assert_eq!(sent.len(), 1);
        let Sent::Embed(_, embed) = &sent[0] else {
            panic!("expected an embed");
        };
        assert_eq!(embed.title, messages::UNKNOWN_COMMAND);
    }
}
