//! # Command Router
//!
//! Maps a parsed [`CommandInvocation`] to exactly one outcome: a handler invocation, the
//! "invalid command" reply (too few arguments), or the "unknown command" reply.
//! The table is declarative: each [`CommandSpec`] lists its aliases, minimum argument count
//! and usage text, and [`CommandTable::new`] rejects overlapping aliases up front.

use anyhow::{Result, bail};
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::handler::CommandHandler;
use crate::domain::types::{CommandInvocation, Embed};

/// One row of the routing table.
#[derive(Clone)]
pub struct CommandSpec {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub min_args: usize,
    /// Shown in the "invalid command" reply, e.g. "`%price <coin>`".
    pub usage: Option<&'static str>,
    /// Replaces the user's arguments (e.g. `%s/sbd` runs convert with `1 steem sbd`).
    pub preset_args: Option<&'static [&'static str]>,
    pub handler: Arc<dyn CommandHandler>,
}

impl CommandSpec {
    pub fn new(
        name: &'static str,
        aliases: &'static [&'static str],
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name,
            aliases,
            min_args: 0,
            usage: None,
            preset_args: None,
            handler,
        }
    }

    pub fn min_args(mut self, min_args: usize, usage: &'static str) -> Self {
        self.min_args = min_args;
        self.usage = Some(usage);
        self
    }

    pub fn preset_args(mut self, args: &'static [&'static str]) -> Self {
        self.preset_args = Some(args);
        self
    }
}

pub struct CommandTable {
    specs: Vec<CommandSpec>,
    index: HashMap<&'static str, usize>,
}

impl CommandTable {
    pub fn new(specs: Vec<CommandSpec>) -> Result<Self> {
        let mut index = HashMap::new();
        for (i, spec) in specs.iter().enumerate() {
            if spec.aliases.is_empty() {
                bail!("command '{}' has no aliases", spec.name);
            }
            if spec.min_args > 0 && spec.usage.is_none() {
                bail!("command '{}' requires arguments but has no usage text", spec.name);
            }
            for alias in spec.aliases {
                if let Some(&other) = index.get(alias) {
                    let other: &CommandSpec = &specs[other];
                    bail!(
                        "alias '{}' is claimed by both '{}' and '{}'",
                        alias,
                        other.name,
                        spec.name
                    );
                }
                index.insert(*alias, i);
            }
        }
        Ok(Self { specs, index })
    }

    pub fn lookup(&self, word: &str) -> Option<&CommandSpec> {
        self.index.get(word).map(|&i| &self.specs[i])
    }

    pub fn specs(&self) -> &[CommandSpec] {
        &self.specs
    }
}

/// Result of routing one invocation.
pub enum Route {
    Invoke {
        command: &'static str,
        handler: Arc<dyn CommandHandler>,
        args: Vec<String>,
    },
    Invalid {
        command: &'static str,
        usage: &'static str,
    },
    Unknown,
}

impl Route {
    /// The canned reply for the two error outcomes.
    pub fn reply(&self) -> Option<Embed> {
        match self {
            Route::Invoke { .. } => None,
            Route::Invalid { usage, .. } => {
                Some(Embed::error(crate::strings::messages::invalid_command(usage)))
            }
            Route::Unknown => Some(Embed::error(crate::strings::messages::UNKNOWN_COMMAND)),
        }
    }
}

pub struct CommandRouter {
    table: CommandTable,
}

impl CommandRouter {
    pub fn new(table: CommandTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CommandTable {
        &self.table
    }

    /// Exact, case-sensitive lookup of the command word.
    pub fn route(&self, invocation: &CommandInvocation) -> Route {
        let Some(spec) = self.table.lookup(&invocation.command) else {
            return Route::Unknown;
        };

        if invocation.args.len() < spec.min_args {
            return Route::Invalid {
                command: spec.name,
                usage: spec.usage.unwrap_or_default(),
            };
        }

        let args = match spec.preset_args {
            Some(preset) => preset.iter().map(|a| a.to_string()).collect(),
            None => invocation.args.clone(),
        };

        Route::Invoke {
            command: spec.name,
            handler: spec.handler.clone(),
            args,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handler::CommandContext;
    use async_trait::async_trait;

    struct Noop;

    #[async_trait]
    impl CommandHandler for Noop {
        async fn handle(&self, _ctx: CommandContext) -> Result<()> {
            Ok(())
        }
    }

    fn inv(command: &str, args: &[&str]) -> CommandInvocation {
        CommandInvocation {
            command: command.to_string(),
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }

    fn router() -> CommandRouter {
        let noop: Arc<dyn CommandHandler> = Arc::new(Noop);
        let table = CommandTable::new(vec![
            CommandSpec::new("price", &["p", "price"], noop.clone())
                .min_args(1, "`%price <coin>`"),
            CommandSpec::new("help", &["h", "help"], noop.clone()),
            CommandSpec::new("convert", &["convert"], noop.clone())
                .min_args(3, "`%convert <amount> <from> <to>`"),
            CommandSpec::new("s/sbd", &["s/sbd"], noop).preset_args(&["1", "steem", "sbd"]),
        ])
        .unwrap();
        CommandRouter::new(table)
    }

    #[test]
    fn test_aliases_reach_same_entry() {
        let router = router();
        for word in ["p", "price"] {
            match router.route(&inv(word, &["btc"])) {
                Route::Invoke { command, args, .. } => {
                    assert_eq!(command, "price");
                    assert_eq!(args, vec!["btc"]);
                }
                _ => panic!("expected invoke for {word}"),
            }
        }
    }

    #[test]
    fn test_too_few_args_is_invalid() {
        let router = router();
        let route = router.route(&inv("p", &[]));
        assert!(matches!(route, Route::Invalid { command: "price", .. }));

        let reply = route.reply().unwrap();
        assert_eq!(reply.title, "Invalid command, try `%price <coin>`");

        assert!(matches!(
            router.route(&inv("convert", &["1", "btc"])),
            Route::Invalid { command: "convert", .. }
        ));
    }

    #[test]
    fn test_unknown_and_case_sensitive() {
        let router = router();
        let route = router.route(&inv("nope", &[]));
        assert!(matches!(route, Route::Unknown));
        assert_eq!(
            route.reply().unwrap().title,
            "Invalid command, Try `%help` to get started"
        );
        assert!(matches!(router.route(&inv("HELP", &[])), Route::Unknown));
    }

    #[test]
    fn test_extra_args_are_passed_through() {
        match router().route(&inv("h", &["a", "b"])) {
            Route::Invoke { command, args, .. } => {
                assert_eq!(command, "help");
                assert_eq!(args, vec!["a", "b"]);
            }
            _ => panic!("expected invoke"),
        }
    }

    #[test]
    fn test_preset_args_replace_user_args() {
        match router().route(&inv("s/sbd", &["ignored"])) {
            Route::Invoke { args, .. } => assert_eq!(args, vec!["1", "steem", "sbd"]),
            _ => panic!("expected invoke"),
        }
    }

    #[test]
    fn test_overlapping_alias_rejected() {
        let noop: Arc<dyn CommandHandler> = Arc::new(Noop);
        let result = CommandTable::new(vec![
            CommandSpec::new("steem", &["s", "steem"], noop.clone()),
            CommandSpec::new("sh", &["sh", "s"], noop),
        ]);
        let err = result.err().unwrap().to_string();
        assert!(err.contains("'s'"), "{err}");
    }

    #[test]
    fn test_malformed_specs_rejected() {
        let noop: Arc<dyn CommandHandler> = Arc::new(Noop);
        assert!(CommandTable::new(vec![CommandSpec::new("empty", &[], noop.clone())]).is_err());

        let mut spec = CommandSpec::new("chart", &["chart"], noop);
        spec.min_args = 1;
        assert!(CommandTable::new(vec![spec]).is_err());
    }
}
