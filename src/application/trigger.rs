//! # Trigger Parsing
//!
//! Classifies a chat message by its first character and splits the rest into a
//! command invocation:
//! - `$btc` is the price shortcut, equivalent to `%price btc`.
//! - `%cmd arg1 arg2` is the generic command grammar.
//! - anything else is ignored.

use crate::domain::types::CommandInvocation;

pub const PRICE_TRIGGER: char = '$';
pub const COMMAND_TRIGGER: char = '%';

/// Command word the price shortcut expands to.
pub const PRICE_COMMAND: &str = "price";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Price,
    Command,
    None,
}

impl Trigger {
    pub fn classify(content: &str) -> Self {
        match content.chars().next() {
            Some(PRICE_TRIGGER) => Trigger::Price,
            Some(COMMAND_TRIGGER) => Trigger::Command,
            _ => Trigger::None,
        }
    }
}

impl CommandInvocation {
    /// Parses a raw message. `None` means the message is silently dropped:
    /// no trigger, or a trigger followed by no tokens.
    pub fn parse(content: &str) -> Option<Self> {
        let trigger = Trigger::classify(content);
        let mut first = content.chars();
        first.next();
        let mut tokens = first.as_str().split_whitespace().map(str::to_string);

        match trigger {
            Trigger::Price => {
                let coin = tokens.next()?;
                Some(Self {
                    command: PRICE_COMMAND.to_string(),
                    args: vec![coin],
                })
            }
            Trigger::Command => {
                let command = tokens.next()?;
                Some(Self {
                    command,
                    args: tokens.collect(),
                })
            }
            Trigger::None => None,
        }
    }
}
