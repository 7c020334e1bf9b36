//! # Channel Whitelist
//!
//! The only access-control gate: events from channels outside the whitelist are dropped
//! before any parsing happens. Loaded once from config and never mutated.

use std::collections::HashSet;

use crate::domain::types::ChannelId;

#[derive(Debug, Clone, Default)]
pub struct Whitelist {
    channels: HashSet<ChannelId>,
}

impl Whitelist {
    pub fn new(channels: impl IntoIterator<Item = ChannelId>) -> Self {
        Self {
            channels: channels.into_iter().collect(),
        }
    }

    pub fn allows(&self, channel: ChannelId) -> bool {
        self.channels.contains(&channel)
    }

    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}
