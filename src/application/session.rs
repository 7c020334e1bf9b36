//! # Session State
//!
//! Holds the most recent view of the bot's platform connection (own user id, name, guild count).
//! There is a single writer (the refresh routine) and many readers; readers take an
//! `Arc<SessionSnapshot>` per invocation and may observe a slightly stale value.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::watch;

use crate::domain::traits::SessionSource;
use crate::domain::types::UserId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub bot_user_id: Option<UserId>,
    pub bot_name: Option<String>,
    pub guild_count: usize,
    pub updated_at: DateTime<Utc>,
}

impl SessionSnapshot {
    pub fn new(bot_user_id: UserId, bot_name: impl Into<String>, guild_count: usize) -> Self {
        Self {
            bot_user_id: Some(bot_user_id),
            bot_name: Some(bot_name.into()),
            guild_count,
            updated_at: Utc::now(),
        }
    }

    /// Snapshot before the platform has reported anything.
    pub fn disconnected() -> Self {
        Self {
            bot_user_id: None,
            bot_name: None,
            guild_count: 0,
            updated_at: Utc::now(),
        }
    }

    pub fn is_self(&self, author: UserId) -> bool {
        self.bot_user_id == Some(author)
    }

    /// Whole seconds since this snapshot was taken, never negative.
    pub fn age_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.updated_at).num_seconds().max(0)
    }
}

#[derive(Clone)]
pub struct SessionState {
    tx: Arc<watch::Sender<Arc<SessionSnapshot>>>,
}

impl SessionState {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Arc::new(SessionSnapshot::disconnected()));
        Self { tx: Arc::new(tx) }
    }

    /// Overwrites the held snapshot.
    pub fn publish(&self, snapshot: SessionSnapshot) {
        self.tx.send_replace(Arc::new(snapshot));
    }

    pub fn snapshot(&self) -> Arc<SessionSnapshot> {
        self.tx.borrow().clone()
    }

    #[cfg(test)]
    pub fn subscribe(&self) -> watch::Receiver<Arc<SessionSnapshot>> {
        self.tx.subscribe()
    }

    /// Refreshes from `source` on a separate task so event intake never waits on it.
    pub fn spawn_refresh<S>(&self, source: S) -> tokio::task::JoinHandle<()>
    where
        S: SessionSource + 'static,
    {
        let state = self.clone();
        tokio::spawn(async move {
            if let Some(snapshot) = source.snapshot() {
                state.publish(snapshot);
            }
        })
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
