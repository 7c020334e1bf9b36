//! # Event Dispatcher
//!
//! Entry point for every inbound chat message:
//! own-message check → whitelist → session refresh (spawned) → trigger parsing → routing →
//! canned error reply or handler execution.
//!
//! Handlers run on their own tasks. Admission is bounded by a semaphore sized from
//! `dispatch.max_concurrent_handlers`; waiting for a permit holds up intake for that event,
//! which mirrors the backpressure the outbound queues apply to handlers. Each handler is
//! given `dispatch.handler_timeout_secs` to finish.

use anyhow::{Context, Result, anyhow};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;

use crate::application::filter::Whitelist;
use crate::application::handler::CommandContext;
use crate::application::outbound::{EmbedSender, TextSender};
use crate::application::router::{CommandRouter, Route};
use crate::application::session::SessionState;
use crate::domain::config::DispatchConfig;
use crate::domain::traits::SessionSource;
use crate::domain::types::{CommandInvocation, Embed, InboundEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    OwnMessage,
    NotWhitelisted,
    NoCommand,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            IgnoreReason::OwnMessage => "own message",
            IgnoreReason::NotWhitelisted => "channel not whitelisted",
            IgnoreReason::NoCommand => "no command",
        };
        f.write_str(reason)
    }
}

/// What happened to one inbound event.
#[derive(Debug)]
pub enum Dispatch {
    Ignored(IgnoreReason),
    /// A canned routing error was enqueued.
    Replied,
    /// A handler is running on the returned task.
    Spawned(JoinHandle<()>),
}

impl Dispatch {
    /// Logs how the event ended, waiting for a spawned handler to finish.
    /// Fails only when the handler task panicked or was cancelled.
    pub async fn settle(self) -> Result<()> {
        match self {
            Dispatch::Ignored(reason) => {
                tracing::trace!("{}", crate::strings::logs::event_ignored(&reason.to_string()));
                Ok(())
            }
            Dispatch::Replied => Ok(()),
            Dispatch::Spawned(task) => task
                .await
                .map_err(|e| anyhow!(crate::strings::logs::handler_aborted(&e.to_string()))),
        }
    }
}

pub struct EventDispatcher {
    whitelist: Whitelist,
    router: Arc<CommandRouter>,
    session: SessionState,
    embeds: EmbedSender,
    texts: TextSender,
    admission: Arc<Semaphore>,
    handler_timeout: Duration,
}

impl EventDispatcher {
    pub fn new(
        whitelist: Whitelist,
        router: Arc<CommandRouter>,
        session: SessionState,
        embeds: EmbedSender,
        texts: TextSender,
        config: &DispatchConfig,
    ) -> Self {
        Self {
            whitelist,
            router,
            session,
            embeds,
            texts,
            admission: Arc::new(Semaphore::new(config.max_concurrent_handlers)),
            handler_timeout: config.handler_timeout(),
        }
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub async fn handle_event<S>(&self, event: InboundEvent, source: S) -> Result<Dispatch>
    where
        S: SessionSource + 'static,
    {
        let session = self.session.snapshot();
        if session.is_self(event.author) {
            return Ok(Dispatch::Ignored(IgnoreReason::OwnMessage));
        }

        if !self.whitelist.allows(event.channel) {
            return Ok(Dispatch::Ignored(IgnoreReason::NotWhitelisted));
        }

        self.session.spawn_refresh(source);

        let Some(invocation) = CommandInvocation::parse(&event.content) else {
            return Ok(Dispatch::Ignored(IgnoreReason::NoCommand));
        };

        tracing::info!(
            "{}",
            crate::strings::logs::dispatching(
                &invocation.command,
                &invocation.args,
                event.channel.0,
                event.author.0
            )
        );

        let route = self.router.route(&invocation);
        let (command, handler, args) = match route {
            Route::Invoke {
                command,
                handler,
                args,
            } => (command, handler, args),
            other => {
                if let Route::Invalid { command, usage } = &other {
                    tracing::debug!(
                        "{}",
                        crate::strings::logs::missing_arguments(command, invocation.args.len(), usage)
                    );
                }
                if let Some(reply) = other.reply() {
                    self.embeds.send_embed(event.channel, reply).await?;
                }
                return Ok(Dispatch::Replied);
            }
        };

        let permit = self
            .admission
            .clone()
            .acquire_owned()
            .await
            .context("handler pool closed")?;

        let ctx = CommandContext {
            channel: event.channel,
            args,
            session,
            embeds: self.embeds.clone(),
            texts: self.texts.clone(),
        };
        let timeout = self.handler_timeout;

        let task = tokio::spawn(async move {
            let _permit = permit;
            let channel = ctx.channel;
            let embeds = ctx.embeds.clone();

            let failure = match tokio::time::timeout(timeout, handler.handle(ctx)).await {
                Ok(Ok(())) => None,
                Ok(Err(e)) => {
                    tracing::error!("{}", crate::strings::logs::handler_failed(command, &e.to_string()));
                    Some(Embed::error(crate::strings::messages::COMMAND_FAILED))
                }
                Err(_) => {
                    tracing::warn!("{}", crate::strings::logs::handler_timed_out(command, timeout));
                    Some(Embed::error(crate::strings::messages::COMMAND_TIMED_OUT))
                }
            };

            if let Some(embed) = failure
                && let Err(e) = embeds.send_embed(channel, embed).await
            {
                tracing::error!("{}", crate::strings::logs::handler_failed(command, &e.to_string()));
            }
        });

        Ok(Dispatch::Spawned(task))
    }
}
