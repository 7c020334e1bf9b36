//! # Outbound Channels
//!
//! Two bounded FIFO queues, one for embeds and one for plain text, each drained by a
//! single [`DispatcherWorker`]. Producers (command handlers) only ever hold an
//! [`OutboundSender`]; a full queue makes `enqueue` wait, which is the backpressure on
//! handlers when the platform is slow.
//!
//! Lifecycle per queue: `Open` → `Draining` (on shutdown: receiver closed, queued messages
//! still delivered) → `Closed` (worker exited). Delivery is at-most-once: a failed send is
//! logged and the message is gone.

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::domain::config::DispatchConfig;
use crate::domain::traits::ChatPlatform;
use crate::domain::types::{
    ChannelId, Embed, MessageKind, OutboundEmbedMessage, OutboundPlainMessage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Open,
    Draining,
    Closed,
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelState::Open => write!(f, "open"),
            ChannelState::Draining => write!(f, "draining"),
            ChannelState::Closed => write!(f, "closed"),
        }
    }
}

/// A message one of the workers knows how to hand to the platform.
#[async_trait]
pub trait Deliverable: Send + Sync + 'static {
    const KIND: MessageKind;

    fn channel(&self) -> ChannelId;

    async fn deliver(&self, platform: &dyn ChatPlatform) -> Result<()>;
}

#[async_trait]
impl Deliverable for OutboundEmbedMessage {
    const KIND: MessageKind = MessageKind::Embed;

    fn channel(&self) -> ChannelId {
        self.channel
    }

    async fn deliver(&self, platform: &dyn ChatPlatform) -> Result<()> {
        platform.send_embed(self.channel, &self.embed).await
    }
}

#[async_trait]
impl Deliverable for OutboundPlainMessage {
    const KIND: MessageKind = MessageKind::Plain;

    fn channel(&self) -> ChannelId {
        self.channel
    }

    async fn deliver(&self, platform: &dyn ChatPlatform) -> Result<()> {
        platform.send_text(self.channel, &self.text).await
    }
}

/// Enqueue capability for one queue. Cheap to clone.
pub struct OutboundSender<M> {
    tx: mpsc::Sender<M>,
}

impl<M> Clone for OutboundSender<M> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<M: Deliverable> OutboundSender<M> {
    /// Waits for capacity when the queue is full; fails only once the queue is closed.
    pub async fn enqueue(&self, message: M) -> Result<()> {
        self.tx
            .send(message)
            .await
            .map_err(|_| anyhow!(crate::strings::logs::queue_closed(&M::KIND.to_string())))
    }
}

pub type EmbedSender = OutboundSender<OutboundEmbedMessage>;
pub type TextSender = OutboundSender<OutboundPlainMessage>;

impl EmbedSender {
    pub async fn send_embed(&self, channel: ChannelId, embed: Embed) -> Result<()> {
        self.enqueue(OutboundEmbedMessage { channel, embed }).await
    }
}

impl TextSender {
    pub async fn send_text(&self, channel: ChannelId, text: impl Into<String>) -> Result<()> {
        self.enqueue(OutboundPlainMessage {
            channel,
            text: text.into(),
        })
        .await
    }
}

/// Per-worker delivery counters, returned when the worker exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    pub delivered: usize,
    pub failed: usize,
}

/// Sequential consumer of one queue.
pub struct DispatcherWorker<M> {
    rx: mpsc::Receiver<M>,
    platform: Arc<dyn ChatPlatform>,
    shutdown: watch::Receiver<bool>,
    state: watch::Sender<ChannelState>,
}

impl<M: Deliverable> DispatcherWorker<M> {
    pub async fn run(mut self) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        let mut draining = false;
        tracing::debug!("{}", crate::strings::logs::worker_started(&M::KIND.to_string()));

        loop {
            tokio::select! {
                biased;
                _ = self.shutdown.changed(), if !draining => {
                    draining = true;
                    self.rx.close();
                    self.state.send_replace(ChannelState::Draining);
                }
                message = self.rx.recv() => {
                    let Some(message) = message else { break };
                    match message.deliver(self.platform.as_ref()).await {
                        Ok(()) => report.delivered += 1,
                        Err(e) => {
                            report.failed += 1;
                            tracing::error!(
                                "{}",
                                crate::strings::logs::send_failed(
                                    &M::KIND.to_string(),
                                    message.channel().0,
                                    &e.to_string(),
                                )
                            );
                        }
                    }
                }
            }
        }

        self.state.send_replace(ChannelState::Closed);
        tracing::debug!(
            "{}",
            crate::strings::logs::worker_stopped(&M::KIND.to_string(), report.delivered, report.failed)
        );
        report
    }
}

/// One queue's producer side plus what is needed to observe and stop its worker.
struct Lane<M> {
    sender: OutboundSender<M>,
    state: watch::Receiver<ChannelState>,
    worker: JoinHandle<DeliveryReport>,
}

fn spawn_lane<M: Deliverable>(
    capacity: usize,
    platform: Arc<dyn ChatPlatform>,
    shutdown: watch::Receiver<bool>,
) -> Lane<M> {
    let (tx, rx) = mpsc::channel(capacity);
    let (state_tx, state_rx) = watch::channel(ChannelState::Open);
    let worker = DispatcherWorker {
        rx,
        platform,
        shutdown,
        state: state_tx,
    };
    Lane {
        sender: OutboundSender { tx },
        state: state_rx,
        worker: tokio::spawn(worker.run()),
    }
}

/// Owns both outbound queues and their workers.
pub struct Outbox {
    embeds: Lane<OutboundEmbedMessage>,
    texts: Lane<OutboundPlainMessage>,
    shutdown: watch::Sender<bool>,
}

impl Outbox {
    /// Creates both queues and spawns their workers. Must be called inside a Tokio runtime.
    pub fn start(platform: Arc<dyn ChatPlatform>, config: &DispatchConfig) -> Self {
        let (shutdown, shutdown_rx) = watch::channel(false);
        Self {
            embeds: spawn_lane(
                config.embed_queue_capacity,
                platform.clone(),
                shutdown_rx.clone(),
            ),
            texts: spawn_lane(config.text_queue_capacity, platform, shutdown_rx),
            shutdown,
        }
    }

    pub fn embeds(&self) -> EmbedSender {
        self.embeds.sender.clone()
    }

    pub fn texts(&self) -> TextSender {
        self.texts.sender.clone()
    }

    pub fn state(&self, kind: MessageKind) -> ChannelState {
        match kind {
            MessageKind::Embed => *self.embeds.state.borrow(),
            MessageKind::Plain => *self.texts.state.borrow(),
        }
    }

    /// Stops accepting new messages, delivers what is queued, and waits for both workers.
    /// Returns the (embed, plain) reports.
    pub async fn shutdown(self) -> Result<(DeliveryReport, DeliveryReport)> {
        self.shutdown.send_replace(true);
        drop(self.embeds.sender);
        drop(self.texts.sender);
        let embed_report = self.embeds.worker.await?;
        let text_report = self.texts.worker.await?;
        Ok((embed_report, text_report))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::types::Color;
    use std::time::Duration;
    use tokio::sync::{Mutex, Semaphore};

    #[derive(Debug, Clone, PartialEq, Eq)]
    pub(crate) enum Sent {
        Embed(ChannelId, Embed),
        Text(ChannelId, String),
    }

    /// Records every send. Optionally fails sends whose text/title matches `fail_on`,
    /// and optionally blocks each send until a permit is added to `gate`.
    #[derive(Default)]
    pub(crate) struct RecordingPlatform {
        pub sent: Mutex<Vec<Sent>>,
        pub fail_on: Option<String>,
        pub gate: Option<Arc<Semaphore>>,
        pub started: Option<mpsc::UnboundedSender<()>>,
    }

    impl RecordingPlatform {
        pub(crate) async fn sent(&self) -> Vec<Sent> {
            self.sent.lock().await.clone()
        }

        async fn wait_gate(&self) {
            if let Some(tx) = &self.started {
                let _ = tx.send(());
            }
            if let Some(gate) = &self.gate {
                gate.acquire().await.unwrap().forget();
            }
        }
    }

    #[async_trait]
    impl ChatPlatform for RecordingPlatform {
        async fn send_embed(&self, channel: ChannelId, embed: &Embed) -> Result<()> {
            self.wait_gate().await;
            if self.fail_on.as_deref() == Some(embed.title.as_str()) {
                return Err(anyhow!("403 Missing Permissions"));
            }
            self.sent.lock().await.push(Sent::Embed(channel, embed.clone()));
            Ok(())
        }

        async fn send_text(&self, channel: ChannelId, text: &str) -> Result<()> {
            self.wait_gate().await;
            if self.fail_on.as_deref() == Some(text) {
                return Err(anyhow!("403 Missing Permissions"));
            }
            self.sent.lock().await.push(Sent::Text(channel, text.to_string()));
            Ok(())
        }
    }

    /// A sender whose queue is read directly by the test instead of a worker.
    pub(crate) fn sender_pair<M>(capacity: usize) -> (OutboundSender<M>, mpsc::Receiver<M>) {
        let (tx, rx) = mpsc::channel(capacity);
        (OutboundSender { tx }, rx)
    }

    fn config(capacity: usize) -> DispatchConfig {
        DispatchConfig {
            embed_queue_capacity: capacity,
            text_queue_capacity: capacity,
            ..DispatchConfig::default()
        }
    }

    fn texts_of(sent: &[Sent]) -> Vec<String> {
        sent.iter()
            .filter_map(|s| match s {
                Sent::Text(_, t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    fn titles_of(sent: &[Sent]) -> Vec<String> {
        sent.iter()
            .filter_map(|s| match s {
                Sent::Embed(_, e) => Some(e.title.clone()),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_fifo_per_channel_with_concurrent_producers() {
        let platform = Arc::new(RecordingPlatform::default());
        let outbox = Outbox::start(platform.clone(), &config(4));

        // Each producer serializes its own sends; the queue must preserve the order
        // in which enqueues completed.
        let order = Arc::new(Mutex::new(Vec::new()));
        let producers = (0..4).map(|p| {
            let embeds = outbox.embeds();
            let texts = outbox.texts();
            let order = order.clone();
            tokio::spawn(async move {
                for i in 0..25 {
                    let label = format!("p{p}-{i}");
                    // Hold the lock across the enqueue so `order` records enqueue order.
                    let mut guard = order.lock().await;
                    embeds
                        .send_embed(ChannelId(1), Embed::new(Color::Blue, label.clone()))
                        .await
                        .unwrap();
                    texts.send_text(ChannelId(1), label.clone()).await.unwrap();
                    guard.push(label);
                    drop(guard);
                    tokio::task::yield_now().await;
                }
            })
        });
        for result in futures::future::join_all(producers).await {
            result.unwrap();
        }

        let (embed_report, text_report) = outbox.shutdown().await.unwrap();
        assert_eq!(embed_report.delivered, 100);
        assert_eq!(text_report.delivered, 100);

        let sent = platform.sent().await;
        let expected = order.lock().await.clone();
        assert_eq!(titles_of(&sent), expected);
        assert_eq!(texts_of(&sent), expected);

        // Per-producer order is a consequence of the above.
        let p0: Vec<_> = titles_of(&sent).into_iter().filter(|t| t.starts_with("p0-")).collect();
        let want: Vec<_> = (0..25).map(|i| format!("p0-{i}")).collect();
        assert_eq!(p0, want);
    }

    #[tokio::test]
    async fn test_full_queue_blocks_until_worker_frees_capacity() {
        let gate = Arc::new(Semaphore::new(0));
        let (started_tx, mut started_rx) = mpsc::unbounded_channel();
        let platform = Arc::new(RecordingPlatform {
            gate: Some(gate.clone()),
            started: Some(started_tx),
            ..Default::default()
        });
        let outbox = Outbox::start(platform.clone(), &config(1));
        let texts = outbox.texts();

        // First message is taken by the worker, which then blocks inside the send.
        texts.send_text(ChannelId(1), "one").await.unwrap();
        started_rx.recv().await.unwrap();

        // Second fills the single slot.
        tokio::time::timeout(Duration::from_millis(200), texts.send_text(ChannelId(1), "two"))
            .await
            .expect("slot should be free")
            .unwrap();
        assert_eq!(texts.tx.capacity(), 0);

        // Third must wait rather than drop or fail.
        let blocked =
            tokio::time::timeout(Duration::from_millis(100), texts.send_text(ChannelId(1), "three"))
                .await;
        assert!(blocked.is_err());

        let pending = tokio::spawn({
            let texts = texts.clone();
            async move { texts.send_text(ChannelId(1), "three").await }
        });
        gate.add_permits(10);
        pending.await.unwrap().unwrap();

        drop(texts);
        outbox.shutdown().await.unwrap();
        assert_eq!(texts_of(&platform.sent().await), vec!["one", "two", "three"]);
    }

    #[tokio::test]
    async fn test_failed_send_is_dropped_and_worker_continues() {
        let platform = Arc::new(RecordingPlatform {
            fail_on: Some("bad".to_string()),
            ..Default::default()
        });
        let outbox = Outbox::start(platform.clone(), &config(8));
        let texts = outbox.texts();
        for text in ["a", "bad", "b"] {
            texts.send_text(ChannelId(5), text).await.unwrap();
        }
        drop(texts);

        let (_, report) = outbox.shutdown().await.unwrap();
        assert_eq!(report, DeliveryReport { delivered: 2, failed: 1 });
        assert_eq!(texts_of(&platform.sent().await), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_shutdown_drains_queued_messages_and_closes() {
        let gate = Arc::new(Semaphore::new(0));
        let platform = Arc::new(RecordingPlatform {
            gate: Some(gate.clone()),
            ..Default::default()
        });
        let outbox = Outbox::start(platform.clone(), &config(8));
        assert_eq!(outbox.state(MessageKind::Embed), ChannelState::Open);
        assert_eq!(outbox.state(MessageKind::Plain).to_string(), "open");

        let embeds = outbox.embeds();
        for title in ["x", "y", "z"] {
            embeds
                .send_embed(ChannelId(2), Embed::error(title))
                .await
                .unwrap();
        }

        let mut state = outbox.embeds.state.clone();
        let mut signal = outbox.shutdown.subscribe();
        let shutdown = tokio::spawn(outbox.shutdown());
        signal.wait_for(|stop| *stop).await.unwrap();

        // The worker is parked inside the send of "x"; once that completes it notices the
        // shutdown before taking "y".
        gate.add_permits(1);
        state
            .wait_for(|s| *s == ChannelState::Draining)
            .await
            .unwrap();

        // Draining: late producers are refused while queued messages are still pending.
        assert!(embeds.send_embed(ChannelId(2), Embed::error("late")).await.is_err());

        gate.add_permits(10);
        let (embed_report, text_report) = shutdown.await.unwrap().unwrap();
        assert_eq!(embed_report.delivered, 3);
        assert_eq!(text_report, DeliveryReport::default());
        assert_eq!(*state.borrow(), ChannelState::Closed);
        assert_eq!(titles_of(&platform.sent().await), vec!["x", "y", "z"]);
    }
}
