use std::fmt::{self, Debug};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::{JoinHandle, JoinSet};
use tracing::Instrument;

use super::{SessionEvent, SessionStage, SubscriptionId};
use crate::conversation::{Message, Transcript};
use crate::responder::{FallbackReason, Reply, Responder};

pub(super) type Subscriber = Box<dyn Fn(&SessionEvent) + Send + Sync>;

pub(super) enum Command {
    Submit(String),
    Subscribe(SubscriptionId, Subscriber),
    Unsubscribe(SubscriptionId),
    Clear,
    Transcript(oneshot::Sender<Transcript>),
    Stage(oneshot::Sender<SessionStage>),
    ReplyReady { generation: u64, reply: Reply },
}

impl Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Submit(text) => {
                f.debug_tuple("Submit").field(text).finish()
            }
            Command::Subscribe(id, _) => {
                f.debug_tuple("Subscribe").field(id).finish_non_exhaustive()
            }
            Command::Unsubscribe(id) => {
                f.debug_tuple("Unsubscribe").field(id).finish()
            }
            Command::Clear => f.write_str("Clear"),
            Command::Transcript(_) => f.write_str("Transcript"),
            Command::Stage(_) => f.write_str("Stage"),
            Command::ReplyReady { generation, reply } => f
                .debug_struct("ReplyReady")
                .field("generation", generation)
                .field("reply", reply)
                .finish(),
        }
    }
}

/// State owned by the session task.
///
/// `generation` is bumped on every reset. A reply carries the generation it
/// was requested in and is dropped if that no longer matches.
pub(super) struct SessionState {
    responder: Arc<Responder>,
    typing_delay: Duration,
    transcript: Transcript,
    stage: SessionStage,
    generation: u64,
    in_flight: Option<JoinHandle<()>>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    on_idle: Option<Box<dyn Fn() + Send + Sync>>,
    cmd_tx: mpsc::WeakUnboundedSender<Command>,
}

impl SessionState {
    pub(super) fn new(
        responder: Arc<Responder>,
        typing_delay: Duration,
        on_idle: Option<Box<dyn Fn() + Send + Sync>>,
        cmd_tx: mpsc::WeakUnboundedSender<Command>,
    ) -> Self {
        Self {
            responder,
            typing_delay,
            transcript: Default::default(),
            stage: Default::default(),
            generation: 0,
            in_flight: None,
            subscribers: Default::default(),
            on_idle,
            cmd_tx,
        }
    }

    pub(super) fn handle(&mut self, cmd: Command) {
        match cmd {
            Command::Submit(text) => self.submit(text),
            Command::Subscribe(id, subscriber) => {
                self.subscribers.push((id, subscriber))
            }
            Command::Unsubscribe(id) => {
                self.subscribers.retain(|(other, _)| *other != id)
            }
            Command::Clear => self.clear(),
            Command::Transcript(tx) => {
                tx.send(self.transcript.clone()).ok();
            }
            Command::Stage(tx) => {
                tx.send(self.stage).ok();
            }
            Command::ReplyReady { generation, reply } => {
                self.finish_reply(generation, reply)
            }
        }
    }

    pub(super) fn shutdown(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }

    fn submit(&mut self, text: String) {
        let text = text.trim();
        if text.is_empty() {
            trace!("ignored a blank submission");
            return;
        }
        if self.stage != SessionStage::Idle {
            // One reply at a time. Extra submissions are dropped rather
            // than queued.
            debug!("ignored a submission while awaiting a reply");
            return;
        }

        let text = text.to_owned();
        self.append(Message::user(text.clone()));
        self.set_stage(SessionStage::AwaitingReply);
        self.spawn_reply(text);
    }

    fn spawn_reply(&mut self, text: String) {
        let responder = Arc::clone(&self.responder);
        let typing_delay = self.typing_delay;
        let generation = self.generation;
        let cmd_tx = self.cmd_tx.clone();
        let task = tokio::spawn(
            async move {
                let (_, reply) = tokio::join!(
                    tokio::time::sleep(typing_delay),
                    respond_or_fallback(responder, text),
                );
                let Some(cmd_tx) = cmd_tx.upgrade() else {
                    debug!("session has been dropped, discard the reply");
                    return;
                };
                cmd_tx.send(Command::ReplyReady { generation, reply }).ok();
            }
            .instrument(trace_span!("reply", generation)),
        );
        self.in_flight = Some(task);
    }

    fn finish_reply(&mut self, generation: u64, reply: Reply) {
        if generation != self.generation
            || self.stage != SessionStage::AwaitingReply
        {
            debug!("discard a stale reply from generation {generation}");
            return;
        }
        self.in_flight = None;

        trace!("reply source: {:?}", reply.source);
        self.append(Message::assistant(reply.text));
        self.set_stage(SessionStage::Idle);
        if let Some(on_idle) = &self.on_idle {
            on_idle();
        }
    }

    fn clear(&mut self) {
        self.generation += 1;
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        self.transcript.clear();
        self.set_stage(SessionStage::Idle);
        self.emit(&SessionEvent::Cleared);
    }

    fn append(&mut self, message: Message) {
        self.transcript.push(message.clone());
        self.emit(&SessionEvent::Message(message));
    }

    fn set_stage(&mut self, stage: SessionStage) {
        if self.stage == stage {
            return;
        }
        self.stage = stage;
        self.emit(&SessionEvent::StageChanged(stage));
    }

    #[inline]
    fn emit(&self, event: &SessionEvent) {
        for (_, subscriber) in &self.subscribers {
            subscriber(event);
        }
    }
}

/// Runs the responder on its own task, so a panic inside the model provider
/// still ends with a reply. Dropping the returned future aborts the task.
async fn respond_or_fallback(responder: Arc<Responder>, text: String) -> Reply {
    let mut responding = JoinSet::new();
    responding.spawn({
        let responder = Arc::clone(&responder);
        let text = text.clone();
        async move { responder.respond(&text).await }.in_current_span()
    });
    match responding.join_next().await {
        Some(Ok(reply)) => reply,
        result => {
            if let Some(Err(err)) = result {
                error!("responder task failed: {err}");
            }
            responder.offline_reply(&text, FallbackReason::Transport)
        }
    }
}
