mod builder;
mod state;

use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::select;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::Instrument;

use crate::conversation::{Message, Transcript};
pub use builder::{DEFAULT_TYPING_DELAY, SessionBuilder};
use state::{Command, SessionState};

/// Where a session is in its request/reply cycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum SessionStage {
    /// Ready to accept a submission.
    #[default]
    Idle,
    /// A reply is being produced. Submissions are ignored.
    AwaitingReply,
}

/// A change that subscribers are notified about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// A message was appended to the transcript.
    Message(Message),
    /// The session moved to another stage.
    StageChanged(SessionStage),
    /// The transcript was dropped by [`Session::clear`].
    Cleared,
}

/// Identifies a callback registered with [`Session::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Returned when talking to a session whose task has ended.
pub struct SessionClosedError;

impl Debug for SessionClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionClosedError").finish()
    }
}

impl Display for SessionClosedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the session has been closed")
    }
}

impl Error for SessionClosedError {}

/// Error returned by [`Session::export_json`].
#[derive(Debug)]
pub enum ExportError {
    /// The session task has ended.
    Closed(SessionClosedError),
    /// The transcript could not be serialized.
    Serialize(serde_json::Error),
}

impl Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Closed(err) => Display::fmt(err, f),
            ExportError::Serialize(err) => {
                write!(f, "failed to serialize the transcript: {err}")
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ExportError::Closed(err) => Some(err),
            ExportError::Serialize(err) => Some(err),
        }
    }
}

impl From<SessionClosedError> for ExportError {
    #[inline]
    fn from(err: SessionClosedError) -> Self {
        ExportError::Closed(err)
    }
}

impl From<serde_json::Error> for ExportError {
    #[inline]
    fn from(err: serde_json::Error) -> Self {
        ExportError::Serialize(err)
    }
}

/// A conversation session, which owns a transcript and a responder.
///
/// The session runs on its own task and every method only sends a command
/// to it, so handles are cheap to clone and can be shared freely. Commands
/// are handled in the order they were sent. The task ends when
/// [`Session::close`] is called or when the last handle is dropped.
#[derive(Clone)]
pub struct Session {
    cmd_tx: mpsc::UnboundedSender<Command>,
    kill_tx: Arc<watch::Sender<bool>>,
    next_subscription: Arc<AtomicU64>,
}

impl Session {
    /// Submits a user message.
    ///
    /// Blank messages are ignored, and so is anything submitted while a
    /// reply is still pending.
    #[inline]
    pub fn submit<S: Into<String>>(
        &self,
        text: S,
    ) -> Result<(), SessionClosedError> {
        self.send(Command::Submit(text.into()))
    }

    /// Registers a callback that receives every subsequent event.
    ///
    /// Callbacks run on the session task and must not block. The returned
    /// id can be passed to [`Session::unsubscribe`].
    pub fn subscribe(
        &self,
        on_event: impl Fn(&SessionEvent) + Send + Sync + 'static,
    ) -> Result<SubscriptionId, SessionClosedError> {
        let id = SubscriptionId(
            self.next_subscription.fetch_add(1, Ordering::Relaxed),
        );
        self.send(Command::Subscribe(id, Box::new(on_event)))?;
        Ok(id)
    }

    /// Removes a callback. Events emitted after this call are not delivered
    /// to it. Unknown ids are ignored.
    #[inline]
    pub fn unsubscribe(
        &self,
        id: SubscriptionId,
    ) -> Result<(), SessionClosedError> {
        self.send(Command::Unsubscribe(id))
    }

    /// Drops the transcript and any pending reply.
    #[inline]
    pub fn clear(&self) -> Result<(), SessionClosedError> {
        self.send(Command::Clear)
    }

    /// Returns a snapshot of the transcript.
    pub async fn transcript(&self) -> Result<Transcript, SessionClosedError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Transcript(tx))?;
        rx.await.map_err(|_| SessionClosedError)
    }

    /// Returns the current stage.
    pub async fn stage(&self) -> Result<SessionStage, SessionClosedError> {
        let (tx, rx) = oneshot::channel();
        self.send(Command::Stage(tx))?;
        rx.await.map_err(|_| SessionClosedError)
    }

    /// Serializes the transcript, see [`Transcript::export_json`].
    pub async fn export_json(&self) -> Result<String, ExportError> {
        let transcript = self.transcript().await?;
        Ok(transcript.export_json()?)
    }

    /// Asks the session task to stop.
    ///
    /// Pending commands are discarded and an in-flight reply is aborted.
    #[inline]
    pub fn close(&self) {
        self.kill_tx.send(true).ok();
    }

    #[inline]
    fn send(&self, cmd: Command) -> Result<(), SessionClosedError> {
        self.cmd_tx.send(cmd).map_err(|_| SessionClosedError)
    }

    fn spawn_from_builder(builder: SessionBuilder) -> Self {
        let SessionBuilder {
            responder,
            typing_delay,
            on_idle,
        } = builder;

        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (kill_tx, kill_rx) = watch::channel(false);
        let state = SessionState::new(
            Arc::new(responder),
            typing_delay,
            on_idle,
            cmd_tx.downgrade(),
        );
        tokio::spawn(
            run_session(state, cmd_rx, kill_rx)
                .instrument(trace_span!("session")),
        );
        Self {
            cmd_tx,
            kill_tx: Arc::new(kill_tx),
            next_subscription: Default::default(),
        }
    }
}

impl Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("closed", &self.cmd_tx.is_closed())
            .finish_non_exhaustive()
    }
}

async fn run_session(
    mut state: SessionState,
    mut cmd_rx: mpsc::UnboundedReceiver<Command>,
    mut kill_rx: watch::Receiver<bool>,
) {
    debug!("started");
    loop {
        let cmd = select! {
            biased;

            _ = kill_rx.changed() => {
                break;
            }
            cmd = cmd_rx.recv() => {
                let Some(cmd) = cmd else {
                    break;
                };
                cmd
            }
        };
        trace!("received command: {cmd:?}");

        let proc_span = trace_span!("proc cmd");
        proc_span.in_scope(|| {
            state.handle(cmd);
            trace!("finished");
        });
    }
    state.shutdown();
    debug!("will terminate");
}
