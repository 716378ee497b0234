//! Message types for the store service
//!
//! Commands are request-reply: each carries a oneshot sender the service
//! answers on, so callers can await the result without blocking.

use tokio::sync::oneshot;

use crate::error::StoreResult;

/// Commands sent to the StoreService
pub enum StoreCommand {
    /// Create a new anonymous user id
    AllocateUserId {
        reply: oneshot::Sender<StoreResult<String>>,
    },

    /// Check whether the store still knows a user id
    UserExists {
        user_id: String,
        reply: oneshot::Sender<StoreResult<bool>>,
    },

    /// Persist an export text for a user
    SaveExport {
        user_id: String,
        text: String,
        reply: oneshot::Sender<StoreResult<()>>,
    },

    /// Stop the service thread
    Shutdown,
}

impl std::fmt::Debug for StoreCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreCommand::AllocateUserId { .. } => write!(f, "AllocateUserId"),
            StoreCommand::UserExists { user_id, .. } => write!(f, "UserExists({})", user_id),
            StoreCommand::SaveExport { user_id, text, .. } => {
                write!(f, "SaveExport({}, {} bytes)", user_id, text.len())
            }
            StoreCommand::Shutdown => write!(f, "Shutdown"),
        }
    }
}

/// Handle to a running service thread
///
/// Dropping the handle leaves the thread running until a client sends
/// `Shutdown`.
pub struct ServiceHandle<Cmd> {
    pub(crate) command_tx: crossbeam::channel::Sender<Cmd>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl<Cmd> ServiceHandle<Cmd> {
    pub(crate) fn new(
        command_tx: crossbeam::channel::Sender<Cmd>,
        thread: std::thread::JoinHandle<()>,
    ) -> Self {
        Self {
            command_tx,
            thread: Some(thread),
        }
    }

    /// False once the thread has exited or been joined
    pub fn is_running(&self) -> bool {
        matches!(&self.thread, Some(thread) if !thread.is_finished())
    }

    /// Wait for the service thread to exit
    pub fn join(&mut self) {
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("Service thread panicked");
            }
        }
    }
}
