//! StoreService - background thread owning the store backend
//!
//! Commands arrive on a crossbeam channel; results go back through oneshot
//! reply channels, so the async client never blocks the caller's thread.

use std::thread;

use crossbeam::channel::{Receiver, Sender};
use tokio::sync::oneshot;

use super::messages::{ServiceHandle, StoreCommand};
use super::store::StoreBackend;
use crate::error::{StoreError, StoreResult};

/// Runs a [`StoreBackend`] on its own thread
pub struct StoreService<B: StoreBackend> {
    backend: B,
    command_rx: Receiver<StoreCommand>,
}

impl<B: StoreBackend> StoreService<B> {
    /// Spawn the service thread
    ///
    /// Returns a handle for sending commands to the service.
    pub fn spawn(backend: B) -> StoreResult<ServiceHandle<StoreCommand>> {
        let (command_tx, command_rx) = crossbeam::channel::unbounded();

        let service = StoreService {
            backend,
            command_rx,
        };

        let handle = thread::Builder::new()
            .name("store-service".into())
            .spawn(move || {
                service.run();
            })
            .map_err(|e| StoreError::SpawnFailed(e.to_string()))?;

        Ok(ServiceHandle::new(command_tx, handle))
    }

    /// Main service loop
    fn run(mut self) {
        log::info!("StoreService started");

        while let Ok(cmd) = self.command_rx.recv() {
            match cmd {
                StoreCommand::Shutdown => {
                    log::info!("StoreService shutting down");
                    break;
                }
                _ => self.handle_command(cmd),
            }
        }

        log::info!("StoreService stopped");
    }

    /// Handle a single command
    fn handle_command(&mut self, cmd: StoreCommand) {
        match cmd {
            StoreCommand::AllocateUserId { reply } => {
                let result = self.backend.allocate_user_id();
                if let Err(e) = &result {
                    log::error!("StoreService: allocate_user_id failed: {}", e);
                }
                let _ = reply.send(result);
            }

            StoreCommand::UserExists { user_id, reply } => {
                let _ = reply.send(self.backend.user_exists(&user_id));
            }

            StoreCommand::SaveExport {
                user_id,
                text,
                reply,
            } => {
                let result = self.backend.save_export(&user_id, &text);
                if let Err(e) = &result {
                    log::warn!("StoreService: save_export for {} failed: {}", user_id, e);
                }
                let _ = reply.send(result);
            }

            StoreCommand::Shutdown => {
                // Handled in run() loop
            }
        }
    }
}

/// Async client for the store service
#[derive(Clone)]
pub struct StoreClient {
    command_tx: Sender<StoreCommand>,
}

impl StoreClient {
    pub fn new(handle: &ServiceHandle<StoreCommand>) -> Self {
        Self {
            command_tx: handle.command_tx.clone(),
        }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<StoreResult<T>>) -> StoreCommand,
    ) -> StoreResult<T> {
        let (tx, rx) = oneshot::channel();
        self.command_tx
            .send(build(tx))
            .map_err(|_| StoreError::ServiceStopped)?;
        rx.await.map_err(|_| StoreError::ServiceStopped)?
    }

    /// Allocate a fresh anonymous user id
    pub async fn allocate_user_id(&self) -> StoreResult<String> {
        self.request(|reply| StoreCommand::AllocateUserId { reply })
            .await
    }

    pub async fn user_exists(&self, user_id: &str) -> StoreResult<bool> {
        let user_id = user_id.to_string();
        self.request(|reply| StoreCommand::UserExists { user_id, reply })
            .await
    }

    /// Submit export text for a user; no retry on failure
    pub async fn submit_export(&self, user_id: &str, text: &str) -> StoreResult<()> {
        let user_id = user_id.to_string();
        let text = text.to_string();
        self.request(|reply| StoreCommand::SaveExport {
            user_id,
            text,
            reply,
        })
        .await
    }

    /// Shutdown the service
    pub fn shutdown(&self) -> StoreResult<()> {
        self.command_tx
            .send(StoreCommand::Shutdown)
            .map_err(|_| StoreError::ServiceStopped)
    }
}
