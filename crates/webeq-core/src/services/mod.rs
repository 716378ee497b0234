//! Background services for webeq-core
//!
//! The identity/export store runs on its own thread so the editing session
//! stays synchronous; the session only sees an async request/reply client.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     Commands      ┌──────────────┐
//! │ StoreClient │ ───────────────►  │ StoreService │
//! │   (async)   │ ◄───────────────  │  (backend)   │
//! └─────────────┘  oneshot replies  └──────────────┘
//!                                          │
//!                               MemoryStore | FileStore
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use webeq_core::services::{ensure_user_id, MemoryStore, StoreClient, StoreService};
//!
//! # async fn run() -> webeq_core::error::StoreResult<()> {
//! let handle = StoreService::spawn(MemoryStore::new())?;
//! let client = StoreClient::new(&handle);
//!
//! let user_id = ensure_user_id(&client, None).await?;
//! client.submit_export(&user_id, "Filter Settings file\n").await?;
//!
//! client.shutdown()?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod identity;
pub mod messages;
pub mod store;

pub use client::{StoreClient, StoreService};
pub use identity::ensure_user_id;
pub use messages::{ServiceHandle, StoreCommand};
pub use store::{
    generate_user_id, is_valid_user_id, FileStore, MemoryStore, StoreBackend,
    LATEST_EXPORT_FILE, USER_ID_LEN,
};
