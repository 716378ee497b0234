//! WebEQ Core - Filter-bank computation and interactive editing engine
//!
//! Everything that has real numeric or state-machine content in the WebEQ
//! equalizer editor lives here:
//!
//! - [`dsp`]: biquad coefficients, magnitude evaluation, cascade aggregation
//! - [`bank`]: the PEQ filter nodes and the fixed 31-band GEQ
//! - [`editor`]: editing state machine, drag/wheel math, screen mappings
//! - [`curve`]: response curve and marker builder
//! - [`export`]: plain-text filter export
//! - [`services`]: identity/export store behind an async client
//! - [`session`]: the owning editing session tying it all together
//!
//! Rendering, HTTP transport and raw input capture are left to the caller.

pub mod bank;
pub mod config;
pub mod curve;
pub mod dsp;
pub mod editor;
pub mod error;
pub mod export;
pub mod services;
pub mod session;
pub mod types;

pub use session::EqSession;
pub use types::*;
