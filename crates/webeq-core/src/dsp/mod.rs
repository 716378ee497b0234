//! Frequency-response model
//!
//! Only the response *model* is computed here; no samples are filtered.
//!
//! ```text
//! (type, freq, gain, Q) ──► biquad::calc_coeffs ──► BiquadCoeffs
//!                                                       │
//!                           response::magnitude_at ◄────┘
//!                                   │
//!             cascade::{peq,geq}_response_db  (multiply stages, then dB)
//! ```

pub mod biquad;
pub mod cascade;
pub mod response;

pub use biquad::{calc_coeffs, BiquadCoeffs, SectionKind};
pub use cascade::{
    geq_magnitude, geq_response_db, node_sections, pass_sections, peq_magnitude,
    peq_response_db, Section,
};
pub use response::{magnitude_at, magnitude_to_db};
