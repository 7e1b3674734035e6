#![forbid(unsafe_code)]

//! Rule-based classifier for free-text error reports.
//!
//! [`classify`] turns an error message and optional stack trace into a
//! [`Verdict`](model::Verdict): category, confidence, severity, action
//! signal, evidence, and guidance text.

pub mod api;
pub mod guidance;
pub mod model;
pub mod rules;

mod classify;

pub use classify::{classify, normalize, Classifier};
pub use guidance::{explain, explain_label};
