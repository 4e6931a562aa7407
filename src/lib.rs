// THEORY:
// This file is the entry point for the `krishi_rakshak` library crate. It exposes
// the `KrishiRakshak` orchestrator and its report types (`pipeline`) as the
// high-level interface, the renderers for those reports (`report`), and the shared
// error type (`error`).
//
// The analyzers themselves live under `core_modules`: pixel and grid containers,
// the severity estimator with its pluggable confidence source, the treatment
// catalog, guidance formatting, and effectiveness tracking. They are public so a
// caller with its own decoder or classifier can use any stage on its own.

pub mod core_modules;
pub mod error;
pub mod pipeline;
pub mod report;

pub use core_modules::locale::Locale;
pub use error::AgentError;
pub use pipeline::{AgentConfig, AgentReport, KrishiRakshak};
