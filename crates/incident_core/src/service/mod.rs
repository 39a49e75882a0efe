//! Session-level use-case services.
//!
//! # Responsibility
//! - Orchestrate projection, selection and view synchronization per call.
//! - Keep render adapters decoupled from component wiring.

pub mod session;
