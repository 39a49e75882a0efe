//! Selection Resolver: interaction events to projection positions.
//!
//! # Responsibility
//! - Decide which projection entry a marker or card interaction refers to.
//! - Retain the last polled click-counter vector between calls.
//!
//! # Invariants
//! - Card polls resolve by per-index counter delta, never by raw arg-max.
//! - Resolution failure leaves the selection unchanged and is not an error.
//! - Within one update cycle, card input takes precedence over map input.

pub mod resolver;

pub use resolver::{
    InteractionEvent, NoOpReason, Resolution, ResolutionOutcome, SelectionResolver,
    SelectionSource, SelectionState,
};
