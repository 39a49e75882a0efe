//! View State Synchronizer: card list and map descriptors.
//!
//! # Responsibility
//! - Turn `(projection, selection)` into fresh, immutable view descriptors.
//!
//! # Invariants
//! - Output is a pure function of its inputs.
//! - The selected card is first; every other card keeps projection order.
//! - Exactly one marker per projected record, in projection order.

pub mod sync;

pub use sync::{synchronize, CardStyle, CardView, MapView, MarkerView, ViewState};
