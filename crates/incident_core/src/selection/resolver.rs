//! Event resolution against the current projection.

use crate::projection::Projection;
use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};

/// Current highlighted record, as a position in the current projection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "index", rename_all = "snake_case")]
pub enum SelectionState {
    #[default]
    Unselected,
    Selected(usize),
}

impl SelectionState {
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Unselected => None,
            Self::Selected(index) => Some(*index),
        }
    }
}

/// One interaction reported by the render layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum InteractionEvent {
    /// Marker click carrying the marker's label.
    Map { label: String },
    /// Polled cumulative click counters, one per projection index.
    #[serde(rename = "card")]
    CardPoll {
        #[serde(deserialize_with = "deserialize_counters")]
        counters: Vec<u64>,
    },
    /// Direct "this card was clicked" report.
    CardDirect { index: usize },
    None,
}

impl InteractionEvent {
    /// Lower value wins when several events share one update cycle.
    fn priority(&self) -> u8 {
        match self {
            Self::CardDirect { .. } => 0,
            Self::CardPoll { .. } => 1,
            Self::Map { .. } => 2,
            Self::None => 3,
        }
    }
}

/// Render layers report never-clicked cards as `null`.
fn deserialize_counters<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Option<u64>>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|value| value.unwrap_or(0)).collect())
}

/// Which interaction produced a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionSource {
    Map,
    CardPoll,
    CardDirect,
}

/// Why an event left the selection untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoOpReason {
    NoTrigger,
    LabelNotFound,
    AmbiguousLabel,
    NoCounterIncrease,
    IndexOutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ResolutionOutcome {
    Selected { source: SelectionSource, index: usize },
    Unchanged { reason: NoOpReason },
}

/// Result of resolving one event or one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub state: SelectionState,
    pub outcome: ResolutionOutcome,
}

/// Per-session resolver holding the last polled counter vector.
#[derive(Debug, Clone, Default)]
pub struct SelectionResolver {
    retained: Vec<u64>,
}

impl SelectionResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counter vector retained from the most recent card poll.
    pub fn retained_counters(&self) -> &[u64] {
        &self.retained
    }

    /// Forgets retained counters; called whenever the projection changes.
    pub fn reset(&mut self) {
        self.retained.clear();
    }

    /// Resolves one event against `projection`.
    ///
    /// Always returns a total result; on failure `state` equals `current`.
    pub fn resolve(
        &mut self,
        projection: &Projection,
        current: SelectionState,
        event: &InteractionEvent,
    ) -> Resolution {
        let outcome = match event {
            InteractionEvent::Map { label } => resolve_label(projection, label),
            InteractionEvent::CardPoll { counters } => {
                let outcome = resolve_counter_delta(projection, &self.retained, counters);
                self.retained = counters.clone();
                outcome
            }
            InteractionEvent::CardDirect { index } => {
                if *index < projection.len() {
                    ResolutionOutcome::Selected {
                        source: SelectionSource::CardDirect,
                        index: *index,
                    }
                } else {
                    ResolutionOutcome::Unchanged {
                        reason: NoOpReason::IndexOutOfRange,
                    }
                }
            }
            InteractionEvent::None => ResolutionOutcome::Unchanged {
                reason: NoOpReason::NoTrigger,
            },
        };

        let state = match outcome {
            ResolutionOutcome::Selected { index, .. } => SelectionState::Selected(index),
            ResolutionOutcome::Unchanged { reason } => {
                debug!(
                    "event=selection_resolve module=selection status=unchanged reason={:?}",
                    reason
                );
                current
            }
        };
        Resolution { state, outcome }
    }

    /// Resolves every event reported in one update cycle.
    ///
    /// The highest-priority event decides the selection
    /// (`CardDirect` > `CardPoll` > `Map` > `None`; first reported wins among
    /// equals). Every card poll still refreshes the retained counters, the
    /// last one reported being kept.
    pub fn resolve_cycle(
        &mut self,
        projection: &Projection,
        current: SelectionState,
        events: &[InteractionEvent],
    ) -> Resolution {
        let winner = events
            .iter()
            .enumerate()
            .min_by_key(|(position, event)| (event.priority(), *position))
            .map(|(position, _)| position);

        let Some(winner) = winner else {
            return self.resolve(projection, current, &InteractionEvent::None);
        };

        let resolution = self.resolve(projection, current, &events[winner]);

        let last_poll = events.iter().rev().find_map(|event| match event {
            InteractionEvent::CardPoll { counters } => Some(counters),
            _ => None,
        });
        if let Some(counters) = last_poll {
            self.retained = counters.clone();
        }
        if events.len() > 1 {
            debug!(
                "event=selection_cycle module=selection status=ok events={} winner_priority={}",
                events.len(),
                events[winner].priority()
            );
        }
        resolution
    }
}

fn resolve_label(projection: &Projection, label: &str) -> ResolutionOutcome {
    let positions = projection.positions_of_label(label);
    match positions.as_slice() {
        [index] => ResolutionOutcome::Selected {
            source: SelectionSource::Map,
            index: *index,
        },
        [] => ResolutionOutcome::Unchanged {
            reason: NoOpReason::LabelNotFound,
        },
        _ => {
            warn!(
                "event=selection_resolve module=selection status=ambiguous_label matches={}",
                positions.len()
            );
            ResolutionOutcome::Unchanged {
                reason: NoOpReason::AmbiguousLabel,
            }
        }
    }
}

/// Picks the index whose counter grew the most since the retained vector.
///
/// Missing retained entries count as zero; ties go to the lowest index.
fn resolve_counter_delta(
    projection: &Projection,
    retained: &[u64],
    incoming: &[u64],
) -> ResolutionOutcome {
    let mut best: Option<(usize, u64)> = None;
    for (index, value) in incoming.iter().enumerate().take(projection.len()) {
        let previous = retained.get(index).copied().unwrap_or(0);
        let delta = value.saturating_sub(previous);
        if delta == 0 {
            continue;
        }
        match best {
            Some((_, best_delta)) if best_delta >= delta => {}
            _ => best = Some((index, delta)),
        }
    }

    match best {
        Some((index, _)) => ResolutionOutcome::Selected {
            source: SelectionSource::CardPoll,
            index,
        },
        None => ResolutionOutcome::Unchanged {
            reason: NoOpReason::NoCounterIncrease,
        },
    }
}
