//! Dashboard session service.
//!
//! # Responsibility
//! - Own one user's projection spec, selection and resolver state.
//! - Return a fresh `ViewState` from every operation.
//!
//! # Invariants
//! - Changing the spec or the record set resets selection and counters.
//! - Sessions share nothing mutable; records are an immutable snapshot.

use crate::config::EngineConfig;
use crate::model::record::{snapshot, Record, RecordSnapshot};
use crate::projection::{build_projection, Projection, ProjectionSpec};
use crate::selection::{InteractionEvent, Resolution, SelectionResolver, SelectionState};
use crate::view::{synchronize, ViewState};
use log::{debug, info};

/// One isolated engine instance.
pub struct DashboardSession {
    config: EngineConfig,
    spec: ProjectionSpec,
    projection: Projection,
    selection: SelectionState,
    resolver: SelectionResolver,
}

impl DashboardSession {
    /// Creates a session over `records` with an empty projection spec.
    pub fn new(records: Vec<Record>, config: EngineConfig) -> Self {
        Self::with_snapshot(snapshot(records), config)
    }

    /// Creates a session sharing an existing snapshot.
    pub fn with_snapshot(records: RecordSnapshot, config: EngineConfig) -> Self {
        let spec = ProjectionSpec::default();
        let projection = build_projection(&records, &spec);
        info!(
            "event=session_open module=service status=ok records={} projected={}",
            records.len(),
            projection.len()
        );
        Self {
            config,
            spec,
            projection,
            selection: SelectionState::Unselected,
            resolver: SelectionResolver::new(),
        }
    }

    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn spec(&self) -> &ProjectionSpec {
        &self.spec
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Counters retained from the last card poll.
    pub fn retained_counters(&self) -> &[u64] {
        self.resolver.retained_counters()
    }

    /// Current view descriptors.
    pub fn view(&self) -> ViewState {
        synchronize(&self.projection, self.selection, &self.config.view)
    }

    /// Resolves one interaction and returns the resulting view.
    pub fn handle_event(&mut self, event: &InteractionEvent) -> ViewState {
        let resolution = self
            .resolver
            .resolve(&self.projection, self.selection, event);
        self.apply_resolution(resolution)
    }

    /// Resolves all interactions reported in one update cycle.
    pub fn handle_cycle(&mut self, events: &[InteractionEvent]) -> ViewState {
        let resolution = self
            .resolver
            .resolve_cycle(&self.projection, self.selection, events);
        self.apply_resolution(resolution)
    }

    /// Replaces filter and sort criteria.
    ///
    /// An identical spec keeps the current selection.
    pub fn apply_spec(&mut self, spec: ProjectionSpec) -> ViewState {
        if spec == self.spec {
            return self.view();
        }
        self.spec = spec;
        let records = self.projection.snapshot().clone();
        self.rebuild(records);
        self.view()
    }

    /// Installs a new record set under the current spec.
    pub fn replace_records(&mut self, records: Vec<Record>) -> ViewState {
        self.rebuild(snapshot(records));
        self.view()
    }

    fn rebuild(&mut self, records: RecordSnapshot) {
        self.projection = build_projection(&records, &self.spec);
        self.selection = SelectionState::Unselected;
        self.resolver.reset();
        info!(
            "event=projection_reset module=service status=ok projected={} filter_years={} sort={:?}",
            self.projection.len(),
            self.spec.filter.years.len(),
            self.spec.sort
        );
    }

    fn apply_resolution(&mut self, resolution: Resolution) -> ViewState {
        if resolution.state != self.selection {
            debug!(
                "event=selection_change module=service status=ok from={:?} to={:?}",
                self.selection, resolution.state
            );
        }
        self.selection = resolution.state;
        self.view()
    }
}
