//! Projection construction.

use crate::model::record::{Record, RecordSnapshot};
use log::debug;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;

/// Year filter. An empty set disables filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub years: BTreeSet<i32>,
}

impl FilterSpec {
    pub fn years(years: impl IntoIterator<Item = i32>) -> Self {
        Self {
            years: years.into_iter().collect(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.years.is_empty()
    }

    fn accepts(&self, record: &Record) -> bool {
        if !self.is_active() {
            return true;
        }
        record.year.is_some_and(|year| self.years.contains(&year))
    }
}

/// Sortable record field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    None,
    Magnitude,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    #[serde(default)]
    pub field: SortField,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn magnitude(direction: SortDirection) -> Self {
        Self {
            field: SortField::Magnitude,
            direction,
        }
    }
}

/// Full user-chosen projection criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionSpec {
    #[serde(default)]
    pub filter: FilterSpec,
    #[serde(default)]
    pub sort: SortSpec,
}

/// Display-ordered view over one record snapshot.
#[derive(Debug, Clone)]
pub struct Projection {
    snapshot: RecordSnapshot,
    order: Vec<usize>,
}

impl Projection {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the record at projection position `index`.
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.order
            .get(index)
            .and_then(|source| self.snapshot.get(*source))
    }

    /// Returns the snapshot position backing projection position `index`.
    pub fn source_index(&self, index: usize) -> Option<usize> {
        self.order.get(index).copied()
    }

    /// Iterates `(index, record)` in display order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &Record)> + '_ {
        self.order
            .iter()
            .enumerate()
            .filter_map(|(index, source)| self.snapshot.get(*source).map(|record| (index, record)))
    }

    /// Positions of every entry whose label equals `label`.
    pub fn positions_of_label(&self, label: &str) -> Vec<usize> {
        self.iter()
            .filter(|(_, record)| record.label == label)
            .map(|(index, _)| index)
            .collect()
    }

    pub fn snapshot(&self) -> &RecordSnapshot {
        &self.snapshot
    }
}

/// Two projections are equal when they show the same snapshot in the same order.
impl PartialEq for Projection {
    fn eq(&self, other: &Self) -> bool {
        std::sync::Arc::ptr_eq(&self.snapshot, &other.snapshot) && self.order == other.order
    }
}

/// Builds the display projection for `spec`.
///
/// Steps: drop records without a coordinate, apply the year filter, then
/// (when a sort field is set) drop records lacking it and stable-sort.
pub fn build_projection(snapshot: &RecordSnapshot, spec: &ProjectionSpec) -> Projection {
    let mut missing_coordinate = 0usize;
    let mut filtered_out = 0usize;
    let mut missing_sort_field = 0usize;

    let mut order = Vec::with_capacity(snapshot.len());
    for (source, record) in snapshot.iter().enumerate() {
        if !record.is_spatial() {
            missing_coordinate += 1;
            continue;
        }
        if !spec.filter.accepts(record) {
            filtered_out += 1;
            continue;
        }
        if spec.sort.field == SortField::Magnitude && record.magnitude.is_none() {
            missing_sort_field += 1;
            continue;
        }
        order.push(source);
    }

    if spec.sort.field == SortField::Magnitude {
        // `sort_by` is stable, so reversing only the comparison keeps ties in
        // snapshot order for descending sorts too.
        order.sort_by(|left, right| {
            let ordering = compare_magnitude(&snapshot[*left], &snapshot[*right]);
            match spec.sort.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    debug!(
        "event=projection_build module=projection status=ok total={} kept={} missing_coordinate={} filtered_out={} missing_sort_field={}",
        snapshot.len(),
        order.len(),
        missing_coordinate,
        filtered_out,
        missing_sort_field
    );

    Projection {
        snapshot: snapshot.clone(),
        order,
    }
}

fn compare_magnitude(left: &Record, right: &Record) -> Ordering {
    match (left.magnitude, right.magnitude) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        _ => Ordering::Equal,
    }
}

/// Sorted distinct years among records that can appear on the map.
pub fn available_years(records: &[Record]) -> Vec<i32> {
    records
        .iter()
        .filter(|record| record.is_spatial())
        .filter_map(|record| record.year)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
