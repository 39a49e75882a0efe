//! Descriptor construction.

use crate::config::ViewConfig;
use crate::model::record::{Coordinate, DisplayFields};
use crate::projection::Projection;
use crate::selection::SelectionState;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardStyle {
    Normal,
    Highlighted,
}

/// One detail card. `index` is the projection position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub index: usize,
    pub label: String,
    pub fields: DisplayFields,
    pub style: CardStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerView {
    pub index: usize,
    pub label: String,
    pub lat: f64,
    pub lon: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub markers: Vec<MarkerView>,
    pub center: Coordinate,
    pub zoom: u8,
}

/// Complete output handed to the render layer for one interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub selection: SelectionState,
    pub cards: Vec<CardView>,
    pub map: MapView,
}

/// Builds card and map descriptors for the current selection.
///
/// A selection outside the projection renders as unselected.
pub fn synchronize(
    projection: &Projection,
    selection: SelectionState,
    config: &ViewConfig,
) -> ViewState {
    let selected = selection
        .index()
        .filter(|index| *index < projection.len());
    let selection = match selected {
        Some(index) => SelectionState::Selected(index),
        None => SelectionState::Unselected,
    };

    let mut cards = Vec::with_capacity(projection.len());
    let mut markers = Vec::with_capacity(projection.len());
    let mut selected_card = None;
    let mut selected_center = None;

    for (index, record) in projection.iter() {
        let is_selected = selected == Some(index);
        let card = CardView {
            index,
            label: record.label.clone(),
            fields: record.fields.clone(),
            style: if is_selected {
                CardStyle::Highlighted
            } else {
                CardStyle::Normal
            },
        };
        if is_selected {
            selected_card = Some(card);
        } else {
            cards.push(card);
        }

        // Projections only contain spatial records.
        if let Some(coordinate) = record.coordinate {
            if is_selected {
                selected_center = Some(coordinate);
            }
            markers.push(MarkerView {
                index,
                label: record.label.clone(),
                lat: coordinate.lat,
                lon: coordinate.lon,
                color: if is_selected {
                    config.highlight_color.clone()
                } else {
                    config.default_color.clone()
                },
            });
        }
    }

    if let Some(card) = selected_card {
        cards.insert(0, card);
    }

    let center = selected_center
        .or_else(|| centroid(&markers))
        .unwrap_or(config.fallback_center);

    ViewState {
        selection,
        cards,
        map: MapView {
            markers,
            center,
            zoom: config.zoom,
        },
    }
}

fn centroid(markers: &[MarkerView]) -> Option<Coordinate> {
    if markers.is_empty() {
        return None;
    }
    let count = markers.len() as f64;
    let (lat_sum, lon_sum) = markers
        .iter()
        .fold((0.0, 0.0), |(lat, lon), marker| (lat + marker.lat, lon + marker.lon));
    Some(Coordinate {
        lat: lat_sum / count,
        lon: lon_sum / count,
    })
}
