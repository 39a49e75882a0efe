use incident_core::model::record::snapshot;
use incident_core::{
    build_projection, Coordinate, InteractionEvent, NoOpReason, Projection, ProjectionSpec,
    Record, ResolutionOutcome, SelectionResolver, SelectionSource, SelectionState,
};

fn irish_projection() -> Projection {
    let records = snapshot(vec![
        Record::new("Dublin").with_coordinate(Coordinate::new(53.35, -6.26).expect("valid")),
        Record::new("Cork City").with_coordinate(Coordinate::new(51.90, -8.49).expect("valid")),
        Record::new("Galway").with_coordinate(Coordinate::new(53.27, -9.05).expect("valid")),
    ]);
    build_projection(&records, &ProjectionSpec::default())
}

fn poll(counters: &[u64]) -> InteractionEvent {
    InteractionEvent::CardPoll {
        counters: counters.to_vec(),
    }
}

fn map(label: &str) -> InteractionEvent {
    InteractionEvent::Map {
        label: label.to_string(),
    }
}

#[test]
fn map_click_resolves_label_position() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();

    let resolution = resolver.resolve(&projection, SelectionState::Unselected, &map("Cork City"));
    assert_eq!(resolution.state, SelectionState::Selected(1));
    assert_eq!(
        resolution.outcome,
        ResolutionOutcome::Selected {
            source: SelectionSource::Map,
            index: 1
        }
    );
}

#[test]
fn unknown_marker_label_is_a_no_op() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();

    let resolution = resolver.resolve(&projection, SelectionState::Selected(2), &map("Limerick"));
    assert_eq!(resolution.state, SelectionState::Selected(2));
    assert_eq!(
        resolution.outcome,
        ResolutionOutcome::Unchanged {
            reason: NoOpReason::LabelNotFound
        }
    );
}

#[test]
fn duplicate_marker_label_is_ambiguous() {
    let records = snapshot(vec![
        Record::new("Station").with_coordinate(Coordinate::new(53.0, -6.0).expect("valid")),
        Record::new("Station").with_coordinate(Coordinate::new(52.0, -7.0).expect("valid")),
    ]);
    let projection = build_projection(&records, &ProjectionSpec::default());
    let mut resolver = SelectionResolver::new();

    let resolution = resolver.resolve(&projection, SelectionState::Unselected, &map("Station"));
    assert_eq!(resolution.state, SelectionState::Unselected);
    assert_eq!(
        resolution.outcome,
        ResolutionOutcome::Unchanged {
            reason: NoOpReason::AmbiguousLabel
        }
    );
}

#[test]
fn counter_delta_beats_raw_argmax() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();

    resolver.resolve(&projection, SelectionState::Unselected, &poll(&[5, 0, 0]));
    assert_eq!(resolver.retained_counters(), &[5, 0, 0]);

    let resolution = resolver.resolve(&projection, SelectionState::Selected(0), &poll(&[5, 0, 1]));
    assert_eq!(resolution.state, SelectionState::Selected(2));
    assert_eq!(resolver.retained_counters(), &[5, 0, 1]);
}

#[test]
fn first_poll_compares_against_zero() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();

    let resolution = resolver.resolve(&projection, SelectionState::Unselected, &poll(&[0, 1, 0]));
    assert_eq!(resolution.state, SelectionState::Selected(1));
}

#[test]
fn multiple_increases_pick_largest_delta_then_lowest_index() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();
    resolver.resolve(&projection, SelectionState::Unselected, &poll(&[1, 1, 1]));

    let resolution = resolver.resolve(&projection, SelectionState::Unselected, &poll(&[2, 4, 2]));
    assert_eq!(resolution.state, SelectionState::Selected(1));

    let tie = resolver.resolve(&projection, SelectionState::Unselected, &poll(&[3, 4, 3]));
    assert_eq!(tie.state, SelectionState::Selected(0));
}

#[test]
fn unchanged_poll_keeps_selection_and_retains_vector() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();
    resolver.resolve(&projection, SelectionState::Unselected, &poll(&[0, 2, 0]));

    let resolution = resolver.resolve(&projection, SelectionState::Selected(1), &poll(&[0, 2, 0]));
    assert_eq!(resolution.state, SelectionState::Selected(1));
    assert_eq!(
        resolution.outcome,
        ResolutionOutcome::Unchanged {
            reason: NoOpReason::NoCounterIncrease
        }
    );
    assert_eq!(resolver.retained_counters(), &[0, 2, 0]);
}

#[test]
fn decreasing_counters_do_not_select() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();
    resolver.resolve(&projection, SelectionState::Unselected, &poll(&[4, 4, 4]));

    let resolution = resolver.resolve(&projection, SelectionState::Unselected, &poll(&[0, 0, 0]));
    assert_eq!(resolution.state, SelectionState::Unselected);
}

#[test]
fn counters_beyond_projection_are_ignored() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();

    let resolution =
        resolver.resolve(&projection, SelectionState::Unselected, &poll(&[0, 0, 0, 9]));
    assert_eq!(resolution.state, SelectionState::Unselected);
}

#[test]
fn direct_card_event_selects_in_range_index_only() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();

    let hit = resolver.resolve(
        &projection,
        SelectionState::Unselected,
        &InteractionEvent::CardDirect { index: 2 },
    );
    assert_eq!(hit.state, SelectionState::Selected(2));

    let miss = resolver.resolve(&projection, hit.state, &InteractionEvent::CardDirect { index: 3 });
    assert_eq!(miss.state, SelectionState::Selected(2));
    assert_eq!(
        miss.outcome,
        ResolutionOutcome::Unchanged {
            reason: NoOpReason::IndexOutOfRange
        }
    );
}

#[test]
fn none_trigger_keeps_selection() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();

    let resolution =
        resolver.resolve(&projection, SelectionState::Selected(0), &InteractionEvent::None);
    assert_eq!(resolution.state, SelectionState::Selected(0));
}

#[test]
fn cycle_prefers_card_over_map_regardless_of_order() {
    let projection = irish_projection();

    let mut resolver = SelectionResolver::new();
    let resolution = resolver.resolve_cycle(
        &projection,
        SelectionState::Unselected,
        &[map("Galway"), poll(&[1, 0, 0])],
    );
    assert_eq!(resolution.state, SelectionState::Selected(0));

    let mut resolver = SelectionResolver::new();
    let resolution = resolver.resolve_cycle(
        &projection,
        SelectionState::Unselected,
        &[poll(&[1, 0, 0]), map("Galway")],
    );
    assert_eq!(resolution.state, SelectionState::Selected(0));
}

#[test]
fn cycle_retains_losing_poll_counters() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();

    let resolution = resolver.resolve_cycle(
        &projection,
        SelectionState::Unselected,
        &[poll(&[0, 1, 0]), InteractionEvent::CardDirect { index: 2 }],
    );
    assert_eq!(resolution.state, SelectionState::Selected(2));
    assert_eq!(resolver.retained_counters(), &[0, 1, 0]);
}

#[test]
fn empty_cycle_is_a_no_op() {
    let projection = irish_projection();
    let mut resolver = SelectionResolver::new();

    let resolution = resolver.resolve_cycle(&projection, SelectionState::Selected(1), &[]);
    assert_eq!(resolution.state, SelectionState::Selected(1));
}
