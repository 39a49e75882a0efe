use incident_core::{
    CardStyle, Coordinate, DashboardSession, EngineConfig, FilterSpec, InteractionEvent,
    ProjectionSpec, Record, SelectionState, SortDirection, SortSpec,
};

fn two_incidents() -> Vec<Record> {
    vec![
        Record::new("A")
            .with_coordinate(Coordinate::new(53.35, -6.26).expect("valid"))
            .with_magnitude(18.0)
            .with_year(2023),
        Record::new("B")
            .with_coordinate(Coordinate::new(51.90, -8.49).expect("valid"))
            .with_magnitude(45.0)
            .with_year(2024),
    ]
}

fn power_desc() -> ProjectionSpec {
    ProjectionSpec {
        sort: SortSpec::magnitude(SortDirection::Desc),
        ..ProjectionSpec::default()
    }
}

#[test]
fn end_to_end_sort_then_card_click() {
    let mut session = DashboardSession::new(two_incidents(), EngineConfig::default());
    let sorted = session.apply_spec(power_desc());
    let labels = sorted
        .cards
        .iter()
        .map(|card| card.label.as_str())
        .collect::<Vec<_>>();
    assert_eq!(labels, vec!["B", "A"]);

    let view = session.handle_event(&InteractionEvent::CardPoll {
        counters: vec![1, 0],
    });

    let cards = view
        .cards
        .iter()
        .map(|card| (card.index, card.style))
        .collect::<Vec<_>>();
    assert_eq!(
        cards,
        vec![(0, CardStyle::Highlighted), (1, CardStyle::Normal)]
    );
    assert_eq!(view.map.center, Coordinate { lat: 51.90, lon: -8.49 });
    let colors = view
        .map
        .markers
        .iter()
        .map(|marker| marker.color.as_str())
        .collect::<Vec<_>>();
    assert_eq!(colors, vec!["red", "blue"]);
}

#[test]
fn reselecting_same_index_is_idempotent() {
    let mut session = DashboardSession::new(two_incidents(), EngineConfig::default());

    let once = session.handle_event(&InteractionEvent::CardDirect { index: 1 });
    let twice = session.handle_event(&InteractionEvent::CardDirect { index: 1 });
    assert_eq!(once, twice);
    assert_eq!(twice, session.view());
}

#[test]
fn spec_change_clears_selection_and_counters() {
    let mut session = DashboardSession::new(two_incidents(), EngineConfig::default());
    session.handle_event(&InteractionEvent::CardPoll {
        counters: vec![0, 3],
    });
    assert_eq!(session.selection(), SelectionState::Selected(1));

    let view = session.apply_spec(ProjectionSpec {
        filter: FilterSpec::years([2023, 2024]),
        ..ProjectionSpec::default()
    });
    assert_eq!(session.selection(), SelectionState::Unselected);
    assert_eq!(view.selection, SelectionState::Unselected);
    assert!(session.retained_counters().is_empty());
}

#[test]
fn identical_spec_keeps_selection() {
    let mut session = DashboardSession::new(two_incidents(), EngineConfig::default());
    session.apply_spec(power_desc());
    session.handle_event(&InteractionEvent::Map {
        label: "A".to_string(),
    });
    assert_eq!(session.selection(), SelectionState::Selected(1));

    session.apply_spec(power_desc());
    assert_eq!(session.selection(), SelectionState::Selected(1));
}

#[test]
fn counters_from_previous_projection_do_not_leak() {
    let mut session = DashboardSession::new(two_incidents(), EngineConfig::default());
    session.handle_event(&InteractionEvent::CardPoll {
        counters: vec![4, 0],
    });
    session.apply_spec(power_desc());

    // The render layer rebuilt its cards, so counters restart from zero.
    let view = session.handle_event(&InteractionEvent::CardPoll {
        counters: vec![1, 0],
    });
    assert_eq!(view.selection, SelectionState::Selected(0));
    assert_eq!(view.cards[0].label, "B");
}

#[test]
fn replacing_records_resets_selection() {
    let mut session = DashboardSession::new(two_incidents(), EngineConfig::default());
    session.handle_event(&InteractionEvent::CardDirect { index: 0 });

    let view = session.replace_records(vec![Record::new("C")
        .with_coordinate(Coordinate::new(53.27, -9.05).expect("valid"))]);
    assert_eq!(view.selection, SelectionState::Unselected);
    assert_eq!(view.cards.len(), 1);
    assert_eq!(view.map.center, Coordinate { lat: 53.27, lon: -9.05 });
}

#[test]
fn empty_filter_result_is_safe_for_every_event() {
    let mut session = DashboardSession::new(two_incidents(), EngineConfig::default());
    let view = session.apply_spec(ProjectionSpec {
        filter: FilterSpec::years([1990]),
        ..ProjectionSpec::default()
    });
    assert!(view.cards.is_empty());
    assert_eq!(view.map.center, EngineConfig::default().view.fallback_center);

    for event in [
        InteractionEvent::Map {
            label: "A".to_string(),
        },
        InteractionEvent::CardPoll { counters: vec![1] },
        InteractionEvent::CardDirect { index: 0 },
        InteractionEvent::None,
    ] {
        let view = session.handle_event(&event);
        assert_eq!(view.selection, SelectionState::Unselected);
        assert!(view.map.markers.is_empty());
    }
}

#[test]
fn sessions_are_isolated() {
    let mut first = DashboardSession::new(two_incidents(), EngineConfig::default());
    let second = DashboardSession::new(two_incidents(), EngineConfig::default());

    first.handle_event(&InteractionEvent::CardDirect { index: 1 });
    assert_eq!(first.selection(), SelectionState::Selected(1));
    assert_eq!(second.selection(), SelectionState::Unselected);
}

#[test]
fn cycle_with_card_and_map_prefers_card() {
    let mut session = DashboardSession::new(two_incidents(), EngineConfig::default());
    let view = session.handle_cycle(&[
        InteractionEvent::Map {
            label: "B".to_string(),
        },
        InteractionEvent::CardDirect { index: 0 },
    ]);
    assert_eq!(view.selection, SelectionState::Selected(0));
    assert_eq!(view.cards[0].label, "A");
}
