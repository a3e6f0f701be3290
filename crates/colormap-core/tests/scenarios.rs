use colormap_core::{
    ColorRef, ColormapConfig, ColormapError, Interval, IntervalSet, LoadPolicy,
};

fn ranges(set: &IntervalSet) -> Vec<(String, f64, f64)> {
    set.intervals()
        .iter()
        .map(|i| (i.color.to_string(), i.lower, i.upper))
        .collect()
}

fn expect(items: &[(&str, f64, f64)]) -> Vec<(String, f64, f64)> {
    items
        .iter()
        .map(|(color, lower, upper)| (color.to_string(), *lower, *upper))
        .collect()
}

fn scenario_two() -> IntervalSet {
    let mut set = IntervalSet::new();
    set.add(Interval::new("red", 20.0, 40.0)).unwrap();
    set.add(Interval::new("blue", 30.0, 50.0)).unwrap();
    set
}

#[test]
fn test_scenario_split_sentinel() {
    let mut set = IntervalSet::new();
    set.add(Interval::new("red", 20.0, 40.0)).unwrap();
    assert_eq!(
        ranges(&set),
        expect(&[("white", 0.0, 20.0), ("red", 20.0, 40.0), ("white", 40.0, 100.0)])
    );
}

#[test]
fn test_scenario_partial_overlap() {
    assert_eq!(
        ranges(&scenario_two()),
        expect(&[
            ("white", 0.0, 20.0),
            ("red", 20.0, 30.0),
            ("blue", 30.0, 50.0),
            ("white", 50.0, 100.0),
        ])
    );
}

#[test]
fn test_scenario_full_replacement() {
    let mut set = scenario_two();
    set.add(Interval::new("green", 0.0, 100.0)).unwrap();
    assert_eq!(ranges(&set), expect(&[("green", 0.0, 100.0)]));
}

#[test]
fn test_scenario_zero_width_rejected() {
    let mut set = scenario_two();
    let before = set.clone();
    let result = set.add(Interval::new("yellow", 10.0, 10.0));
    assert!(matches!(result, Err(ColormapError::InvalidRange { .. })));
    assert_eq!(set, before);
}

#[test]
fn test_scenario_malformed_load() {
    let mut set = scenario_two();
    let before = set.clone();
    let error = set.load_json("{not json").unwrap_err();

    assert!(matches!(error, ColormapError::MalformedPersistedData(_)));
    assert!(!error.to_string().is_empty());
    assert_eq!(set, before);
}

/// Inserts covering every boundary relation against a few starting layouts.
fn insert_cases() -> Vec<(f64, f64)> {
    let points = [0.0, 5.0, 20.0, 25.0, 30.0, 40.0, 45.0, 50.0, 75.0, 99.5, 100.0];
    let mut cases = Vec::new();
    for (i, &lower) in points.iter().enumerate() {
        for &upper in &points[i + 1..] {
            cases.push((lower, upper));
        }
    }
    cases
}

fn starting_sets() -> Vec<IntervalSet> {
    let mut touching = IntervalSet::new();
    touching.add(Interval::new("red", 20.0, 40.0)).unwrap();
    touching.add(Interval::new("white", 40.0, 50.0)).unwrap();
    touching.add(Interval::new("cyan", 50.0, 75.0)).unwrap();

    vec![IntervalSet::new(), scenario_two(), touching]
}

#[test]
fn test_disjoint_and_covering_after_every_insert() {
    for start in starting_sets() {
        for (lower, upper) in insert_cases() {
            let mut set = start.clone();
            set.add(Interval::new("magenta", lower, upper)).unwrap();
            assert!(
                set.check_invariants().is_ok(),
                "inserting [{}, {}) broke {:?}: {:?}",
                lower,
                upper,
                ranges(&start),
                set.check_invariants()
            );
        }
    }
}

#[test]
fn test_new_interval_wins_its_range() {
    for start in starting_sets() {
        for (lower, upper) in insert_cases() {
            let mut set = start.clone();
            set.add(Interval::new("magenta", lower, upper)).unwrap();

            let steps = 20;
            for step in 0..steps {
                let value = lower + (upper - lower) * step as f64 / steps as f64;
                assert_eq!(
                    set.color_at(value),
                    Some(&ColorRef::new("magenta")),
                    "value {} in [{}, {})",
                    value,
                    lower,
                    upper
                );
            }
        }
    }
}

#[test]
fn test_outside_points_keep_their_color() {
    let start = scenario_two();
    let mut set = start.clone();
    set.add(Interval::new("magenta", 25.0, 45.0)).unwrap();

    for value in [0.0, 10.0, 20.0, 24.9, 45.0, 49.0, 60.0, 100.0] {
        assert_eq!(set.color_at(value), start.color_at(value), "value {}", value);
    }
}

#[test]
fn test_normalize_idempotent() {
    for start in starting_sets() {
        let mut once = start.clone();
        once.normalize();
        let mut twice = once.clone();
        twice.normalize();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_json_round_trip() {
    for start in starting_sets() {
        let json = start.to_json().unwrap();
        let mut loaded = IntervalSet::new();
        loaded.load_json(&json).unwrap();
        assert_eq!(loaded.intervals(), start.intervals());
    }
}

#[test]
fn test_background_survives_round_trip() {
    let mut start = scenario_two();
    start.add(Interval::new("white", 60.0, 70.0)).unwrap();
    let json = start.to_json().unwrap();

    let mut loaded = IntervalSet::new();
    loaded.load_json(&json).unwrap();
    loaded.set_background_color("black");

    assert_eq!(loaded.color_at(10.0), Some(&ColorRef::new("black")));
    assert_eq!(loaded.color_at(65.0), Some(&ColorRef::new("white")));
    assert_eq!(loaded.color_at(80.0), Some(&ColorRef::new("black")));
}

#[test]
fn test_repair_policy_from_config() {
    let config = ColormapConfig {
        load_policy: LoadPolicy::Repair,
        ..ColormapConfig::default()
    };
    let mut set = IntervalSet::with_config(&config);
    set.load_json(
        r#"[
            {"color": "red", "min": 0, "max": 60},
            {"color": "blue", "min": 40, "max": 100},
            {"color": "green", "min": 10, "max": 20}
        ]"#,
    )
    .unwrap();

    assert_eq!(
        ranges(&set),
        expect(&[
            ("red", 0.0, 10.0),
            ("green", 10.0, 20.0),
            ("red", 20.0, 40.0),
            ("blue", 40.0, 100.0),
        ])
    );
}
