use proptest::prelude::*;

use llm_tester::grid::{
    ComparisonGrid, GridError, MAX_COLUMNS, MIN_COLUMNS, ModelChoice, PLACEHOLDER_RESPONSE,
    TemperatureChoice,
};

fn assert_weights_match(grid: &ComparisonGrid) {
    let weights = grid.layout_weights();
    for (slot, weight) in weights.iter().enumerate() {
        let expected = u16::from(slot < grid.count());
        assert_eq!(*weight, expected, "slot {slot} with {} columns", grid.count());
    }
}

#[test]
fn test_new_grid_has_one_default_column() {
    let grid = ComparisonGrid::new();
    assert_eq!(grid.count(), 1);
    assert_eq!(grid.prompt(), "");

    let column = grid.column(0).unwrap();
    assert_eq!(column.model_choice, ModelChoice::Gpt4);
    assert_eq!(column.temperature_choice, TemperatureChoice::Balanced);
    assert_eq!(column.response_text, PLACEHOLDER_RESPONSE);
    assert_weights_match(&grid);
}

#[test]
fn test_bounds_scenario() {
    let mut grid = ComparisonGrid::new();

    // Remove at the minimum is rejected
    let err = grid.remove_column().unwrap_err();
    assert_eq!(err, GridError::MinimumRequired { min: MIN_COLUMNS });
    assert_eq!(err.to_string(), "Minimum of 1 column required.");
    assert_eq!(grid.count(), 1);

    for expected in 1..MAX_COLUMNS {
        assert_eq!(grid.append_column().unwrap(), expected);
    }
    assert_eq!(grid.count(), MAX_COLUMNS);
    assert!(!grid.can_append());

    let before = grid.clone();
    let err = grid.append_column().unwrap_err();
    assert_eq!(err.to_string(), "Maximum of 10 columns allowed.");
    assert_eq!(grid, before);

    let removed = grid.remove_column().unwrap();
    assert_eq!(removed.index, MAX_COLUMNS - 1);
    assert_eq!(grid.count(), MAX_COLUMNS - 1);
}

#[test]
fn test_appends_then_removes_restore_initial_state() {
    for n in 0..MAX_COLUMNS {
        let initial = ComparisonGrid::new();
        let mut grid = initial.clone();
        for _ in 0..n {
            grid.append_column().unwrap();
        }
        for _ in 0..n {
            grid.remove_column().unwrap();
        }
        assert_eq!(grid, initial, "after {n} appends and removes");
    }
}

#[test]
fn test_removed_column_state_is_discarded() {
    let mut grid = ComparisonGrid::new();
    grid.append_column().unwrap();
    grid.set_model_choice(1, ModelChoice::Claude2).unwrap();
    grid.set_temperature_choice(1, TemperatureChoice::High).unwrap();
    grid.remove_column().unwrap();

    // Re-appending starts from defaults again
    grid.append_column().unwrap();
    let column = grid.column(1).unwrap();
    assert_eq!(column.model_choice, ModelChoice::Gpt4);
    assert_eq!(column.temperature_choice, TemperatureChoice::Balanced);
}

#[test]
fn test_setters_reject_missing_columns() {
    let mut grid = ComparisonGrid::new();
    let err = grid.set_model_choice(3, ModelChoice::Other).unwrap_err();
    assert_eq!(err, GridError::NoSuchColumn { index: 3, count: 1 });
    assert!(grid.set_response_text(1, "nope").is_err());
}

proptest! {
    #[test]
    fn test_random_sequences_respect_bounds(ops in prop::collection::vec(any::<bool>(), 0..2000)) {
        let mut grid = ComparisonGrid::new();
        for append in ops {
            let before = grid.clone();
            let result = if append {
                grid.append_column().map(|_| ())
            } else {
                grid.remove_column().map(|_| ())
            };

            prop_assert!((MIN_COLUMNS..=MAX_COLUMNS).contains(&grid.count()));
            if result.is_err() {
                prop_assert_eq!(&grid, &before);
            }
            for (i, column) in grid.columns().iter().enumerate() {
                prop_assert_eq!(column.index, i);
            }
            assert_weights_match(&grid);
        }
    }
}

#[test]
fn test_snapshot_preserves_order_and_values() {
    let mut grid = ComparisonGrid::new();
    grid.set_prompt("Hello");
    grid.append_column().unwrap();
    grid.set_model_choice(1, ModelChoice::Claude3).unwrap();
    grid.set_temperature_choice(1, TemperatureChoice::Zero).unwrap();

    let snapshot = grid.export_snapshot();
    assert_eq!(snapshot.prompt, "Hello");
    assert_eq!(snapshot.columns.len(), 2);
    assert_eq!(snapshot.columns[0].model_choice, ModelChoice::Gpt4);
    assert_eq!(snapshot.columns[1].model_choice, ModelChoice::Claude3);
    assert_eq!(snapshot.columns[1].temperature_choice.label(), "0.0");
}

#[test]
fn test_choice_labels_parse_back() {
    for choice in ModelChoice::ALL {
        assert_eq!(choice.label().parse::<ModelChoice>().unwrap(), choice);
    }
    for choice in TemperatureChoice::ALL {
        assert_eq!(choice.label().parse::<TemperatureChoice>().unwrap(), choice);
    }
    assert!("GPT-5".parse::<ModelChoice>().is_err());
}
