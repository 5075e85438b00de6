//! Snapshot tests for the diagnostic data dump.
//!
//! Uses insta to capture the exact console layout. The layout is read by
//! people and copied into bug reports, so any change should be deliberate.

use llm_tester::grid::{ComparisonGrid, ModelChoice, TemperatureChoice};

#[test]
fn test_two_column_dump() {
    let mut grid = ComparisonGrid::new();
    grid.set_prompt("Describe an elephant.");
    grid.set_response_text(0, "It is like a wall.").unwrap();

    grid.append_column().unwrap();
    grid.set_model_choice(1, ModelChoice::Claude3).unwrap();
    grid.set_temperature_choice(1, TemperatureChoice::Zero).unwrap();
    grid.set_response_text(1, "It is like a snake.\nOr a rope.").unwrap();

    let dump = grid.export_snapshot().to_string();
    insta::assert_snapshot!("two_column_dump", dump.trim_matches('\n'));
}
