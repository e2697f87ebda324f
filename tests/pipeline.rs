use chrono::Utc;

use racing_laptimes_analytics::modules::board::Snapshot;
use racing_laptimes_analytics::modules::helpers::filter::{DriverSelector, FilterSelection, TrackSelector, ValiditySelector};
use racing_laptimes_analytics::modules::helpers::sort::{SortField, SortState};
use racing_laptimes_analytics::modules::helpers::view::{fastest_lap_rows, FastestLapGrouping};
use racing_laptimes_analytics::modules::laptimes_api::parse_laps;
use racing_laptimes_analytics::modules::models::lap::Status;

const PAYLOAD: &str = r#"[
    {"driver": "Anna", "car_id": "ks_mazda_mx5_cup", "track_id": "spa", "lap_time_ms": 152300, "valid": true,
     "cuts": 0, "lap_count": 1, "date": "2024-05-01T18:00:00Z", "s0": 50100, "s1": 52000, "s2": 50200},
    {"driver": "Anna", "car_id": "ks_mazda_mx5_cup", "track_id": "spa", "lap_time_ms": 151000, "valid": true,
     "cuts": 0, "lap_count": 2, "date": "2024-05-01T18:02:32Z", "s0": 50000, "s1": 51000, "s2": 50000},
    {"driver": "Bert", "car": "ks_mazda_mx5_cup", "track": "spa", "lap_time_ms": 149000, "valid": false,
     "cuts": 3, "lap_count": 1, "date": "2024-05-01T18:01:00Z", "s0": 49000, "s1": 86400000, "s2": 51000},
    {"driver": "Bert", "car": "ks_mazda_mx5_cup", "track": "spa", "lap_time_ms": 151500, "valid": true,
     "cuts": 0, "lap_count": 2, "date": "2024-05-01T18:03:29Z", "s0": 49900, "s1": 51100, "s2": 86400000},
    {"driver": "Carl", "car": "bmw_m3_e30", "track": "monza", "lap_time_ms": null, "valid": false,
     "cuts": 1, "date": "2024-05-02T09:00:00Z"},
    {"driver": "Carl", "car": "bmw_m3_e30", "track": "monza", "lap_time_ms": 112000, "valid": true,
     "cuts": 0, "date": "2024-05-02T09:02:00Z", "s0": 37000, "s1": 38000, "s2": 37000}
]"#;

fn snapshot() -> Snapshot {
    Snapshot::build(parse_laps(PAYLOAD).unwrap(), Utc::now())
}

#[test]
fn classifies_records_and_personal_bests() {
    let snapshot = snapshot();
    let laps = &snapshot.laps;

    // Anna's second lap is the fastest valid lap at spa
    assert_eq!(laps[1].lap_status, Status::Record);
    assert_eq!(laps[0].lap_status, Status::None);
    // Bert's invalid lap is faster but does not count
    assert_eq!(laps[2].lap_status, Status::None);
    assert_eq!(laps[3].lap_status, Status::PersonalBest);

    // sectors look at invalid laps too
    assert_eq!(laps[2].sectors, vec![Some(49000), None, Some(51000)]);
    assert_eq!(laps[2].sector_status, vec![Status::Record, Status::None, Status::PersonalBest]);
    assert_eq!(laps[3].sectors, vec![Some(49900), Some(51100)]);
    assert_eq!(laps[3].sector_status, vec![Status::None, Status::PersonalBest]);
    assert_eq!(laps[1].sector_status, vec![Status::PersonalBest, Status::Record, Status::Record]);

    assert!(laps[4].sectors.is_empty());
    assert_eq!(laps[5].lap_status, Status::Record);
    assert_eq!(laps[5].track_name, "Monza");
}

#[test]
fn cascading_filters_reset_the_driver() {
    let snapshot = snapshot();
    let selection = FilterSelection {
        track: TrackSelector::Track("monza".to_string()),
        validity: ValiditySelector::Valid,
        driver: DriverSelector::Driver("Anna".to_string()),
    };

    let table = snapshot.table(&selection, &SortState::default()).unwrap();
    assert_eq!(table.driver_options, vec!["Carl"]);
    assert_eq!(table.selection.driver, DriverSelector::All);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0].driver, "Carl");
}

#[test]
fn sorting_toggles_on_the_same_column() {
    let snapshot = snapshot();
    let selection = FilterSelection {
        track: TrackSelector::Track("spa".to_string()),
        ..FilterSelection::default()
    };
    let by_date = SortState::default().select(SortField::Date);

    let ascending = snapshot.table(&selection, &by_date).unwrap();
    let descending = snapshot.table(&selection, &by_date.select(SortField::Date)).unwrap();

    let dates: Vec<&str> = ascending.rows.iter().map(|row| row.date.as_str()).collect();
    let mut reversed: Vec<&str> = descending.rows.iter().map(|row| row.date.as_str()).collect();
    reversed.reverse();
    assert_eq!(dates, reversed);
    assert_eq!(dates[0], "2024-05-01T18:00:00Z");
}

#[test]
fn fastest_laps_skip_invalid_laps() {
    let snapshot = snapshot();

    let rows = fastest_lap_rows(&snapshot.laps, FastestLapGrouping::Driver);
    let summary: Vec<(&str, &str)> = rows.iter().map(|row| (row.driver.as_str(), row.lap_time.as_str())).collect();
    assert_eq!(summary, vec![("Carl", "1:52.000"), ("Anna", "2:31.000"), ("Bert", "2:31.500")]);
}

#[test]
fn filtering_twice_gives_the_same_table() {
    let snapshot = snapshot();
    let selection = FilterSelection {
        validity: ValiditySelector::Invalid,
        driver: DriverSelector::Driver("Bert".to_string()),
        ..FilterSelection::default()
    };
    let sort = SortState::default().select(SortField::Cuts);

    assert_eq!(snapshot.table(&selection, &sort).unwrap(), snapshot.table(&selection, &sort).unwrap());
}
