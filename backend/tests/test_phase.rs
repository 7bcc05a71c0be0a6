//! Tests for business-phase resolution

use business_day_sim_core_rs::phase::default_phases;
use business_day_sim_core_rs::{PhaseLocation, PhaseTable};

#[test]
fn test_pre_opening_upper_bound_is_exclusive() {
    let table = PhaseTable::default();
    assert_eq!(table.resolve(8.4).name, "Pre-Opening");
    assert_eq!(table.resolve(8.5).name, "Opening & Morning Session");
    assert_eq!(table.resolve(7.0).name, "Pre-Opening");
}

#[test]
fn test_default_phases_contiguous() {
    let phases = default_phases();
    assert_eq!(phases.len(), 6);
    for pair in phases.windows(2) {
        assert_eq!(pair[0].end_hour, pair[1].start_hour);
        assert_eq!(pair[0].id + 1, pair[1].id);
    }
}

#[test]
fn test_every_minute_of_day_resolves() {
    let table = PhaseTable::default();
    for minute_of_day in 0..(24 * 60) {
        let h = minute_of_day as f64 / 60.0;
        let (phase, location) = table.locate(h);
        match location {
            PhaseLocation::Within => assert!(phase.contains(h)),
            PhaseLocation::BeforeHours => {
                assert_eq!(phase.id, 1);
                assert!(h < phase.start_hour);
            }
            PhaseLocation::AfterHours => {
                assert_eq!(phase.id, 6);
                assert!(h >= phase.end_hour);
            }
        }
    }
}

#[test]
fn test_exactly_one_phase_contains_each_hour() {
    let table = PhaseTable::default();
    let mut h = 7.0;
    while h < 20.0 {
        let count = table.phases().iter().filter(|p| p.contains(h)).count();
        assert_eq!(count, 1, "decimal hour {}", h);
        h += 0.05;
    }
}

#[test]
fn test_phase_progress() {
    let table = PhaseTable::default();
    let midday = table.get(3).unwrap();
    assert_eq!(midday.progress(11.0), 0);
    assert_eq!(midday.progress(12.5), 50);
    assert_eq!(midday.progress(14.0), 100);
    assert_eq!(midday.progress(20.0), 100);
}

#[test]
fn test_custom_table_with_gap_rejected() {
    let mut phases = default_phases();
    phases[5].start_hour = 18.0;
    assert!(PhaseTable::new(phases).is_err());
}
