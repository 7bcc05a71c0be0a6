//! Tests for the RTGS, CSD and liquidity snapshot builders

use business_day_sim_core_rs::{
    CsdConfig, CsdSnapshot, DayTime, EngineConfig, LiquidityConfig, LiquiditySnapshot, Normal,
    RandomSource, RngManager, RtgsConfig, RtgsSnapshot, SnapshotSet,
};

/// Always returns the same uniform draw
struct Constant(f64);

impl RandomSource for Constant {
    fn next_f64(&mut self) -> f64 {
        self.0
    }
}

fn scenario_rtgs() -> RtgsConfig {
    let mut config = RtgsConfig::default();
    config.profile.cumulative = vec![100, 180, 260, 340, 420, 500, 580, 660, 740, 820];
    config
}

/// Every distribution collapsed to its mean
fn deterministic_rtgs() -> RtgsConfig {
    let mut config = scenario_rtgs();
    config.profile.settlement_rate_spread = 0.0;
    config.profile.processing_time.std_dev = 0.0;
    config.profile.average_value.std_dev = 0.0;
    config.profile.delay_share.std_dev = 0.0;
    config.rejected.std_dev = 0.0;
    config.queued.std_dev = 0.0;
    config.ilf.std_dev = 0.0;
    config
}

#[test]
fn test_rtgs_opening_minute() {
    let snap = RtgsSnapshot::build(DayTime::new(8, 0), &scenario_rtgs(), &mut RngManager::new(1));
    assert_eq!(snap.cumulative_transactions, 100);
    assert_eq!(snap.hourly_transactions, 100);
    assert_eq!(snap.total_transactions, 100);
}

#[test]
fn test_rtgs_half_past_opening() {
    let snap = RtgsSnapshot::build(DayTime::new(8, 30), &scenario_rtgs(), &mut RngManager::new(1));
    assert_eq!(snap.cumulative_transactions, 100);
    assert_eq!(snap.total_transactions, 150);
}

#[test]
fn test_rtgs_before_window_is_zero_for_every_minute() {
    let config = scenario_rtgs();
    let mut rng = RngManager::new(99);
    for minute in 0..60 {
        let snap = RtgsSnapshot::build(DayTime::new(6, minute), &config, &mut rng);
        assert_eq!(snap, RtgsSnapshot::zeroed(&config), "minute {}", minute);
    }
}

#[test]
fn test_rtgs_exact_values_at_means() {
    let snap = RtgsSnapshot::build(DayTime::new(9, 30), &deterministic_rtgs(), &mut RngManager::new(5));

    assert_eq!(snap.cumulative_transactions, 180);
    assert_eq!(snap.hourly_transactions, 120); // 80 + 40
    assert_eq!(snap.total_transactions, 220);
    assert_eq!(snap.settled_transactions, 207); // 220 * 0.94 = 206.8
    assert_eq!(snap.rejected_transactions, 4); // 220 * 0.02 = 4.4
    assert_eq!(snap.queued_transactions, 18); // 220 * 0.08 = 17.6
    assert_eq!(snap.ilf_transactions, 11); // 220 * 0.05
    assert_eq!(snap.processing_time, 1.8);
    assert_eq!(snap.average_transaction_value, 12_500_000.0);
    assert_eq!(snap.total_volume, 207 * 12_500_000);
    assert_eq!(snap.currency_breakdown["EUR"], 66); // 220 * 0.30
}

#[test]
fn test_negative_samples_floored() {
    let mut config = deterministic_rtgs();
    config.rejected = Normal::new(-0.5, 0.0);
    config.profile.processing_time = Normal::new(-3.0, 0.0);
    config.profile.average_value = Normal::new(-10.0, 0.0);

    let snap = RtgsSnapshot::build(DayTime::new(10, 0), &config, &mut RngManager::new(5));
    assert_eq!(snap.rejected_transactions, 0);
    assert_eq!(snap.processing_time, 0.0);
    assert_eq!(snap.average_transaction_value, 0.0);
    assert_eq!(snap.total_volume, 0);
}

#[test]
fn test_settlement_rate_clamped_to_one() {
    let mut config = deterministic_rtgs();
    config.profile.settlement_rate_base = 1.0;
    config.profile.settlement_rate_spread = 0.5;

    // Draws near 1.0 give a normal sample around +3.7
    let snap = RtgsSnapshot::build(DayTime::new(9, 0), &config, &mut Constant(0.999));
    assert_eq!(snap.settled_transactions, snap.total_transactions);
}

#[test]
fn test_csd_has_own_window() {
    let config = CsdConfig::default();
    let mut rng = RngManager::new(8);
    assert_eq!(
        CsdSnapshot::build(DayTime::new(8, 59), &config, &mut rng).total_transactions,
        0
    );
    assert_eq!(
        CsdSnapshot::build(DayTime::new(9, 0), &config, &mut rng).total_transactions,
        640
    );
    assert_eq!(
        CsdSnapshot::build(DayTime::new(17, 0), &config, &mut rng).total_transactions,
        0
    );
}

#[test]
fn test_liquidity_from_constant_draw() {
    let config = LiquidityConfig::default();
    let snap = LiquiditySnapshot::build(DayTime::new(13, 0), &config, &mut Constant(0.5));

    assert_eq!(snap.utilization_rate, 75.0);
    assert_eq!(snap.total_liquidity, 525_000_000_000);
    assert_eq!(snap.available_liquidity, 131_250_000_000);
    assert_eq!(snap.cash_liquidity, 78_750_000_000);
    assert_eq!(snap.pledged_collateral, 39_375_000_000);
    assert_eq!(snap.intraday_credit, 13_125_000_000);
}

#[test]
fn test_liquidity_total_redrawn_each_tick() {
    let config = LiquidityConfig::default();
    let mut rng = RngManager::new(3);
    let a = LiquiditySnapshot::build(DayTime::new(11, 0), &config, &mut rng);
    let b = LiquiditySnapshot::build(DayTime::new(11, 0), &config, &mut rng);
    assert_eq!(a.utilization_rate, b.utilization_rate);
    assert_ne!(a.total_liquidity, b.total_liquidity);
}

#[test]
fn test_snapshot_set_same_seed_same_output() {
    let config = EngineConfig::default();
    let slot = DayTime::new(12, 17);
    let a = SnapshotSet::build(slot, &config, &mut RngManager::new(2024));
    let b = SnapshotSet::build(slot, &config, &mut RngManager::new(2024));
    assert_eq!(a, b);
}

#[test]
fn test_zeroed_set_lists_categories() {
    let config = EngineConfig::default();
    let zero = SnapshotSet::zeroed(&config);
    assert_eq!(zero.rtgs.currency_breakdown.len(), 5);
    assert!(zero.rtgs.currency_breakdown.values().all(|&v| v == 0));
    assert_eq!(zero.csd.instrument_breakdown.len(), 4);
    assert_eq!(zero.liquidity.total_liquidity, 0);
}
