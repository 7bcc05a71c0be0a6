//! Emulation Controller
//!
//! The single owner and mutator of the emulated business-day state:
//!
//! ```text
//! tick():
//! 1. Read the clock (emulated time tracks wall time 1:1)
//! 2. Resolve the business phase for the current decimal hour
//! 3. Build RTGS, CSD and liquidity snapshots for (hour, minute)
//! 4. Swap the new snapshot set in as a unit
//! ```
//!
//! The controller does no scheduling of its own. A host calls `tick()` on a
//! fixed interval (`EngineConfig::tick_interval_secs`) while `is_running()`
//! holds; `toggle()` and `reset()` stop further ticks from doing any work.
//!
//! # Example
//!
//! ```rust
//! use business_day_sim_core_rs::core::clock::ManualClock;
//! use business_day_sim_core_rs::{Controller, EngineConfig};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let mut controller = Controller::new(EngineConfig::default(), Box::new(ManualClock::new(start))).unwrap();
//!
//! let report = controller.tick().unwrap();
//! assert_eq!(report.phase_id, 3);
//! assert_eq!(controller.format_time(), "12:00");
//! ```

use crate::config::EngineConfig;
use crate::core::clock::Clock;
use crate::core::time::{format_time, DayTime};
use crate::emulator::frame::DashboardFrame;
use crate::error::EngineError;
use crate::metrics::SnapshotSet;
use crate::phase::{BusinessPhase, PhaseLocation, PhaseTable};
use crate::rng::{RandomSource, RngManager};
use crate::tables::{DistributionTables, RailTables};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Mutable state of the emulated day, owned by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmulatedBusinessDayState {
    /// Wall-clock time at the last tick or reset
    pub current_time: NaiveDateTime,
    /// Emulated time; equal to `current_time`
    pub emulated_time: NaiveDateTime,
    pub current_phase_id: u8,
    pub is_running: bool,
    /// Stored but not consulted (see `Controller::set_time_multiplier`)
    pub time_multiplier: f64,
}

/// Summary of one completed tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    /// Tick number, 1-based
    pub tick: u64,
    pub phase_id: u8,
    /// Phase differs from the one resolved on the previous tick or reset
    pub phase_changed: bool,
    pub location: PhaseLocation,
    pub rtgs_total: i64,
    pub csd_total: i64,
    pub utilization_rate: f64,
}

/// Owns state, tables and the random source; recomputes on each tick
pub struct Controller {
    config: EngineConfig,
    fingerprint: String,
    phases: PhaseTable,
    tables: DistributionTables,
    clock: Box<dyn Clock>,
    rng: Box<dyn RandomSource + Send>,
    state: EmulatedBusinessDayState,
    snapshots: Arc<SnapshotSet>,
    ticks: u64,
}

impl Controller {
    /// Create a controller seeded from `config.rng_seed`.
    ///
    /// Validates the configuration, builds the chart tables and computes
    /// the first snapshot set. The controller starts running.
    pub fn new(config: EngineConfig, clock: Box<dyn Clock>) -> Result<Self, EngineError> {
        let rng = RngManager::new(config.rng_seed);
        Self::with_source(config, clock, Box::new(rng))
    }

    /// Create a controller drawing from an injected random source
    pub fn with_source(
        config: EngineConfig,
        clock: Box<dyn Clock>,
        mut rng: Box<dyn RandomSource + Send>,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        let phases = PhaseTable::new(config.phases.clone())?;
        let fingerprint = config.fingerprint()?;

        let tables = DistributionTables {
            rtgs: RailTables::build(
                &config.rtgs.profile.cumulative,
                &config.rtgs.profile.category_split,
                config.rtgs.profile.average_value.mean,
                config.category_variance,
                rng.as_mut(),
            ),
            csd: RailTables::build(
                &config.csd.profile.cumulative,
                &config.csd.profile.category_split,
                config.csd.profile.average_value.mean,
                config.category_variance,
                rng.as_mut(),
            ),
        };

        let now = clock.now();
        let slot = DayTime::from_datetime(&now, config.weekend_activity);
        let phase_id = phases.resolve(slot.decimal_hour()).id;
        let snapshots = Arc::new(SnapshotSet::build(slot, &config, rng.as_mut()));

        log::info!(
            "Emulator started at {} using {} (phase {}, config {})",
            format_time(&now),
            clock.name(),
            phase_id,
            &fingerprint[..12]
        );

        Ok(Self {
            config,
            fingerprint,
            phases,
            tables,
            clock,
            rng,
            state: EmulatedBusinessDayState {
                current_time: now,
                emulated_time: now,
                current_phase_id: phase_id,
                is_running: true,
                time_multiplier: 1.0,
            },
            snapshots,
            ticks: 0,
        })
    }

    /// Recompute phase and snapshots from the current clock reading.
    ///
    /// Returns `None` without touching anything when the controller is
    /// stopped.
    pub fn tick(&mut self) -> Option<TickReport> {
        if !self.state.is_running {
            return None;
        }

        let now = self.clock.now();
        self.state.current_time = now;
        self.state.emulated_time = now;

        let slot = DayTime::from_datetime(&now, self.config.weekend_activity);
        let (phase_id, location, phase_changed) = self.refresh_phase(slot);

        let snapshots = SnapshotSet::build(slot, &self.config, self.rng.as_mut());
        self.snapshots = Arc::new(snapshots);
        self.ticks += 1;

        let report = TickReport {
            tick: self.ticks,
            phase_id,
            phase_changed,
            location,
            rtgs_total: self.snapshots.rtgs.total_transactions,
            csd_total: self.snapshots.csd.total_transactions,
            utilization_rate: self.snapshots.liquidity.utilization_rate,
        };

        log::debug!(
            "Tick {} at {}: phase {}, rtgs {}, csd {}, utilization {}%",
            report.tick,
            format_time(&now),
            report.phase_id,
            report.rtgs_total,
            report.csd_total,
            report.utilization_rate
        );

        Some(report)
    }

    /// Flip `is_running`; returns the new value
    pub fn toggle(&mut self) -> bool {
        self.state.is_running = !self.state.is_running;
        log::info!(
            "Emulator {}",
            if self.state.is_running { "resumed" } else { "paused" }
        );
        self.state.is_running
    }

    /// Stop, move emulated time to now, re-resolve the phase and publish
    /// the all-zero snapshot set. Tables are left as built.
    pub fn reset(&mut self) {
        let now = self.clock.now();
        self.state.current_time = now;
        self.state.emulated_time = now;
        self.state.is_running = false;

        let slot = DayTime::from_datetime(&now, self.config.weekend_activity);
        self.refresh_phase(slot);
        self.snapshots = Arc::new(SnapshotSet::zeroed(&self.config));

        log::info!("Emulator reset at {}", format_time(&now));
    }

    /// Store a time multiplier.
    ///
    /// The value is kept in state for consumers but does not change the tick
    /// cadence or the time the builders see.
    pub fn set_time_multiplier(&mut self, multiplier: f64) -> Result<(), EngineError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(EngineError::InvalidTimeMultiplier(multiplier));
        }
        self.state.time_multiplier = multiplier;
        Ok(())
    }

    fn refresh_phase(&mut self, slot: DayTime) -> (u8, PhaseLocation, bool) {
        let (phase, location) = self.phases.locate(slot.decimal_hour());
        let id = phase.id;

        if location != PhaseLocation::Within {
            log::trace!("Outside configured phases ({:?}), using phase {}", location, id);
        }

        let changed = id != self.state.current_phase_id;
        if changed {
            log::info!(
                "Phase {} -> {} ({})",
                self.state.current_phase_id,
                id,
                phase.name
            );
            self.state.current_phase_id = id;
        }
        (id, location, changed)
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn state(&self) -> &EmulatedBusinessDayState {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Current published snapshot set; stays valid after later ticks
    pub fn snapshots(&self) -> Arc<SnapshotSet> {
        Arc::clone(&self.snapshots)
    }

    /// Phase resolved at the last tick or reset
    pub fn current_phase(&self) -> &BusinessPhase {
        self.phases
            .get(self.state.current_phase_id)
            .unwrap_or_else(|| self.phases.first())
    }

    /// Percent of the current phase elapsed at the emulated time
    pub fn phase_progress(&self) -> u8 {
        let slot = DayTime::from_datetime(&self.state.emulated_time, true);
        self.current_phase().progress(slot.decimal_hour())
    }

    /// Emulated time as `"HH:MM"`
    pub fn format_time(&self) -> String {
        format_time(&self.state.emulated_time)
    }

    pub fn phases(&self) -> &PhaseTable {
        &self.phases
    }

    pub fn tables(&self) -> &DistributionTables {
        &self.tables
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Capture everything a dashboard renders
    pub fn frame(&self) -> DashboardFrame {
        DashboardFrame {
            frame_id: Uuid::new_v4(),
            tick: self.ticks,
            state: self.state.clone(),
            phase: self.current_phase().clone(),
            phase_progress: self.phase_progress(),
            formatted_time: self.format_time(),
            snapshots: (*self.snapshots).clone(),
            config_fingerprint: self.fingerprint.clone(),
        }
    }
}
