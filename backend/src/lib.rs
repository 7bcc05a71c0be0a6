//! Business Day Simulator Core - Rust Engine
//!
//! Synthesizes time-varying operational metrics for a financial
//! market-infrastructure dashboard: RTGS and CSD transaction counts,
//! liquidity levels and business-phase progression.
//!
//! # Architecture
//!
//! - **tables**: Cumulative per-hour baselines and category splits
//! - **pattern**: Hourly increments and within-hour interpolation
//! - **rng**: Deterministic random number generation
//! - **phase**: Business-day phase state machine
//! - **metrics**: RTGS, CSD and liquidity snapshot builders
//! - **emulator**: Controller owning state, ticks and controls
//! - **core**: Clock abstraction and time-of-day slots
//!
//! # Critical Invariants
//!
//! 1. All counts and monetary values are i64, never negative
//! 2. All randomness is deterministic (seeded RNG)
//! 3. A snapshot depends only on its slot and its own draws

// Module declarations
pub mod config;
pub mod core;
pub mod emulator;
pub mod error;
pub mod metrics;
pub mod pattern;
pub mod phase;
pub mod rng;
pub mod tables;

// Re-exports for convenience
pub use config::EngineConfig;
pub use crate::core::clock::{Clock, ManualClock, SystemClock};
pub use crate::core::time::DayTime;
pub use emulator::{Controller, DashboardFrame, EmulatedBusinessDayState, TickReport};
pub use error::EngineError;
pub use metrics::{
    CsdConfig, CsdSnapshot, LiquidityConfig, LiquiditySnapshot, Normal, RailProfile, RtgsConfig,
    RtgsSnapshot, SnapshotSet,
};
pub use phase::{BusinessPhase, PhaseLocation, PhaseTable};
pub use rng::{RandomSource, RngManager};
pub use tables::{BusinessWindow, DistributionTables, RailTables};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn business_day_sim_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ffi::emulator::PyEmulator>()?;
    Ok(())
}
