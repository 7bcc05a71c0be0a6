//! Serializable view of the controller for dashboard consumers

use crate::emulator::controller::EmulatedBusinessDayState;
use crate::metrics::SnapshotSet;
use crate::phase::BusinessPhase;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Everything a dashboard renders, captured at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardFrame {
    /// Unique per frame
    pub frame_id: Uuid,
    /// Ticks completed since the controller was created
    pub tick: u64,
    pub state: EmulatedBusinessDayState,
    pub phase: BusinessPhase,
    /// Percent of the current phase elapsed
    pub phase_progress: u8,
    /// Emulated time as `"HH:MM"`
    pub formatted_time: String,
    pub snapshots: SnapshotSet,
    /// Fingerprint of the configuration that produced this frame
    pub config_fingerprint: String,
}

impl DashboardFrame {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
