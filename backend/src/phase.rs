//! Business-day phase state machine
//!
//! Six named phases partition the settlement day into half-open
//! `[start_hour, end_hour)` intervals. Resolution is a pure function of the
//! decimal hour; the controller only caches the last id it resolved.
//!
//! Times before the first phase resolve to the first phase, times at or
//! after the end of the last phase resolve to the last.

use crate::error::EngineError;
use serde::{Deserialize, Serialize};

/// One named interval of the business day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessPhase {
    /// 1-based position in the day
    pub id: u8,
    pub name: String,
    /// Inclusive start, decimal hours
    pub start_hour: f64,
    /// Exclusive end, decimal hours
    pub end_hour: f64,
    pub description: String,
    pub activities: Vec<String>,
}

impl BusinessPhase {
    pub fn contains(&self, decimal_hour: f64) -> bool {
        self.start_hour <= decimal_hour && decimal_hour < self.end_hour
    }

    /// Percent of the phase elapsed at `decimal_hour`, clamped to 0..=100.
    ///
    /// A zero-width phase reports 0.
    pub fn progress(&self, decimal_hour: f64) -> u8 {
        let width = self.end_hour - self.start_hour;
        if width <= 0.0 {
            return 0;
        }
        let pct = (decimal_hour - self.start_hour) / width * 100.0;
        pct.clamp(0.0, 100.0).round() as u8
    }
}

/// Where a decimal hour falls relative to the configured phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseLocation {
    /// Inside a configured phase
    Within,
    /// Before the first phase starts
    BeforeHours,
    /// At or after the last phase ends
    AfterHours,
}

/// Validated, ordered, contiguous set of phases
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseTable {
    phases: Vec<BusinessPhase>,
}

impl PhaseTable {
    /// Validate and wrap a phase list.
    ///
    /// Ids must run 1..=n in order, every phase must have positive width,
    /// and each phase must end exactly where the next begins.
    pub fn new(phases: Vec<BusinessPhase>) -> Result<Self, EngineError> {
        if phases.is_empty() {
            return Err(EngineError::EmptyPhaseTable);
        }

        for (position, phase) in phases.iter().enumerate() {
            if phase.id as usize != position + 1 {
                return Err(EngineError::PhaseIdOrder {
                    position,
                    found: phase.id,
                });
            }
            if !(phase.end_hour > phase.start_hour) {
                return Err(EngineError::ZeroWidthPhase {
                    id: phase.id,
                    start: phase.start_hour,
                    end: phase.end_hour,
                });
            }
        }

        for pair in phases.windows(2) {
            if pair[0].end_hour != pair[1].start_hour {
                return Err(EngineError::PhaseDiscontinuity {
                    previous: pair[0].id,
                    next: pair[1].id,
                    previous_end: pair[0].end_hour,
                    next_start: pair[1].start_hour,
                });
            }
        }

        Ok(Self { phases })
    }

    pub fn phases(&self) -> &[BusinessPhase] {
        &self.phases
    }

    pub fn first(&self) -> &BusinessPhase {
        &self.phases[0]
    }

    pub fn last(&self) -> &BusinessPhase {
        &self.phases[self.phases.len() - 1]
    }

    /// Phase by id, if configured
    pub fn get(&self, id: u8) -> Option<&BusinessPhase> {
        self.phases.iter().find(|p| p.id == id)
    }

    /// Phase in effect at `decimal_hour` and whether it came from a
    /// boundary fallback.
    pub fn locate(&self, decimal_hour: f64) -> (&BusinessPhase, PhaseLocation) {
        if let Some(phase) = self.phases.iter().find(|p| p.contains(decimal_hour)) {
            return (phase, PhaseLocation::Within);
        }
        if decimal_hour < self.first().start_hour {
            (self.first(), PhaseLocation::BeforeHours)
        } else {
            (self.last(), PhaseLocation::AfterHours)
        }
    }

    /// Phase in effect at `decimal_hour`
    ///
    /// # Example
    /// ```
    /// use business_day_sim_core_rs::PhaseTable;
    ///
    /// let table = PhaseTable::default();
    /// assert_eq!(table.resolve(8.4).name, "Pre-Opening");
    /// assert_eq!(table.resolve(8.5).name, "Opening & Morning Session");
    /// assert_eq!(table.resolve(3.0).id, 1);
    /// assert_eq!(table.resolve(23.0).id, 6);
    /// ```
    pub fn resolve(&self, decimal_hour: f64) -> &BusinessPhase {
        self.locate(decimal_hour).0
    }
}

impl Default for PhaseTable {
    fn default() -> Self {
        Self {
            phases: default_phases(),
        }
    }
}

fn phase(
    id: u8,
    name: &str,
    start_hour: f64,
    end_hour: f64,
    description: &str,
    activities: &[&str],
) -> BusinessPhase {
    BusinessPhase {
        id,
        name: name.to_string(),
        start_hour,
        end_hour,
        description: description.to_string(),
        activities: activities.iter().map(|a| a.to_string()).collect(),
    }
}

/// The built-in six-phase settlement day
pub fn default_phases() -> Vec<BusinessPhase> {
    vec![
        phase(
            1,
            "Pre-Opening",
            7.0,
            8.5,
            "System start-up and opening balance preparation",
            &[
                "Opening balances loaded",
                "Standing orders scheduled",
                "Participant connectivity checks",
            ],
        ),
        phase(
            2,
            "Opening & Morning Session",
            8.5,
            11.0,
            "Settlement opens and morning payment flows ramp up",
            &[
                "Customer payments released",
                "Overnight queue cleared",
                "Intraday credit drawn against collateral",
            ],
        ),
        phase(
            3,
            "Midday Peak",
            11.0,
            14.0,
            "Highest payment and securities settlement volumes",
            &[
                "Interbank transfers at peak",
                "DVP settlement batches",
                "Queue monitoring and liquidity recycling",
            ],
        ),
        phase(
            4,
            "Afternoon Adjustments",
            14.0,
            16.0,
            "Participants rebalance positions ahead of cut-off",
            &[
                "Liquidity redistribution",
                "Collateral substitution",
                "Repo settlement",
            ],
        ),
        phase(
            5,
            "Cut-off & End of Day",
            16.0,
            17.5,
            "Customer and interbank cut-offs, queue resolution",
            &[
                "Customer payment cut-off",
                "Interbank cut-off",
                "Intraday credit repayment",
            ],
        ),
        phase(
            6,
            "Post-Closing",
            17.5,
            20.0,
            "Reconciliation, reporting and next-day preparation",
            &[
                "End-of-day reconciliation",
                "Statements generated",
                "Archive and backup",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_validates() {
        let table = PhaseTable::new(default_phases()).unwrap();
        assert_eq!(table.phases().len(), 6);
    }

    #[test]
    fn test_boundary_fallbacks() {
        let table = PhaseTable::default();
        assert_eq!(table.locate(6.99).1, PhaseLocation::BeforeHours);
        assert_eq!(table.locate(6.99).0.id, 1);
        assert_eq!(table.locate(20.0).1, PhaseLocation::AfterHours);
        assert_eq!(table.locate(20.0).0.id, 6);
        assert_eq!(table.locate(12.0).1, PhaseLocation::Within);
    }

    #[test]
    fn test_progress_clamped() {
        let p = &default_phases()[2]; // 11:00-14:00
        assert_eq!(p.progress(11.0), 0);
        assert_eq!(p.progress(12.5), 50);
        assert_eq!(p.progress(10.0), 0);
        assert_eq!(p.progress(15.0), 100);
    }

    #[test]
    fn test_zero_width_progress_guarded() {
        let mut p = default_phases()[0].clone();
        p.end_hour = p.start_hour;
        assert_eq!(p.progress(p.start_hour), 0);
    }

    #[test]
    fn test_gap_rejected() {
        let mut phases = default_phases();
        phases[3].start_hour = 14.5;
        assert!(matches!(
            PhaseTable::new(phases),
            Err(EngineError::PhaseDiscontinuity { previous: 3, next: 4, .. })
        ));
    }

    #[test]
    fn test_zero_width_rejected() {
        let mut phases = default_phases();
        phases[0].end_hour = phases[0].start_hour;
        assert!(matches!(
            PhaseTable::new(phases),
            Err(EngineError::ZeroWidthPhase { id: 1, .. })
        ));
    }

    #[test]
    fn test_out_of_order_ids_rejected() {
        let mut phases = default_phases();
        phases.swap(0, 1);
        assert!(matches!(
            PhaseTable::new(phases),
            Err(EngineError::PhaseIdOrder { position: 0, found: 2 })
        ));
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(PhaseTable::new(vec![]), Err(EngineError::EmptyPhaseTable));
    }
}
