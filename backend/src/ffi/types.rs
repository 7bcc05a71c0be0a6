//! Type conversion utilities for FFI boundary

use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::emulator::TickReport;
use crate::phase::PhaseLocation;

/// Map an engine error to `ValueError`
pub fn engine_err(err: crate::error::EngineError) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
}

/// Convert a TickReport to a Python dict
pub fn tick_report_to_py(py: Python<'_>, report: &TickReport) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new_bound(py);

    dict.set_item("tick", report.tick)?;
    dict.set_item("phase_id", report.phase_id)?;
    dict.set_item("phase_changed", report.phase_changed)?;
    dict.set_item(
        "location",
        match report.location {
            PhaseLocation::Within => "within",
            PhaseLocation::BeforeHours => "before_hours",
            PhaseLocation::AfterHours => "after_hours",
        },
    )?;
    dict.set_item("rtgs_total", report.rtgs_total)?;
    dict.set_item("csd_total", report.csd_total)?;
    dict.set_item("utilization_rate", report.utilization_rate)?;

    Ok(dict.unbind())
}
