//! PyO3 wrapper for the emulation controller
//!
//! # Example (from Python)
//!
//! ```python
//! from business_day_sim_core_rs import Emulator
//!
//! emu = Emulator('{"rng_seed": 7}')
//! report = emu.tick()
//! frame = json.loads(emu.frame_json())
//! print(frame["formatted_time"], frame["phase"]["name"])
//! ```

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{engine_err, tick_report_to_py};
use crate::config::EngineConfig;
use crate::core::clock::SystemClock;
use crate::emulator::Controller;

/// Python wrapper for the Rust controller
#[pyclass(name = "Emulator")]
pub struct PyEmulator {
    inner: Controller,
}

#[pymethods]
impl PyEmulator {
    /// Create an emulator reading the system clock.
    ///
    /// `config_json` overrides any subset of the default configuration.
    #[new]
    #[pyo3(signature = (config_json=None))]
    fn new(config_json: Option<&str>) -> PyResult<Self> {
        let config = match config_json {
            Some(json) => EngineConfig::from_json_str(json).map_err(engine_err)?,
            None => EngineConfig::default(),
        };
        let inner = Controller::new(config, Box::new(SystemClock::new())).map_err(engine_err)?;
        Ok(Self { inner })
    }

    /// Run one tick; returns None while paused
    fn tick(&mut self, py: Python<'_>) -> PyResult<Option<Py<PyDict>>> {
        match self.inner.tick() {
            Some(report) => Ok(Some(tick_report_to_py(py, &report)?)),
            None => Ok(None),
        }
    }

    /// Pause or resume; returns the new running flag
    fn toggle(&mut self) -> bool {
        self.inner.toggle()
    }

    fn reset(&mut self) {
        self.inner.reset()
    }

    fn set_time_multiplier(&mut self, multiplier: f64) -> PyResult<()> {
        self.inner.set_time_multiplier(multiplier).map_err(engine_err)
    }

    fn is_running(&self) -> bool {
        self.inner.is_running()
    }

    /// Seconds between ticks the host should schedule
    fn tick_interval_secs(&self) -> u64 {
        self.inner.config().tick_interval_secs
    }

    fn format_time(&self) -> String {
        self.inner.format_time()
    }

    fn phase_progress(&self) -> u8 {
        self.inner.phase_progress()
    }

    /// Full dashboard frame as JSON
    fn frame_json(&self) -> PyResult<String> {
        self.inner.frame().to_json().map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(format!(
                "Frame serialization failed: {}",
                e
            ))
        })
    }
}
