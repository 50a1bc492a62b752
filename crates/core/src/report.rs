//! Simulation reporting.
//!
//! Renders a [`SimulationResult`] for people and tools. It provides:
//! 1. **Summary:** Access counts and hit/miss rates in the simulator's stats layout.
//! 2. **Report:** One `Address: <a> => HIT|MISS` line per access plus totals.
//! 3. **Chart data:** Hit/miss proportion as CSV, ready for a pie chart.
//! 4. **History:** A compact `H`/`M` strip, one mark per access.
//! 5. **Final state:** Residents of every set at the end of the run.
//!
//! Every renderer is a `Display` wrapper borrowing the result read-only.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::common::error::ReportError;
use crate::sim::SimulationResult;

const RULE_HEAVY: &str = "==========================================================";
const RULE_LIGHT: &str = "----------------------------------------------------------";

/// Totals and rates, grouped like the simulator's statistics dump.
#[derive(Debug, Clone, Copy)]
pub struct Summary<'a>(pub &'a SimulationResult);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        let g = r.geometry();
        writeln!(f, "{RULE_HEAVY}")?;
        writeln!(f, "CACHE SIMULATION SUMMARY")?;
        writeln!(f, "{RULE_HEAVY}")?;
        writeln!(f, "cache.mapping            {}", g.mapping)?;
        writeln!(f, "cache.capacity           {}", g.capacity)?;
        writeln!(f, "cache.associativity      {}", g.associativity)?;
        writeln!(f, "cache.sets               {}", g.set_count)?;
        writeln!(f, "{RULE_LIGHT}")?;
        writeln!(f, "sim.accesses             {}", r.total())?;
        writeln!(f, "sim.hits                 {}", r.hits())?;
        writeln!(f, "sim.misses               {}", r.misses())?;
        writeln!(f, "sim.evictions            {}", r.evictions())?;
        writeln!(f, "sim.hit_rate             {:.2}", r.hit_rate())?;
        writeln!(f, "sim.miss_rate            {:.2}", r.miss_rate())?;
        writeln!(f, "{RULE_HEAVY}")
    }
}

/// Persistent per-access report.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a>(pub &'a SimulationResult);

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = self.0;
        writeln!(f, "--- Cache Simulation Report ---")?;
        for record in r.trace() {
            writeln!(f, "Address: {} => {}", record.address, record.outcome)?;
        }
        writeln!(f)?;
        writeln!(f, "Total: {}", r.total())?;
        writeln!(f, "Hits: {}, Misses: {}", r.hits(), r.misses())?;
        writeln!(f, "Hit Rate: {:.2}", r.hit_rate())
    }
}

/// Aggregate hit/miss counts as CSV.
#[derive(Debug, Clone, Copy)]
pub struct ChartCsv<'a>(pub &'a SimulationResult);

impl fmt::Display for ChartCsv<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hits,Misses")?;
        writeln!(f, "{},{}", self.0.hits(), self.0.misses())
    }
}

/// One `H` or `M` per access, in input order.
#[derive(Debug, Clone, Copy)]
pub struct History<'a>(pub &'a SimulationResult);

impl fmt::Display for History<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0
            .outcomes()
            .try_for_each(|outcome| write!(f, "{}", outcome.mark()))
    }
}

/// Residents of every set, one line per set.
#[derive(Debug, Clone, Copy)]
pub struct FinalState<'a>(pub &'a SimulationResult);

impl fmt::Display for FinalState<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, members) in self.0.final_state().iter().enumerate() {
            writeln!(f, "Set {index}: {members:?}")?;
        }
        Ok(())
    }
}

/// Writes the per-access [`Report`] to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the directory or file cannot be written.
pub fn save_report(result: &SimulationResult, path: impl AsRef<Path>) -> Result<(), ReportError> {
    write_file(path.as_ref(), &Report(result).to_string())
}

/// Writes the [`ChartCsv`] data to `path`, creating parent directories.
///
/// # Errors
///
/// Returns [`ReportError::Io`] if the directory or file cannot be written.
pub fn save_chart_csv(result: &SimulationResult, path: impl AsRef<Path>) -> Result<(), ReportError> {
    write_file(path.as_ref(), &ChartCsv(result).to_string())
}

fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    let io_err = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(path, contents).map_err(io_err)
}
