//! Simulation statistics collection and reporting.
//!
//! This module tracks stream-level metrics for a multiplier run. It provides:
//! 1. **Throughput:** Cycles, requests accepted, products emitted, products per cycle.
//! 2. **Latency:** Cycle of the first product (the fill latency from an empty start).
//! 3. **Stalls:** Cycles the producer or the multiplier was held by the other side.
//! 4. **Occupancy:** Cycles with at least one request in flight, and peak occupancy.

use std::fmt;

use serde::Serialize;

/// Stream and occupancy counters for one simulation run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SimStats {
    /// Total simulated cycles.
    pub cycles: u64,
    /// Requests transferred into the multiplier.
    pub requests_accepted: u64,
    /// Products transferred out of the multiplier.
    pub products_emitted: u64,
    /// Cycles the producer was valid but the multiplier not ready.
    pub input_stall_cycles: u64,
    /// Cycles the multiplier offered a product the consumer did not take.
    pub output_stall_cycles: u64,
    /// Cycles with at least one request in flight.
    pub busy_cycles: u64,
    /// Highest number of requests in flight at once.
    pub peak_in_flight: usize,
    /// Cycle on which the first product transferred.
    pub first_output_cycle: Option<u64>,
    /// Cycle on which the most recent product transferred.
    pub last_output_cycle: Option<u64>,
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"stream"`, `"occupancy"`.
/// Pass an empty slice to `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "stream", "occupancy"];

impl SimStats {
    /// Products emitted per simulated cycle.
    pub fn throughput(&self) -> f64 {
        if self.cycles == 0 {
            return 0.0;
        }
        self.products_emitted as f64 / self.cycles as f64
    }

    /// Products per cycle between the first and last product, i.e. steady-state rate.
    ///
    /// `None` until at least two products have been emitted.
    pub fn steady_state_throughput(&self) -> Option<f64> {
        let (first, last) = (self.first_output_cycle?, self.last_output_cycle?);
        if self.products_emitted < 2 || last == first {
            return None;
        }
        Some((self.products_emitted - 1) as f64 / (last - first) as f64)
    }

    /// Cycle of the first product; from a reset start this is the fill latency.
    pub const fn fill_latency(&self) -> Option<u64> {
        self.first_output_cycle
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]. Pass an empty slice to
    /// print all sections (same as `print()`).
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render(sections));
    }

    /// Prints every section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }

    fn render(&self, sections: &[String]) -> String {
        use std::fmt::Write as _;

        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let cyc = self.cycles.max(1) as f64;
        let pct = |n: u64| (n as f64 / cyc) * 100.0;
        let mut out = String::new();

        // Writing into a String cannot fail.
        if want("summary") {
            let _ = writeln!(out, "\n==========================================================");
            let _ = writeln!(out, "MULTIPLIER SIMULATION STATISTICS");
            let _ = writeln!(out, "==========================================================");
            let _ = writeln!(out, "sim_cycles               {}", self.cycles);
            let _ = writeln!(out, "sim_requests             {}", self.requests_accepted);
            let _ = writeln!(out, "sim_products             {}", self.products_emitted);
            let _ = writeln!(out, "sim_throughput           {:.4} /cycle", self.throughput());
            if let Some(rate) = self.steady_state_throughput() {
                let _ = writeln!(out, "sim_steady_throughput    {rate:.4} /cycle");
            }
            if let Some(latency) = self.fill_latency() {
                let _ = writeln!(out, "sim_first_output         cycle {latency}");
            }
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("stream") {
            let _ = writeln!(out, "STREAM STALLS");
            let _ = writeln!(
                out,
                "  stalls.input           {} ({:.2}%)",
                self.input_stall_cycles,
                pct(self.input_stall_cycles)
            );
            let _ = writeln!(
                out,
                "  stalls.output          {} ({:.2}%)",
                self.output_stall_cycles,
                pct(self.output_stall_cycles)
            );
            let _ = writeln!(out, "----------------------------------------------------------");
        }
        if want("occupancy") {
            let _ = writeln!(out, "OCCUPANCY");
            let _ = writeln!(
                out,
                "  cycles.busy            {} ({:.2}%)",
                self.busy_cycles,
                pct(self.busy_cycles)
            );
            let _ = writeln!(out, "  in_flight.peak         {}", self.peak_in_flight);
            let _ = writeln!(out, "==========================================================");
        }
        out
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&[]))
    }
}
