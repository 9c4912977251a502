// SPDX-License-Identifier: Apache-2.0

//! Scenario sequencer: drives the fixed, ordered scenario list against both
//! FIFO models through the clock driver, feeding every cycle to the
//! comparator and coverage tracker and every accepted write/read to the
//! latency checker. No scenario aborts the run; every finding is printed as
//! it occurs and accumulated into the run totals.

use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::clocking::ClockDriver;
use crate::compare::{check_flag_invariants, compare_outputs};
use crate::coverage::CoverageTracker;
use crate::latency::LatencyChecker;
use crate::model::FifoModel;

#[derive(Debug, Clone, Copy)]
pub struct SequencerConfig {
    /// Seed for the randomized-stress scenario; explicit so a failing run
    /// can be replayed exactly.
    pub seed: u64,
    pub stress_cycles: u64,
    pub max_allowed_latency: u64,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        SequencerConfig {
            seed: 0,
            stress_cycles: 100,
            max_allowed_latency: 40,
        }
    }
}

/// Aggregate totals of one full run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub cycles: u64,
    pub writes: u64,
    pub reads: u64,
    pub mismatches: u64,
    pub latency_violations: u64,
    pub protocol_violations: u64,
}

impl RunSummary {
    pub fn passed(&self) -> bool {
        self.mismatches == 0 && self.latency_violations == 0 && self.protocol_violations == 0
    }
}

const RESET_CYCLES: u64 = 5;
const BASIC_ITEMS: u8 = 4;
const ROLLOVER_PAIRS: u8 = 20;

pub struct ScenarioSequencer<D: FifoModel, R: FifoModel> {
    dut: D,
    reference: R,
    clock: ClockDriver,
    latency: LatencyChecker,
    coverage: CoverageTracker,
    rng: Xoshiro256PlusPlus,
    stress_cycles: u64,
    mismatches: u64,
    writes: u64,
    reads: u64,
}

impl<D: FifoModel, R: FifoModel> ScenarioSequencer<D, R> {
    pub fn new(dut: D, reference: R, config: SequencerConfig) -> Self {
        let capacity = dut.capacity();
        assert_eq!(capacity, reference.capacity());
        ScenarioSequencer {
            dut,
            reference,
            clock: ClockDriver::new(),
            latency: LatencyChecker::new(config.max_allowed_latency, capacity),
            coverage: CoverageTracker::new(capacity),
            rng: Xoshiro256PlusPlus::seed_from_u64(config.seed),
            stress_cycles: config.stress_cycles,
            mismatches: 0,
            writes: 0,
            reads: 0,
        }
    }

    /// Execute the full scenario list in order and return the run totals.
    pub fn run(&mut self) -> RunSummary {
        self.reset();
        self.basic_write_read();
        self.fill_to_full();
        self.write_while_full();
        self.drain_to_empty();
        self.simultaneous_read_write();
        self.randomized_stress();
        self.rollover_stress();
        self.summary()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            cycles: self.clock.cycle(),
            writes: self.writes,
            reads: self.reads,
            mismatches: self.mismatches,
            latency_violations: self.latency.summary().violations,
            protocol_violations: self.latency.protocol_violations(),
        }
    }

    pub fn latency(&self) -> &LatencyChecker {
        &self.latency
    }

    pub fn coverage(&self) -> &CoverageTracker {
        &self.coverage
    }

    // ---- stimulus plumbing ------------------------------------------------

    fn set_write_enable(&mut self, value: bool) {
        self.dut.set_write_enable(value);
        self.reference.set_write_enable(value);
    }

    fn set_read_enable(&mut self, value: bool) {
        self.dut.set_read_enable(value);
        self.reference.set_read_enable(value);
    }

    fn set_data_in(&mut self, value: u8) {
        self.dut.set_data_in(value);
        self.reference.set_data_in(value);
    }

    fn set_reset_n(&mut self, value: bool) {
        self.dut.set_reset_n(value);
        self.reference.set_reset_n(value);
    }

    fn tick(&mut self) -> u64 {
        self.clock.tick(&mut self.dut, &mut self.reference)
    }

    /// Compare both snapshots for the cycle just driven and feed coverage
    /// with the post-edge state.
    fn compare_and_sample(&mut self, write_enabled: bool, read_enabled: bool) {
        let dut = self.dut.outputs();
        let reference = self.reference.outputs();
        let cycle = self.clock.cycle();
        for mismatch in compare_outputs(cycle, &dut, &reference) {
            println!("  {}", mismatch);
            self.mismatches += 1;
        }
        let capacity = self.dut.capacity();
        for violation in check_flag_invariants(cycle, "dut", &dut, capacity)
            .into_iter()
            .chain(check_flag_invariants(cycle, "ref", &reference, capacity))
        {
            println!("  {}", violation);
            self.mismatches += 1;
        }
        self.coverage.sample(
            dut.empty,
            dut.full,
            dut.occupancy,
            write_enabled,
            read_enabled,
        );
    }

    fn note_read(&mut self, payload: u8, cycle: u64) {
        self.reads += 1;
        let outcome = self.latency.check_read(payload, cycle);
        if !outcome.is_ok() {
            println!("  {}", outcome);
        }
    }

    /// Directed-scenario expectation; a failed check is a finding, counted
    /// with the comparator mismatches.
    fn check(&mut self, ok: bool, what: &str) {
        if !ok {
            println!("  [CHECK FAILED] cycle {}: {}", self.clock.cycle(), what);
            self.mismatches += 1;
        }
    }

    // ---- scenarios, in run order ------------------------------------------

    fn reset(&mut self) {
        println!("[scenario] reset sequence");
        self.set_reset_n(false);
        self.set_write_enable(false);
        self.set_read_enable(false);
        self.set_data_in(0);
        for _ in 0..RESET_CYCLES {
            self.tick();
        }
        self.set_reset_n(true);
        self.compare_and_sample(false, false);
        let out = self.dut.outputs();
        self.check(out.empty && out.occupancy == 0, "post-reset state not empty");
        let out = self.reference.outputs();
        self.check(
            out.empty && out.occupancy == 0,
            "post-reset reference state not empty",
        );
    }

    fn basic_write_read(&mut self) {
        println!("[scenario] basic write/read");
        for payload in 1..=BASIC_ITEMS {
            self.set_write_enable(true);
            self.set_data_in(payload);
            let cycle = self.tick();
            self.latency.record_write(payload, cycle);
            self.writes += 1;
            self.set_write_enable(false);
            self.compare_and_sample(true, false);
            log::debug!("wrote {}, occupancy={}", payload, self.dut.outputs().occupancy);
        }
        for _ in 0..BASIC_ITEMS {
            let payload = self.dut.outputs().data_out;
            self.set_read_enable(true);
            let cycle = self.tick();
            self.note_read(payload, cycle);
            self.set_read_enable(false);
            self.compare_and_sample(false, true);
            log::debug!("read {}, occupancy={}", payload, self.dut.outputs().occupancy);
        }
    }

    fn fill_to_full(&mut self) {
        println!("[scenario] fill to full");
        let attempts = self.dut.capacity() + 2;
        self.set_write_enable(true);
        for i in 0..attempts {
            let payload = 100 + i as u8;
            // A write driven while already full is silently dropped by the
            // circuit, so it must not enter the latency queue. Judged on the
            // pre-edge full flag.
            let was_full = self.dut.outputs().full;
            self.set_data_in(payload);
            let cycle = self.tick();
            if !was_full {
                self.latency.record_write(payload, cycle);
                self.writes += 1;
            }
            self.compare_and_sample(true, false);
        }
        self.set_write_enable(false);
        let out = self.dut.outputs();
        self.check(out.full, "fifo not full after fill");
        self.check(
            out.occupancy == self.dut.capacity(),
            "occupancy exceeded or missed capacity after fill",
        );
    }

    fn write_while_full(&mut self) {
        println!("[scenario] write while full");
        let occupancy_before = self.dut.outputs().occupancy;
        self.set_write_enable(true);
        self.set_data_in(0xFF);
        self.tick();
        self.set_write_enable(false);
        self.compare_and_sample(true, false);
        self.check(
            self.dut.outputs().occupancy == occupancy_before,
            "write while full changed occupancy",
        );
    }

    fn drain_to_empty(&mut self) {
        println!("[scenario] drain to empty");
        self.drain();
        // One extra read attempt against the empty queue; nothing must be
        // treated as read, so the latency checker is not consulted.
        self.set_read_enable(true);
        self.tick();
        self.set_read_enable(false);
        self.compare_and_sample(false, true);
        let out = self.dut.outputs();
        self.check(out.empty, "read while empty cleared the empty flag");
        self.check(out.occupancy == 0, "read while empty changed occupancy");
    }

    fn simultaneous_read_write(&mut self) {
        println!("[scenario] simultaneous read/write");
        for payload in 50..50 + BASIC_ITEMS {
            self.set_write_enable(true);
            self.set_data_in(payload);
            let cycle = self.tick();
            self.latency.record_write(payload, cycle);
            self.writes += 1;
            self.set_write_enable(false);
            self.compare_and_sample(true, false);
        }
        let occupancy_before = self.dut.outputs().occupancy;
        for payload in 60..60 + BASIC_ITEMS {
            let read_payload = self.dut.outputs().data_out;
            self.set_write_enable(true);
            self.set_read_enable(true);
            self.set_data_in(payload);
            let cycle = self.tick();
            self.latency.record_write(payload, cycle);
            self.writes += 1;
            self.note_read(read_payload, cycle);
            self.compare_and_sample(true, true);
            self.check(
                self.dut.outputs().occupancy == occupancy_before,
                "simultaneous read/write changed net occupancy",
            );
        }
        self.set_write_enable(false);
        self.set_read_enable(false);
    }

    fn randomized_stress(&mut self) {
        println!("[scenario] randomized stress ({} cycles)", self.stress_cycles);
        let mismatches_before = self.mismatches;
        for _ in 0..self.stress_cycles {
            let out = self.dut.outputs();
            // Gated: never write into a full queue or read an empty one, so
            // the negative paths stay with the directed scenarios.
            let do_write = self.rng.gen_bool(0.5) && !out.full;
            let do_read = self.rng.gen_bool(0.5) && !out.empty;
            let payload: u8 = self.rng.gen_range(0..=u8::MAX);
            let read_payload = out.data_out;
            self.set_write_enable(do_write);
            self.set_read_enable(do_read);
            self.set_data_in(payload);
            let cycle = self.tick();
            if do_write {
                self.latency.record_write(payload, cycle);
                self.writes += 1;
            }
            if do_read {
                self.note_read(read_payload, cycle);
            }
            self.compare_and_sample(do_write, do_read);
        }
        self.set_write_enable(false);
        self.set_read_enable(false);
        log::info!(
            "randomized stress finished with {} new mismatches",
            self.mismatches - mismatches_before
        );
    }

    fn rollover_stress(&mut self) {
        println!("[scenario] pointer rollover");
        self.drain();
        // Enough write-then-read pairs to walk the internal pointers past
        // the buffer boundary at least twice.
        for payload in 0..ROLLOVER_PAIRS {
            self.set_write_enable(true);
            self.set_data_in(payload);
            let cycle = self.tick();
            self.latency.record_write(payload, cycle);
            self.writes += 1;
            self.set_write_enable(false);

            let read_payload = self.dut.outputs().data_out;
            self.set_read_enable(true);
            let cycle = self.tick();
            self.note_read(read_payload, cycle);
            self.set_read_enable(false);
            self.compare_and_sample(false, true);
        }
        self.coverage.record_rollover();
    }

    /// Read until the design-under-test reports empty. Bounded so a model
    /// whose empty flag never rises cannot hang the run.
    fn drain(&mut self) {
        let bound = self.dut.capacity() + 4;
        for _ in 0..bound {
            if self.dut.outputs().empty {
                return;
            }
            let payload = self.dut.outputs().data_out;
            self.set_read_enable(true);
            let cycle = self.tick();
            self.note_read(payload, cycle);
            self.set_read_enable(false);
            self.compare_and_sample(false, true);
        }
        self.check(
            self.dut.outputs().empty,
            "drain did not reach empty within bound",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReferenceFifo, RtlFifo};
    use pretty_assertions::assert_eq;

    fn sequencer(config: SequencerConfig) -> ScenarioSequencer<RtlFifo, ReferenceFifo> {
        ScenarioSequencer::new(RtlFifo::new(), ReferenceFifo::new(), config)
    }

    #[test]
    fn test_full_run_is_clean_on_equivalent_models() {
        let mut seq = sequencer(SequencerConfig::default());
        let summary = seq.run();
        assert_eq!(summary.mismatches, 0);
        assert_eq!(summary.protocol_violations, 0);
        assert!(summary.writes >= 8 + 8 + 20);
        assert_eq!(seq.coverage().coverage_percent(), 100);
    }

    #[test]
    fn test_directed_scenarios_have_deterministic_totals() {
        let mut seq = sequencer(SequencerConfig {
            seed: 0,
            stress_cycles: 0,
            max_allowed_latency: 40,
        });
        let summary = seq.run();
        assert_eq!(summary.mismatches, 0);
        assert_eq!(summary.latency_violations, 0);
        assert_eq!(summary.protocol_violations, 0);
        // 4 basic + 8 accepted fill + 4 preload + 4 simultaneous + 20 pairs.
        assert_eq!(summary.writes, 40);
        // Every accepted write is eventually read.
        assert_eq!(summary.reads, 40);
        assert_eq!(seq.latency().pending_len(), 0);
        assert!(summary.passed());
    }

    #[test]
    fn test_rollover_flag_requires_running_the_scenario() {
        let seq = sequencer(SequencerConfig::default());
        assert!(seq.coverage().coverage_percent() < 100);
    }
}
