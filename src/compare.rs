// SPDX-License-Identifier: Apache-2.0

//! Differential comparator: field-by-field diff of the two models' output
//! snapshots after a cycle. Mismatches are findings, not errors; the caller
//! accumulates them and the run always continues.

use std::fmt;

use crate::model::OutputSnapshot;

/// One mismatched output field at one cycle. Values are widened to `u64` so
/// flag and data fields report uniformly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub cycle: u64,
    pub field: &'static str,
    pub dut: u64,
    pub reference: u64,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[MISMATCH] cycle {}: {} - dut={}, ref={}",
            self.cycle, self.field, self.dut, self.reference
        )
    }
}

/// Compare the observable outputs of both models for one cycle.
///
/// `full`, `empty` and `occupancy` are compared unconditionally. `data_out`
/// is compared only when both sides report non-empty: the read port is
/// don't-care while the queue is empty, and diffing it then would only
/// manufacture false positives.
pub fn compare_outputs(
    cycle: u64,
    dut: &OutputSnapshot,
    reference: &OutputSnapshot,
) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();
    if dut.full != reference.full {
        mismatches.push(Mismatch {
            cycle,
            field: "full",
            dut: dut.full as u64,
            reference: reference.full as u64,
        });
    }
    if dut.empty != reference.empty {
        mismatches.push(Mismatch {
            cycle,
            field: "empty",
            dut: dut.empty as u64,
            reference: reference.empty as u64,
        });
    }
    if dut.occupancy != reference.occupancy {
        mismatches.push(Mismatch {
            cycle,
            field: "occupancy",
            dut: dut.occupancy as u64,
            reference: reference.occupancy as u64,
        });
    }
    if !dut.empty && !reference.empty && dut.data_out != reference.data_out {
        mismatches.push(Mismatch {
            cycle,
            field: "data_out",
            dut: dut.data_out as u64,
            reference: reference.data_out as u64,
        });
    }
    mismatches
}

/// Internal consistency of a single model's snapshot, independent of the
/// other side: the status flags must agree with the occupancy, and the
/// occupancy must stay within the buffer bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvariantViolation {
    pub cycle: u64,
    pub side: &'static str,
    pub what: &'static str,
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[INVARIANT] cycle {}: {}: {}",
            self.cycle, self.side, self.what
        )
    }
}

pub fn check_flag_invariants(
    cycle: u64,
    side: &'static str,
    snapshot: &OutputSnapshot,
    capacity: usize,
) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    if snapshot.empty != (snapshot.occupancy == 0) {
        violations.push(InvariantViolation {
            cycle,
            side,
            what: "empty flag disagrees with occupancy",
        });
    }
    if snapshot.full != (snapshot.occupancy == capacity) {
        violations.push(InvariantViolation {
            cycle,
            side,
            what: "full flag disagrees with occupancy",
        });
    }
    if snapshot.occupancy > capacity {
        violations.push(InvariantViolation {
            cycle,
            side,
            what: "occupancy exceeds capacity",
        });
    }
    violations
}
