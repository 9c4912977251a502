// SPDX-License-Identifier: Apache-2.0

//! Clock-stepping protocol.
//!
//! One `tick` moves both models through the same cycle with the edge
//! ordering the comparison depends on: the design-under-test is evaluated at
//! the rising edge, the reference performs its atomic update, then the
//! design-under-test is re-settled with the clock low. Skipping the falling
//! settle would leave the two models one edge out of phase.

use crate::model::ClockedModel;

pub struct ClockDriver {
    cycle: u64,
}

impl ClockDriver {
    pub fn new() -> Self {
        ClockDriver { cycle: 0 }
    }

    /// Advance both models through one synchronized clock cycle. Returns the
    /// cycle index just completed (1-based). Cannot fail.
    pub fn tick(&mut self, dut: &mut impl ClockedModel, reference: &mut impl ClockedModel) -> u64 {
        dut.clock_high();
        reference.clock_high();
        dut.clock_low();
        reference.clock_low();
        self.cycle += 1;
        self.cycle
    }

    /// Number of cycles driven so far.
    pub fn cycle(&self) -> u64 {
        self.cycle
    }
}
