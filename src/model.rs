// SPDX-License-Identifier: Apache-2.0

//! Capability contract for a steppable circuit model.
//!
//! The harness never looks inside a model; it sets named input signals, reads
//! an output snapshot, and advances the clock. The two implementations per
//! circuit (design-under-test and golden reference) sit behind the same
//! trait so every call site is written once.

/// Observable outputs of the FIFO, read once per cycle from each model.
///
/// `data_out` is defined only while the FIFO is non-empty; while empty it is
/// whatever the read port happens to show and must not be compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSnapshot {
    pub data_out: u8,
    pub full: bool,
    pub empty: bool,
    pub occupancy: usize,
}

/// One synchronized clock cycle, split into the two phases the driver needs.
///
/// A continuously-evaluated model re-settles its network on both phases; an
/// atomic model performs its whole state update in `clock_high` and treats
/// `clock_low` as a no-op.
pub trait ClockedModel {
    /// Drive the clock wire high and evaluate (rising edge).
    fn clock_high(&mut self);
    /// Drive the clock wire low and evaluate (falling-edge settle).
    fn clock_low(&mut self);
}

/// Input/output contract of the synchronous FIFO under verification.
pub trait FifoModel: ClockedModel {
    /// Reset is active low: `false` asserts reset.
    fn set_reset_n(&mut self, value: bool);
    fn set_write_enable(&mut self, value: bool);
    fn set_read_enable(&mut self, value: bool);
    fn set_data_in(&mut self, value: u8);
    /// Read all observable outputs as of the last evaluation.
    fn outputs(&self) -> OutputSnapshot;
    /// Number of payload slots in the modeled buffer.
    fn capacity(&self) -> usize;
}

/// Input/output contract of the bounded (mod-256) counter.
pub trait CounterModel: ClockedModel {
    /// Reset is active low: `false` asserts reset.
    fn set_reset_n(&mut self, value: bool);
    fn set_enable(&mut self, value: bool);
    fn count(&self) -> u8;
}
