// SPDX-License-Identifier: Apache-2.0

//! Design-under-test FIFO model in the shape a cycle-evaluation engine
//! produces: input wires, registered state, and an `eval()` that detects the
//! rising clock edge and latches synchronous updates. Outputs are
//! combinational reads of the registers, so the network must be re-settled
//! after the clock falls as well.

use crate::model::{ClockedModel, FifoModel, OutputSnapshot};
use crate::models::FIFO_CAPACITY;

pub struct RtlFifo {
    // Input wires.
    clk: bool,
    rst_n: bool,
    wr_en: bool,
    rd_en: bool,
    data_in: u8,
    prev_clk: bool,
    // Registered state.
    mem: [u8; FIFO_CAPACITY],
    wr_ptr: usize,
    rd_ptr: usize,
    count: usize,
}

impl RtlFifo {
    pub fn new() -> Self {
        RtlFifo {
            clk: false,
            rst_n: false,
            wr_en: false,
            rd_en: false,
            data_in: 0,
            prev_clk: false,
            mem: [0; FIFO_CAPACITY],
            wr_ptr: 0,
            rd_ptr: 0,
            count: 0,
        }
    }

    /// Settle the network for the current input wire values. Synchronous
    /// state changes only on a detected rising clock edge.
    fn eval(&mut self) {
        let rising = self.clk && !self.prev_clk;
        self.prev_clk = self.clk;
        if !rising {
            return;
        }
        if !self.rst_n {
            self.wr_ptr = 0;
            self.rd_ptr = 0;
            self.count = 0;
            return;
        }
        // Accept decisions use the registered occupancy, so a write into a
        // full buffer is dropped even when a read fires the same edge.
        let do_write = self.wr_en && self.count < FIFO_CAPACITY;
        let do_read = self.rd_en && self.count > 0;
        if do_write {
            self.mem[self.wr_ptr] = self.data_in;
            self.wr_ptr = (self.wr_ptr + 1) % FIFO_CAPACITY;
            self.count += 1;
        }
        if do_read {
            self.rd_ptr = (self.rd_ptr + 1) % FIFO_CAPACITY;
            self.count -= 1;
        }
    }
}

impl ClockedModel for RtlFifo {
    fn clock_high(&mut self) {
        self.clk = true;
        self.eval();
    }

    fn clock_low(&mut self) {
        self.clk = false;
        self.eval();
    }
}

impl FifoModel for RtlFifo {
    fn set_reset_n(&mut self, value: bool) {
        self.rst_n = value;
    }

    fn set_write_enable(&mut self, value: bool) {
        self.wr_en = value;
    }

    fn set_read_enable(&mut self, value: bool) {
        self.rd_en = value;
    }

    fn set_data_in(&mut self, value: u8) {
        self.data_in = value;
    }

    fn outputs(&self) -> OutputSnapshot {
        OutputSnapshot {
            // Combinational: whatever the read pointer addresses, stale
            // memory included while empty.
            data_out: self.mem[self.rd_ptr],
            full: self.count == FIFO_CAPACITY,
            empty: self.count == 0,
            occupancy: self.count,
        }
    }

    fn capacity(&self) -> usize {
        FIFO_CAPACITY
    }
}
