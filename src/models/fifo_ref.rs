// SPDX-License-Identifier: Apache-2.0

//! Golden FIFO model: an independently written oracle that updates its whole
//! state atomically once per cycle. Deliberately implemented with a deque
//! rather than pointer arithmetic so a pointer-handling defect in the
//! design-under-test cannot be replicated here.

use std::collections::VecDeque;

use crate::model::{ClockedModel, FifoModel, OutputSnapshot};
use crate::models::FIFO_CAPACITY;

pub struct ReferenceFifo {
    rst_n: bool,
    wr_en: bool,
    rd_en: bool,
    data_in: u8,
    queue: VecDeque<u8>,
}

impl ReferenceFifo {
    pub fn new() -> Self {
        ReferenceFifo {
            rst_n: false,
            wr_en: false,
            rd_en: false,
            data_in: 0,
            queue: VecDeque::with_capacity(FIFO_CAPACITY),
        }
    }

    /// Atomic per-cycle update. Acceptance mirrors the registered-state rule
    /// of the circuit: a write needs a free slot at the start of the cycle,
    /// a read needs a buffered item at the start of the cycle.
    fn tick(&mut self) {
        if !self.rst_n {
            self.queue.clear();
            return;
        }
        let do_write = self.wr_en && self.queue.len() < FIFO_CAPACITY;
        let do_read = self.rd_en && !self.queue.is_empty();
        if do_read {
            self.queue.pop_front();
        }
        if do_write {
            self.queue.push_back(self.data_in);
        }
    }
}

impl ClockedModel for ReferenceFifo {
    fn clock_high(&mut self) {
        self.tick();
    }

    // State already updated atomically in `clock_high`; nothing settles on
    // the falling edge.
    fn clock_low(&mut self) {}
}

impl FifoModel for ReferenceFifo {
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
            // Don't-care while empty; 0 is as good as any value since the
            // comparator never looks at it then.
            data_out: self.queue.front().copied().unwrap_or(0),
            full: self.queue.len() == FIFO_CAPACITY,
            empty: self.queue.is_empty(),
            occupancy: self.queue.len(),
        }
    }

    fn capacity(&self) -> usize {
        FIFO_CAPACITY
    }
}
