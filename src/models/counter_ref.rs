// SPDX-License-Identifier: Apache-2.0

//! Golden counter model: atomic per-cycle step function.

use crate::model::{ClockedModel, CounterModel};

pub struct ReferenceCounter {
    rst_n: bool,
    enable: bool,
    count: u8,
}

impl ReferenceCounter {
    pub fn new() -> Self {
        ReferenceCounter {
            rst_n: false,
            enable: false,
            count: 0,
        }
    }
}

impl ClockedModel for ReferenceCounter {
    fn clock_high(&mut self) {
        if !self.rst_n {
            self.count = 0;
        } else if self.enable {
            self.count = self.count.wrapping_add(1);
        }
    }

    fn clock_low(&mut self) {}
}

impl CounterModel for ReferenceCounter {
    fn set_reset_n(&mut self, value: bool) {
        self.rst_n = value;
        if !value {
            self.count = 0;
        }
    }

    fn set_enable(&mut self, value: bool) {
        self.enable = value;
    }

    fn count(&self) -> u8 {
        self.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reset_dominates_enable() {
        let mut counter = ReferenceCounter::new();
        counter.set_reset_n(true);
        counter.set_enable(true);
        counter.clock_high();
        counter.clock_low();
        assert_eq!(counter.count(), 1);
        counter.set_reset_n(false);
        counter.clock_high();
        counter.clock_low();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_wraps_modulo_256() {
        let mut counter = ReferenceCounter::new();
        counter.set_reset_n(true);
        counter.set_enable(true);
        for _ in 0..300 {
            counter.clock_high();
            counter.clock_low();
        }
        assert_eq!(counter.count(), 44);
    }
}
