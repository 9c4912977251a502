// SPDX-License-Identifier: Apache-2.0

//! Design-under-test counter model. Mirrors the evaluated circuit: the
//! sequential block triggers on a rising clock edge or a falling `rst_n`
//! edge (asynchronous reset), and `count` wraps modulo 256.

use crate::model::{ClockedModel, CounterModel};

pub struct RtlCounter {
    clk: bool,
    rst_n: bool,
    enable: bool,
    prev_clk: bool,
    prev_rst_n: bool,
    count: u8,
}

impl RtlCounter {
    pub fn new() -> Self {
        RtlCounter {
            clk: false,
            rst_n: false,
            enable: false,
            prev_clk: false,
            prev_rst_n: false,
            count: 0,
        }
    }

    fn eval(&mut self) {
        let clk_rose = self.clk && !self.prev_clk;
        let rst_fell = !self.rst_n && self.prev_rst_n;
        self.prev_clk = self.clk;
        self.prev_rst_n = self.rst_n;
        if !(clk_rose || rst_fell) {
            return;
        }
        if !self.rst_n {
            self.count = 0;
        } else if self.enable {
            self.count = self.count.wrapping_add(1);
        }
    }
}

impl ClockedModel for RtlCounter {
    fn clock_high(&mut self) {
        self.clk = true;
        self.eval();
    }

    fn clock_low(&mut self) {
        self.clk = false;
        self.eval();
    }
}

impl CounterModel for RtlCounter {
    fn set_reset_n(&mut self, value: bool) {
        let fell = !value && self.rst_n;
        self.rst_n = value;
        if fell {
            // Asynchronous reset acts as soon as the wire falls.
            self.eval();
        }
    }

    fn set_enable(&mut self, value: bool) {
        self.enable = value;
    }

    fn count(&self) -> u8 {
        self.count
    }
}
