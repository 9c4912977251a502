// SPDX-License-Identifier: Apache-2.0

//! Cycle-accurate differential verification of two independently implemented
//! models of the same synchronous circuit: a continuously-evaluated
//! design-under-test model and an atomically-stepped golden model are driven
//! with identical stimulus and their observable outputs are compared every
//! cycle, alongside write-to-read latency and functional-coverage checks.

pub mod clocking;
pub mod compare;
pub mod counter_check;
pub mod coverage;
pub mod latency;
pub mod model;
pub mod models;
pub mod sequencer;
