// SPDX-License-Identifier: Apache-2.0

//! The four circuit models: for each circuit, a continuously-evaluated
//! design-under-test variant (`Rtl*`) and an atomically-stepped golden
//! variant (`Reference*`). The pairs are written independently of each other
//! on purpose; agreement between them is the property under test.

mod counter_ref;
mod counter_rtl;
mod fifo_ref;
mod fifo_rtl;

pub use counter_ref::ReferenceCounter;
pub use counter_rtl::RtlCounter;
pub use fifo_ref::ReferenceFifo;
pub use fifo_rtl::RtlFifo;

/// Buffer depth of both FIFO models.
pub const FIFO_CAPACITY: usize = 8;
