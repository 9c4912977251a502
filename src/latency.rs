// SPDX-License-Identifier: Apache-2.0

//! Write-to-read latency tracking.
//!
//! Every accepted write is queued as a pending transaction; every accepted
//! read must match the head of that queue, in order. The queue mirrors the
//! FIFO's own ordering guarantee, so an out-of-order read surfaces here as a
//! payload mismatch rather than going unnoticed.

use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub payload: u8,
    pub write_cycle: u64,
}

/// Running aggregates over matched reads. `min`/`max` are only meaningful
/// once `count > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LatencyStats {
    pub count: u64,
    pub sum: u64,
    pub min: u64,
    pub max: u64,
    pub violations: u64,
}

impl LatencyStats {
    pub fn average(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.sum as f64 / self.count as f64
        }
    }
}

/// Result of checking one observed read against the pending queue.
///
/// `NoPendingWrite` and `PayloadMismatch` are protocol violations: the read
/// stream has desynchronized from the write stream, which is a different
/// defect class from a transaction that merely took too long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    Matched {
        latency: u64,
    },
    NoPendingWrite,
    PayloadMismatch {
        expected: u8,
        got: u8,
    },
    LatencyExceeded {
        payload: u8,
        latency: u64,
        limit: u64,
    },
}

impl ReadOutcome {
    pub fn is_ok(&self) -> bool {
        matches!(self, ReadOutcome::Matched { .. })
    }
}

impl fmt::Display for ReadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReadOutcome::Matched { latency } => write!(f, "matched in {} cycles", latency),
            ReadOutcome::NoPendingWrite => {
                write!(f, "[PROTOCOL] read observed with no pending write")
            }
            ReadOutcome::PayloadMismatch { expected, got } => write!(
                f,
                "[PROTOCOL] payload mismatch: expected {}, got {}",
                expected, got
            ),
            ReadOutcome::LatencyExceeded {
                payload,
                latency,
                limit,
            } => write!(
                f,
                "[LATENCY VIOLATION] payload {} took {} cycles (max: {})",
                payload, latency, limit
            ),
        }
    }
}

pub struct LatencyChecker {
    pending: VecDeque<Transaction>,
    stats: LatencyStats,
    max_allowed_latency: u64,
    capacity: usize,
    protocol_violations: u64,
}

impl LatencyChecker {
    pub fn new(max_allowed_latency: u64, capacity: usize) -> Self {
        LatencyChecker {
            pending: VecDeque::with_capacity(capacity),
            stats: LatencyStats::default(),
            max_allowed_latency,
            capacity,
            protocol_violations: 0,
        }
    }

    /// Record an accepted write. The caller only records writes the circuit
    /// actually accepted, so the pending queue can never outgrow the
    /// modeled capacity.
    pub fn record_write(&mut self, payload: u8, cycle: u64) {
        self.pending.push_back(Transaction {
            payload,
            write_cycle: cycle,
        });
        debug_assert!(self.pending.len() <= self.capacity);
    }

    /// Match an observed read against the head of the pending queue.
    ///
    /// Protocol violations (empty queue, wrong payload) are counted here but
    /// do not touch the latency statistics; an over-threshold latency is a
    /// real observation and is folded into the stats before being flagged.
    pub fn check_read(&mut self, payload: u8, cycle: u64) -> ReadOutcome {
        let Some(t) = self.pending.pop_front() else {
            self.protocol_violations += 1;
            return ReadOutcome::NoPendingWrite;
        };
        if t.payload != payload {
            self.protocol_violations += 1;
            return ReadOutcome::PayloadMismatch {
                expected: t.payload,
                got: payload,
            };
        }
        let latency = cycle - t.write_cycle;
        if self.stats.count == 0 {
            self.stats.min = latency;
            self.stats.max = latency;
        } else {
            self.stats.min = self.stats.min.min(latency);
            self.stats.max = self.stats.max.max(latency);
        }
        self.stats.count += 1;
        self.stats.sum += latency;
        if latency > self.max_allowed_latency {
            self.stats.violations += 1;
            return ReadOutcome::LatencyExceeded {
                payload,
                latency,
                limit: self.max_allowed_latency,
            };
        }
        ReadOutcome::Matched { latency }
    }

    pub fn summary(&self) -> LatencyStats {
        self.stats
    }

    pub fn protocol_violations(&self) -> u64 {
        self.protocol_violations
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn max_allowed_latency(&self) -> u64 {
        self.max_allowed_latency
    }
}

impl fmt::Display for LatencyChecker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "========== Latency Report ==========")?;
        writeln!(f, "Total transactions: {}", self.stats.count)?;
        if self.stats.count > 0 {
            writeln!(f, "Min latency: {} cycles", self.stats.min)?;
            writeln!(f, "Max latency: {} cycles", self.stats.max)?;
            writeln!(f, "Avg latency: {:.2} cycles", self.stats.average())?;
        }
        writeln!(f, "Latency violations: {}", self.stats.violations)?;
        writeln!(f, "Protocol violations: {}", self.protocol_violations)?;
        write!(
            f,
            "Max allowed latency: {} cycles",
            self.max_allowed_latency
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_matched_reads_update_stats_in_order() {
        let mut checker = LatencyChecker::new(20, 8);
        checker.record_write(1, 10);
        checker.record_write(2, 11);
        assert_eq!(checker.check_read(1, 13), ReadOutcome::Matched { latency: 3 });
        assert_eq!(checker.check_read(2, 12), ReadOutcome::Matched { latency: 1 });
        let stats = checker.summary();
        assert_eq!(stats.count, 2);
        assert_eq!(stats.sum, 4);
        assert_eq!(stats.min, 1);
        assert_eq!(stats.max, 3);
        assert_eq!(stats.violations, 0);
        assert_eq!(checker.pending_len(), 0);
    }

    #[test]
    fn test_read_with_no_pending_write_is_protocol_violation() {
        let mut checker = LatencyChecker::new(20, 8);
        assert_eq!(checker.check_read(5, 1), ReadOutcome::NoPendingWrite);
        assert_eq!(checker.protocol_violations(), 1);
        // Statistics untouched.
        assert_eq!(checker.summary(), LatencyStats::default());
    }

    #[test]
    fn test_payload_mismatch_consumes_head_without_stats() {
        let mut checker = LatencyChecker::new(20, 8);
        checker.record_write(7, 0);
        assert_eq!(
            checker.check_read(9, 2),
            ReadOutcome::PayloadMismatch {
                expected: 7,
                got: 9
            }
        );
        assert_eq!(checker.protocol_violations(), 1);
        assert_eq!(checker.summary().count, 0);
        assert_eq!(checker.pending_len(), 0);
    }

    #[test]
    fn test_over_threshold_latency_counts_and_is_flagged_once() {
        let mut checker = LatencyChecker::new(5, 8);
        checker.record_write(3, 0);
        assert_eq!(
            checker.check_read(3, 9),
            ReadOutcome::LatencyExceeded {
                payload: 3,
                latency: 9,
                limit: 5
            }
        );
        let stats = checker.summary();
        assert_eq!(stats.violations, 1);
        // The observation still contributes to the aggregates.
        assert_eq!(stats.count, 1);
        assert_eq!(stats.max, 9);
        assert_eq!(checker.protocol_violations(), 0);
    }

    #[test]
    fn test_average_guards_empty_stats() {
        let checker = LatencyChecker::new(20, 8);
        assert_eq!(checker.summary().average(), 0.0);
    }

    #[test]
    fn test_reordered_reads_surface_as_payload_mismatch() {
        let mut checker = LatencyChecker::new(20, 8);
        checker.record_write(1, 0);
        checker.record_write(2, 1);
        assert!(!checker.check_read(2, 3).is_ok());
    }
}
