// SPDX-License-Identifier: Apache-2.0

use clap::Parser;

use dv_harness::counter_check::run_counter_check;
use dv_harness::models::{ReferenceCounter, ReferenceFifo, RtlCounter, RtlFifo};
use dv_harness::sequencer::{ScenarioSequencer, SequencerConfig};

/// Differential verification of a synchronous FIFO and a bounded counter
/// against their golden models.
#[derive(Parser, Debug)]
struct Args {
    /// Seed for the randomized-stress scenario.
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Cycle budget for the randomized-stress scenario.
    #[arg(long, default_value_t = 100)]
    stress_cycles: u64,

    /// Maximum allowed write-to-read latency in cycles.
    #[arg(long, default_value_t = 40)]
    max_latency: u64,

    /// Cycle budget for the counter differential check.
    #[arg(long, default_value_t = 20)]
    counter_cycles: u64,
}

fn main() {
    let _ = env_logger::builder().try_init();
    let args = Args::parse();

    println!("==============================================");
    println!("  Differential verification harness");
    println!("==============================================");

    println!("\n[circuit] bounded counter ({} cycles)", args.counter_cycles);
    let mut counter_dut = RtlCounter::new();
    let mut counter_ref = ReferenceCounter::new();
    let counter = run_counter_check(&mut counter_dut, &mut counter_ref, args.counter_cycles);
    println!(
        "  counter check: {} cycles, {} mismatches",
        counter.cycles, counter.mismatches
    );

    println!("\n[circuit] synchronous fifo (seed {})", args.seed);
    let config = SequencerConfig {
        seed: args.seed,
        stress_cycles: args.stress_cycles,
        max_allowed_latency: args.max_latency,
    };
    let mut sequencer = ScenarioSequencer::new(RtlFifo::new(), ReferenceFifo::new(), config);
    let summary = sequencer.run();

    println!("\n==============================================");
    println!("           VERIFICATION COMPLETE");
    println!("==============================================");
    println!("\nTotal cycles: {}", summary.cycles);
    println!("Writes completed: {}", summary.writes);
    println!("Reads completed: {}", summary.reads);
    println!("Output mismatches: {}", summary.mismatches);
    println!("Counter mismatches: {}", counter.mismatches);

    println!("\n{}", sequencer.latency());
    println!("\n{}", sequencer.coverage());

    println!("\n========== Final Result ==========");
    let passed = summary.passed() && counter.passed();
    if passed {
        println!("PASSED - All checks passed");
    } else {
        println!(
            "FAILED - {} mismatches, {} latency violations, {} protocol violations, {} counter mismatches",
            summary.mismatches,
            summary.latency_violations,
            summary.protocol_violations,
            counter.mismatches
        );
    }
    std::process::exit(if passed { 0 } else { 1 });
}
