/*!
 * Memory Simulator - Demonstration Driver
 *
 * Builds a next-fit manager, feeds it a sample workload and prints the
 * memory map after each step.
 */

use memsim::core::limits::DEMO_MEMORY_POOL;
use memsim::monitoring::span_operation;
use memsim::{init_tracing, ManagerConfig, MemoryInfo, MemoryManager, NextFit};
use miette::{IntoDiagnostic, Result};
use tracing::info;

fn print_map(title: &str, manager: &MemoryManager) {
    println!("\n{}", title);
    for line in manager.memory_map() {
        println!("  {}", line);
    }
}

fn main() -> Result<()> {
    init_tracing();

    let config = ManagerConfig::from_env(DEMO_MEMORY_POOL)?;
    info!(capacity = config.capacity, "Memory simulator starting");
    let mut manager = MemoryManager::with_config(config, NextFit::new())?;

    print_map("Initial Memory Map (Next Fit):", &manager);

    for (pid, size) in [(1, 30), (2, 20), (3, 10)] {
        let span = span_operation("allocate", pid);
        let result = manager.allocate(pid, size);
        span.record_result(result.is_ok());
        result?;
    }
    print_map("Memory Map after allocations (Next Fit):", &manager);

    manager.deallocate(2);
    print_map("Memory Map after deallocating process 2 (Next Fit):", &manager);

    manager.allocate(4, 15)?;
    print_map("Memory Map after allocating process 4 (Next Fit):", &manager);

    for (pid, size) in [(1, 10), (3, 25), (4, 60)] {
        let span = span_operation("resize", pid);
        match manager.resize(pid, size) {
            Ok(outcome) => {
                span.record_result(true);
                println!("\nResize PID {} to {} bytes: {:?}", pid, size, outcome);
                if let Some(to) = outcome.new_address() {
                    println!("  PID {} now starts at {}", pid, to);
                }
            }
            Err(err) => {
                span.record_result(false);
                println!("\nResize PID {} to {} bytes failed: {}", pid, size, err);
            }
        }
    }
    print_map("Memory Map after resizes (Next Fit):", &manager);

    let stats = manager.stats();
    println!(
        "\nPressure: {}\n{}",
        manager.pressure(),
        serde_json::to_string_pretty(&stats).into_diagnostic()?
    );

    Ok(())
}
