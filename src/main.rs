/*!
 * Scheduling Simulator - Main Entry Point
 *
 * Usage: sched-sim [registry.json]
 *
 * Runs the configured algorithm over the given registry (or the demo
 * registry) either paced to completion or one command at a time, then
 * prints the final state and metrics as JSON.
 */

use cpu_sched_sim::{
    init_tracing, run_paced, shared, Metrics, ProcessRegistry, RunMode, SchedulerState, SimError,
    SimResult, Simulation, SimulationConfig,
};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report<'a> {
    algorithm: &'a str,
    state: &'a SchedulerState,
    metrics: Option<Metrics>,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    init_tracing();

    let config = SimulationConfig::from_env()?;
    let registry = match std::env::args().nth(1) {
        Some(path) => ProcessRegistry::load(path)?,
        None => {
            info!("No registry file given, using demo registry");
            ProcessRegistry::demo()
        }
    };

    info!(
        algorithm = config.algorithm.label(),
        mode = ?config.mode,
        processes = registry.len(),
        "Scheduling simulator starting"
    );

    let simulation = Simulation::from_config(registry, &config)?;
    let simulation = match config.mode {
        RunMode::Run => {
            let handle = shared(simulation);
            run_paced(handle.clone(), config.tick_interval).await?;
            let sim = handle.lock().clone();
            sim
        }
        RunMode::Step => step_interactively(simulation).await?,
    };

    print_report(&simulation)?;
    Ok(())
}

/// Read step commands from stdin until quit or end of input
async fn step_interactively(mut simulation: Simulation) -> SimResult<Simulation> {
    println!("commands: [n]ext, [b]ack, [r]eset, [a]ll, [q]uit");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "" | "n" | "next" => {
                simulation.advance()?;
            }
            "b" | "back" => {
                simulation.retreat();
            }
            "r" | "reset" => {
                simulation.reset()?;
            }
            "a" | "all" => {
                simulation.run_to_completion()?;
            }
            "q" | "quit" => break,
            other => {
                println!("unknown command '{}'", other);
                continue;
            }
        }
        println!("{}", status_line(simulation.state()));
    }

    Ok(simulation)
}

fn status_line(state: &SchedulerState) -> String {
    let running = state
        .running
        .as_ref()
        .map(|p| format!("{}({} left)", p.name, p.remaining_time))
        .unwrap_or_else(|| "idle".to_string());
    let ready: Vec<&str> = state.ready_queue.iter().map(|p| p.name.as_str()).collect();
    let done: Vec<&str> = state.completed.iter().map(|c| c.process.name.as_str()).collect();

    format!(
        "t={} running={} ready=[{}] completed=[{}] switches={}",
        state.current_time,
        running,
        ready.join(", "),
        done.join(", "),
        state.context_switches
    )
}

fn print_report(simulation: &Simulation) -> Result<(), SimError> {
    let report = Report {
        algorithm: simulation.algorithm().as_str(),
        state: simulation.state(),
        metrics: simulation.metrics(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
