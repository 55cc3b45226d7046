use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use color_eyre::Result;
use color_eyre::eyre::Context;
use deadlock_sim::allocation::{Simulator, SimulatorError};
use deadlock_sim::config::Config;
use deadlock_sim::logging;
use log::warn;

/// Resource-allocation graph simulator: deadlock detection and Banker's algorithm.
///
/// Reads one command per line from a script or stdin, for example
/// `add-process P1 0 5`, `add-resource R1 1`, `request P1 R1`, `detect`.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// TOML config file with naming and logging settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Script to run instead of reading stdin.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Stop at the first rejected command.
    #[arg(long)]
    strict: bool,
}

/// One command line of a script.
#[derive(Clone, Debug, Parser)]
#[command(no_binary_name = true, disable_help_flag = true, disable_version_flag = true)]
struct Line {
    #[command(subcommand)]
    op: Op,
}

#[derive(Clone, Debug, Subcommand)]
enum Op {
    /// Add a process node.
    AddProcess {
        name: String,
        #[arg(allow_hyphen_values = true)]
        arrival: String,
        #[arg(allow_hyphen_values = true)]
        burst: String,
    },
    /// Add a resource node.
    AddResource {
        name: String,
        #[arg(allow_hyphen_values = true)]
        instances: String,
    },
    /// Overwrite a resource's instance count, then re-run deadlock detection.
    SetInstances {
        name: String,
        #[arg(allow_hyphen_values = true)]
        instances: String,
        /// Skip the deadlock check after the update.
        #[arg(long)]
        no_recheck: bool,
    },
    /// Add a request edge, process -> resource.
    Request { process: String, resource: String },
    /// Add an assignment edge, resource -> process.
    Assign { resource: String, process: String },
    /// Look for a cycle.
    Detect,
    /// Print allocation, request, max and need matrices and the available vector.
    Matrices,
    /// Run Banker's safety algorithm.
    Bankers,
    /// List nodes in creation order.
    Nodes,
    /// List edges in creation order.
    Edges,
    /// Clear every node and edge.
    Reset,
    /// Stop reading commands.
    Quit,
}

enum Flow {
    Continue,
    Quit,
}

// exit status when any line was rejected
const REJECTED: u8 = 2;

fn main() -> Result<ExitCode> {
    // enable fancy `color_eyre` error messages
    color_eyre::install()?;

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => Config::load(path).context("Can not load config")?,
        None => Config::default(),
    };
    logging::enable_logforth(&config.logging.filter);

    let input: Box<dyn BufRead> = match &args.script {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Can not open script {path:?}"))?,
        )),
        None => Box::new(BufReader::new(std::io::stdin())),
    };

    let mut sim = Simulator::new(config.naming);
    let mut rejected = 0;
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() || words[0].starts_with('#') {
            continue;
        }
        let op = match Line::try_parse_from(words) {
            Ok(parsed) => parsed.op,
            Err(err) => {
                println!("line {}: {}", number + 1, err.render().to_string().trim_end());
                rejected += 1;
                if args.strict {
                    break;
                }
                continue;
            }
        };
        match run(&mut sim, op) {
            Ok(Flow::Continue) => {}
            Ok(Flow::Quit) => break,
            Err(err) if err.is_validation() => {
                println!("line {}: Error: {err}", number + 1);
                rejected += 1;
                if args.strict {
                    break;
                }
            }
            Err(err) => return Err(err).context(format!("line {}", number + 1)),
        }
    }

    if rejected > 0 {
        warn!("{rejected} command(s) rejected");
        return Ok(ExitCode::from(REJECTED));
    }
    Ok(ExitCode::SUCCESS)
}

fn run(sim: &mut Simulator, op: Op) -> std::result::Result<Flow, SimulatorError> {
    match op {
        Op::AddProcess { name, arrival, burst } => {
            sim.add_process(&name, &arrival, &burst)?;
        }
        Op::AddResource { name, instances } => {
            sim.add_resource(&name, &instances)?;
        }
        Op::SetInstances { name, instances, no_recheck } => {
            sim.set_resource_instances(&name, &instances)?;
            if !no_recheck {
                println!("{}", sim.check_deadlock());
            }
        }
        Op::Request { process, resource } => {
            sim.add_request_edge(&process, &resource)?;
        }
        Op::Assign { resource, process } => {
            sim.add_assignment_edge(&resource, &process)?;
        }
        Op::Detect => println!("{}", sim.check_deadlock()),
        Op::Matrices => println!("{}", sim.matrices()?),
        Op::Bankers => println!("{}", sim.bankers()?),
        Op::Nodes => {
            for node in sim.graph().nodes() {
                println!("{node}");
            }
        }
        Op::Edges => {
            let graph = sim.graph();
            for edge in graph.edges() {
                let name = |id| graph.node_by_id(id).map(|n| n.name()).unwrap_or("?");
                println!("{} -> {} ({})", name(edge.from), name(edge.to), edge.kind);
            }
        }
        Op::Reset => sim.reset(),
        Op::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
