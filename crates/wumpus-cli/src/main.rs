//! Wumpus CLI.
//!
//! - `wumpus run` - play one randomly generated, seeded world
//! - `wumpus scenario <file>` - play a hand-written JSON world
//! - `wumpus init` - write a default config file

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use wumpus_agent::{Agent, AgentConfig};
use wumpus_core::{derive_seed, SplitMix64};
use wumpus_kb::CellStatus;
use wumpus_sim::{
    run_episode_with, EpisodeReport, MapGenerator, Relocation, Scenario, SimConfig, StepRecord,
    WorldMap, WumpusWorld,
};
use wumpus_tools::Tracer;

const MAP_STREAM: u64 = 0;
const RELOCATION_STREAM: u64 = 1;

#[derive(Parser)]
#[command(name = "wumpus")]
#[command(about = "Knowledge-based wumpus world agent", version)]
struct Cli {
    /// Run config (YAML with `agent:` and `sim:` sections)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a randomly generated world
    Run {
        #[arg(long)]
        seed: Option<u64>,

        /// Grid side length
        #[arg(long)]
        size: Option<u32>,

        #[arg(long)]
        wumpuses: Option<u32>,

        /// Pit probability per cell
        #[arg(long)]
        pits: Option<f64>,

        /// Wumpuses move every `relocation_interval` actions
        #[arg(long)]
        relocation: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Play a world loaded from a JSON scenario file
    Scenario {
        file: PathBuf,

        #[arg(long)]
        relocation: bool,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Write a default config file
    Init {
        #[arg(default_value = "wumpus.yaml")]
        path: PathBuf,
    },
}

#[derive(clap::Args)]
struct OutputArgs {
    /// Print every step
    #[arg(long)]
    steps: bool,

    /// Write the decision trace as JSON
    #[arg(long)]
    trace_out: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct RunConfig {
    agent: AgentConfig,
    sim: SimConfig,
}

impl RunConfig {
    fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        config.agent.validate().context("invalid agent config")?;
        config.sim.validate().context("invalid sim config")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    if cli.log_json {
        fmt().json().with_env_filter(filter).with_target(false).init();
    } else {
        fmt().with_env_filter(filter).with_target(false).init();
    }

    let mut config = RunConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Run {
            seed,
            size,
            wumpuses,
            pits,
            relocation,
            output,
        } => {
            let sim = &mut config.sim;
            sim.seed = seed.unwrap_or(sim.seed);
            sim.size = size.unwrap_or(sim.size);
            sim.wumpus_count = wumpuses.unwrap_or(sim.wumpus_count);
            sim.pit_probability = pits.unwrap_or(sim.pit_probability);
            sim.relocation |= relocation;
            sim.validate().context("invalid run options")?;

            let generator = MapGenerator::new(sim.grid(), sim.wumpus_count, sim.pit_probability);
            let map = generator.generate(&mut SplitMix64::new(derive_seed(sim.seed, MAP_STREAM)));
            tracing::info!(seed = sim.seed, size = sim.size, "generated world");
            play(&config, map, &output)
        }
        Commands::Scenario {
            file,
            relocation,
            output,
        } => {
            let scenario = Scenario::load(&file)
                .with_context(|| format!("failed to load scenario {}", file.display()))?;
            config.sim.relocation |= relocation;
            tracing::info!(scenario = %file.display(), size = scenario.n, "loaded scenario");
            play(&config, scenario.to_map(), &output)
        }
        Commands::Init { path } => init_config(&path),
    }
}

fn play(config: &RunConfig, map: WorldMap, output: &OutputArgs) -> Result<()> {
    let sim = &config.sim;
    let agent_config = AgentConfig {
        relocation: sim.relocation,
        relocation_interval: sim.relocation_interval,
        wumpus_count: map.wumpus_count() as u32,
        ..config.agent.clone()
    };
    agent_config.validate().context("invalid agent config")?;

    println!("World");
    println!("=====");
    print!("{map}");
    println!();

    let tracer = if output.trace_out.is_some() {
        Tracer::recording()
    } else {
        Tracer::disabled()
    };
    let mut agent = Agent::new(map.size(), agent_config).with_tracer(tracer);
    let mut world = WumpusWorld::new(map, sim.scoring);
    if sim.relocation {
        world = world.with_relocation(Relocation::new(
            sim.relocation_interval,
            derive_seed(sim.seed, RELOCATION_STREAM),
        ));
    }

    let report = run_episode_with(&mut world, &mut agent, sim.max_steps, |_, step| {
        if output.steps {
            print_step(step);
        }
    });

    print_report(&report, &agent);

    if let Some(path) = &output.trace_out {
        let log = agent.tracer_mut().take_log().unwrap_or_default();
        let json = serde_json::to_string_pretty(&log).context("failed to encode trace")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write trace {}", path.display()))?;
        println!("Trace: {} events written to {}", log.len(), path.display());
    }
    Ok(())
}

fn print_step(step: &StepRecord) {
    let percepts: Vec<&str> = step.percepts.iter().map(|p| p.as_str()).collect();
    println!(
        "{:>4}  {} {:<5}  [{}]  {:<11} {:>6}  {}",
        step.step,
        step.position,
        format!("{:?}", step.direction),
        percepts.join(","),
        step.action.as_str(),
        step.score,
        step.outcome
    );
}

fn print_report(report: &EpisodeReport, agent: &Agent) {
    println!();
    println!("Known map");
    println!("=========");
    print!("{}", agent.kb_status());
    println!();
    println!("Result: {:?}", report.status);
    println!("Score: {}", report.score);
    println!("Steps: {}", report.steps);
    println!("Final position: {}", report.final_position);
    println!("Has gold: {}", report.has_gold);
    let status = agent.kb_status();
    println!(
        "Cells visited: {}, still unknown: {}",
        status.count(CellStatus::Visited),
        status.count(CellStatus::Unknown)
    );
    if report.truncated {
        println!("Stopped at the step cap.");
    }
    let suspects = agent.knowledge().possible_wumpuses();
    if !suspects.is_empty() {
        let cells: Vec<String> = suspects.iter().map(ToString::to_string).collect();
        println!("Possible wumpuses: {}", cells.join(" "));
    }
}

fn init_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("{} already exists", path.display());
    }
    let yaml = serde_yaml::to_string(&RunConfig::default()).context("failed to encode config")?;
    std::fs::write(path, format!("# Wumpus run configuration\n\n{yaml}"))
        .with_context(|| format!("failed to write {}", path.display()))?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
