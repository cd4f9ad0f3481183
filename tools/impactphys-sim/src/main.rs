use std::path::PathBuf;
use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use impactphys_core::{hex32, BodyId};
use impactphys_world::{build_scene, load_scenario, ScenarioDesc};

#[derive(Parser, Debug)]
#[command(name = "impactphys-sim", version, about = "Step a sphere scenario headless and report contacts")]
struct Opts {
    /// Scenario JSON (default: built-in showcase)
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, default_value_t = 60)]
    steps: u32,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Print the blake3 state hash after the run
    #[arg(long, action = ArgAction::SetTrue)]
    hash: bool,

    /// Log filter, e.g. "debug" or "impactphys_world=trace". Overrides RUST_LOG.
    #[arg(long)]
    log: Option<String>,

    /// Write the resolved scenario as pretty JSON and exit
    #[arg(long)]
    dump: Option<PathBuf>,
}

fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn main() -> Result<()> {
    let opts = Opts::parse();
    init_logging(opts.log.as_deref());

    if !(opts.dt.is_finite() && opts.dt > 0.0) {
        bail!("--dt must be positive and finite, got {}", opts.dt);
    }

    let desc = match &opts.scenario {
        Some(p) => load_scenario(p)?,
        None => ScenarioDesc::showcase(),
    };

    if let Some(out) = &opts.dump {
        let json = serde_json::to_string_pretty(&desc)?;
        std::fs::write(out, json).with_context(|| format!("write {}", out.display()))?;
        println!("Scenario: {}", out.display());
        return Ok(());
    }

    let mut scene = build_scene(&desc)?;
    info!(bodies = scene.num_bodies(), steps = opts.steps, dt = opts.dt, "scene loaded");

    let mut total_contacts = 0u64;
    for _ in 0..opts.steps {
        let stats = scene.step(opts.dt);
        total_contacts += u64::from(stats.contacts);
        match scene.body(BodyId(0)) {
            Some(b) => println!(
                "tick {:5}  pairs {:3}  contacts {:3}  pos [{:9.4} {:9.4} {:9.4}]  vel [{:9.4} {:9.4} {:9.4}]",
                scene.tick_index(), stats.pairs_tested, stats.contacts,
                b.position.x, b.position.y, b.position.z,
                b.linear_velocity.x, b.linear_velocity.y, b.linear_velocity.z,
            ),
            None => println!("tick {:5}  pairs {:3}  contacts {:3}", scene.tick_index(), stats.pairs_tested, stats.contacts),
        }
    }

    println!("Ticks:    {}", scene.tick_index());
    println!("Contacts: {}", total_contacts);
    println!("Energy:   {:.4}", scene.kinetic_energy());
    if opts.hash {
        println!("Hash:     {}", hex32(&scene.step_hash()));
    }
    Ok(())
}
