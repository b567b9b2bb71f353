use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use game_core::{
    ContentPack, Difficulty, MapNode, NewRunOptions, NodeKind, RunConfig, RunManager, SaveFile,
    SeededRng, generate_map,
};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the map a seed generates
    Map {
        #[arg(short, long)]
        seed: u32,
        #[arg(short, long, default_value_t = 1)]
        floor: u32,
        /// Emit the node list as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Start a run, generate its map, and write a save file
    NewRun {
        #[arg(short, long)]
        seed: u32,
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// TOML run config; built-in defaults when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(short, long, default_value = "normal")]
        difficulty: String,
    },
    /// Verify a save file and summarize the run inside it
    Inspect {
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Serialize)]
struct HeroSummary<'a> {
    id: &'a str,
    level: u32,
    exp: u32,
    hp: i32,
    max_hp: i32,
}

#[derive(Serialize)]
struct RunSummary<'a> {
    seed: u32,
    difficulty: &'static str,
    floor: u32,
    gold: u32,
    current_node: Option<usize>,
    nodes: usize,
    completed_nodes: usize,
    heroes: Vec<HeroSummary<'a>>,
    relics: &'a [String],
    active_synergies: Vec<&'static str>,
    snapshot_hash: String,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).compact().init();
}

fn describe(node: &MapNode) -> String {
    match &node.kind {
        NodeKind::Battle(data) | NodeKind::Elite(data) | NodeKind::Boss(data) => {
            let enemies: Vec<String> = data
                .enemies
                .iter()
                .map(|enemy| format!("{}@{}", enemy.enemy_id, enemy.level))
                .collect();
            enemies.join(", ")
        }
        NodeKind::Event(data) => data.event_id.clone(),
        NodeKind::Shop | NodeKind::Rest => String::new(),
    }
}

fn print_map(seed: u32, floor: u32, json: bool) -> Result<()> {
    let content = ContentPack::default();
    let mut rng = SeededRng::new(seed);
    let nodes = generate_map(&content, &mut rng, floor);

    if json {
        println!("{}", serde_json::to_string_pretty(&nodes).context("Failed to encode map")?);
        return Ok(());
    }

    println!("Map for seed {seed}, floor {floor}: {} nodes", nodes.len());
    for node in &nodes {
        println!(
            "{:>3} {:<6} -> {:<12} {}",
            node.index,
            node.node_type().as_str(),
            format!("{:?}", node.connections),
            describe(node)
        );
    }
    Ok(())
}

fn new_run(
    seed: u32,
    out: Option<PathBuf>,
    config: Option<PathBuf>,
    difficulty: &str,
) -> Result<()> {
    let config = match config {
        Some(path) => RunConfig::load(&path)
            .with_context(|| format!("Failed to load run config: {}", path.display()))?,
        None => RunConfig::default(),
    };
    let Some(difficulty) = Difficulty::from_id(difficulty) else {
        bail!("Unknown difficulty '{difficulty}' (expected normal, hard, or hell)");
    };

    let mut run = RunManager::new(ContentPack::default(), config);
    run.new_run(NewRunOptions {
        seed: Some(seed),
        difficulty: Some(difficulty),
        starting_heroes: None,
    })
    .context("Configured starting roster is invalid")?;
    run.generate_map();

    let path = match out.or_else(SaveFile::default_path) {
        Some(path) => path,
        None => bail!("No --out given and no default save directory is available"),
    };
    let save = SaveFile::capture(&run).context("Failed to capture run")?;
    save.write_atomic(&path)
        .with_context(|| format!("Failed to write save file: {}", path.display()))?;

    info!(seed, path = %path.display(), "new run saved");
    println!("New run saved to {}", path.display());
    println!("Snapshot Hash: {}", save.snapshot_hash_hex);
    Ok(())
}

fn inspect(path: PathBuf, json: bool) -> Result<()> {
    let save = SaveFile::load(&path)
        .with_context(|| format!("Failed to load save file: {}", path.display()))?;
    let mut run = RunManager::with_defaults();
    save.restore_into(&mut run).context("Save file does not hold a usable run")?;

    let heroes = run
        .heroes()
        .iter()
        .map(|hero| HeroSummary {
            id: &hero.id,
            level: hero.level,
            exp: hero.exp,
            hp: hero.current_hp,
            max_hp: run.hero_max_hp(&hero.id).unwrap_or(hero.current_hp),
        })
        .collect();
    let summary = RunSummary {
        seed: run.seed(),
        difficulty: run.difficulty().id(),
        floor: run.floor(),
        gold: run.gold(),
        current_node: run.current_node(),
        nodes: run.map().len(),
        completed_nodes: run.map().iter().filter(|node| node.completed).count(),
        heroes,
        relics: run.relics(),
        active_synergies: run
            .synergies()
            .active_synergies()
            .iter()
            .map(|active| active.synergy_id)
            .collect(),
        snapshot_hash: format!("0x{:016x}", run.snapshot_hash()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary).context("Failed to encode summary")?);
        return Ok(());
    }

    println!("Seed: {} ({})", summary.seed, summary.difficulty);
    println!("Floor: {}  Gold: {}", summary.floor, summary.gold);
    match summary.current_node {
        Some(index) => println!("Position: node {index} of {}", summary.nodes),
        None => println!("Position: not yet entered ({} nodes)", summary.nodes),
    }
    println!("Completed nodes: {}", summary.completed_nodes);
    for hero in &summary.heroes {
        println!(
            "  {:<14} Lv{:<2} exp {:<4} hp {}/{}",
            hero.id, hero.level, hero.exp, hero.hp, hero.max_hp
        );
    }
    if !summary.relics.is_empty() {
        println!("Relics: {}", summary.relics.join(", "));
    }
    if !summary.active_synergies.is_empty() {
        println!("Synergies: {}", summary.active_synergies.join(", "));
    }
    println!("Snapshot Hash: {}", summary.snapshot_hash);
    Ok(())
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    match args.command {
        Command::Map { seed, floor, json } => print_map(seed, floor, json),
        Command::NewRun { seed, out, config, difficulty } => {
            new_run(seed, out, config, &difficulty)
        }
        Command::Inspect { path, json } => inspect(path, json),
    }
}
