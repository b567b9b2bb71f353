use anyhow::{Context, Result, ensure};
use clap::Parser;
use game_core::content::keys;
use game_core::types::EquipmentSlot;
use game_core::{BattleResult, NewRunOptions, RunManager, SurvivorState, mapgen};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value_t = 1000)]
    steps: u32,
}

const HERO_POOL: [&str; 6] = [
    keys::HERO_CLERIC,
    keys::HERO_PYROMANCER,
    keys::HERO_FROST_WITCH,
    keys::HERO_IRONGUARD,
    keys::HERO_BONE_REAVER,
    keys::HERO_WOLF_STALKER,
];
const ITEM_POOL: [&str; 4] =
    [keys::ITEM_RUSTY_SWORD, keys::ITEM_CHAIN_MAIL, keys::ITEM_LUCKY_CHARM, keys::ITEM_RUBY_AMULET];
const RELIC_POOL: [&str; 3] =
    [keys::RELIC_WAR_DRUM, keys::RELIC_HEALING_FLASK, keys::RELIC_GOLDEN_IDOL];

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn below(rng: &mut ChaCha8Rng, bound: u64) -> u64 {
    rng.next_u64() % bound
}

fn check_invariants(run: &RunManager) -> Result<()> {
    mapgen::validate_map(run.map()).context("map invariants broken")?;
    ensure!(run.heroes().len() <= run.config().max_roster_size, "roster exceeds limit");
    for hero in run.heroes() {
        let max_hp = run.hero_max_hp(&hero.id).context("roster hero without static data")?;
        ensure!(
            (1..=max_hp).contains(&hero.current_hp),
            "{} hp {} outside 1..={max_hp}",
            hero.id,
            hero.current_hp
        );
        let max_level = run.config().max_level;
        ensure!((1..=max_level).contains(&hero.level), "{} level out of range", hero.id);
        if hero.level == max_level {
            ensure!(hero.exp == 0, "{} holds exp at the level cap", hero.id);
        }
    }
    if let Some(index) = run.current_node() {
        ensure!(index < run.map().len(), "current node {index} outside the map");
    }
    Ok(())
}

fn step(run: &mut RunManager, rng: &mut ChaCha8Rng) {
    match below(rng, 10) {
        0 => run.add_gold(below(rng, 400) as i64 - 200),
        1 => {
            run.spend_gold(below(rng, 150) as u32);
        }
        2 => {
            let _ = run.add_hero(choose(rng, &HERO_POOL));
        }
        3 => {
            let ids: Vec<String> = run.heroes().iter().map(|hero| hero.id.clone()).collect();
            if ids.len() > 1 {
                let _ = run.remove_hero(&choose(rng, &ids));
            }
        }
        4 => run.damage_all_heroes(below(rng, 120) as u32),
        5 => run.heal_all_heroes(below(rng, 120) as u32),
        6 => {
            let mut survivors = Vec::new();
            for hero in run.heroes() {
                if below(rng, 4) != 0 {
                    let current_hp = below(rng, 300) as i32 - 50;
                    survivors.push(SurvivorState { hero_id: hero.id.clone(), current_hp });
                }
            }
            run.apply_battle_result(&BattleResult {
                victory: below(rng, 2) == 0,
                gold_earned: below(rng, 60) as u32,
                exp_earned: below(rng, 400) as u32,
                survivors,
            });
        }
        7 => {
            if let Some(hero) = run.heroes().first().map(|hero| hero.id.clone()) {
                if below(rng, 3) == 0 {
                    let slots =
                        [EquipmentSlot::Weapon, EquipmentSlot::Armor, EquipmentSlot::Accessory];
                    let slot = choose(rng, &slots);
                    let _ = run.unequip_item(&hero, slot);
                } else {
                    let _ = run.equip_item(&hero, choose(rng, &ITEM_POOL));
                }
            }
        }
        8 => {
            let _ = run.add_relic(choose(rng, &RELIC_POOL));
        }
        _ => {
            let choices = run.available_nodes();
            if choices.is_empty() {
                run.generate_map();
            } else {
                if let Some(current) = run.current_node() {
                    let _ = run.mark_node_completed(current);
                }
                let _ = run.move_to_node(choose(rng, &choices));
            }
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting Fuzz harness on seed {} for {} steps...", args.seed, args.steps);
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut run = RunManager::with_defaults();
    run.new_run(NewRunOptions::seeded(args.seed as u32)).context("default roster rejected")?;
    run.generate_map();

    for step_index in 0..args.steps {
        step(&mut run, &mut rng);
        check_invariants(&run)
            .with_context(|| format!("invariant failed after step {step_index}"))?;

        if step_index % 50 == 49 {
            let json = run.serialize().context("serialize failed")?;
            let mut restored = RunManager::with_defaults();
            restored
                .deserialize(&json)
                .with_context(|| format!("restore failed after step {step_index}"))?;
            ensure!(
                restored.snapshot_hash() == run.snapshot_hash(),
                "round trip changed the run after step {step_index}"
            );
        }
    }

    println!("Fuzzing completed successfully. Snapshot Hash: 0x{:016x}", run.snapshot_hash());
    Ok(())
}
