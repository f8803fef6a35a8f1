use anyhow::{bail, Context, Result};
use clap::Parser;
use creature_arena::{
    Behavior, GameConfig, GameSession, PlayerAction, ScoringBehavior, TeamBattle, TurnRng,
};
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_TEAM_SIZE: usize = 3;
const MAX_TURNS: u32 = 200;

/// Run auto-played team battles against random opponents.
#[derive(Parser, Debug)]
#[command(name = "creature-arena", version)]
struct Cli {
    /// Settings file (RON). Flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,
    /// RNG seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
    /// Directory with roster.ron / type_chart.json overrides
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// Roster index to bring into battle (repeatable)
    #[arg(long = "team")]
    team: Vec<usize>,
    /// Write the game to this file when done
    #[arg(long)]
    save: Option<PathBuf>,
    /// Start from this save file
    #[arg(long)]
    load: Option<PathBuf>,
    /// Number of battles to play
    #[arg(long, default_value_t = 1)]
    battles: u32,
    /// Debug-level logging
    #[arg(long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::load(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => GameConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if cli.data_dir.is_some() {
        config.data_dir = cli.data_dir.clone();
    }
    Ok(config)
}

/// The player's side picks its best-scoring move, switches when forced and
/// forfeits only when nothing else is possible.
fn choose_action(battle: &TeamBattle, rng: &mut TurnRng, chooser: &ScoringBehavior) -> PlayerAction {
    let valid = battle.valid_actions();
    let attacker = battle.player_team().active();
    let defender = battle.opponent_team().active();

    chooser
        .choose_move(attacker, defender, battle.type_chart(), rng)
        .map(|move_index| PlayerAction::UseMove { move_index })
        .filter(|action| valid.contains(action))
        .or_else(|| {
            valid
                .iter()
                .copied()
                .find(|action| matches!(action, PlayerAction::SwitchCreature { .. }))
        })
        .unwrap_or(PlayerAction::Forfeit)
}

fn play_battle(battle: &mut TeamBattle, rng: &mut TurnRng) -> Result<()> {
    let chooser = ScoringBehavior::new();
    let mut seen = 0;

    while !battle.is_finished() {
        let action = if battle.turn_number() > MAX_TURNS {
            warn!(turns = MAX_TURNS, "battle stalled, forfeiting");
            PlayerAction::Forfeit
        } else {
            choose_action(battle, rng, &chooser)
        };
        battle
            .play_turn(action, rng)
            .with_context(|| format!("{} was rejected", action.name()))?;

        for event in battle.events_since(seen) {
            if let Some(message) = event.format() {
                println!("  {}", message);
            }
        }
        seen = battle.events().len();
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;
    let mut rng = config.rng();
    let mut session = GameSession::from_config(config).context("failed to load game data")?;

    if let Some(path) = &cli.load {
        session
            .load(path)
            .with_context(|| format!("failed to load save {}", path.display()))?;
    }

    let team: Vec<usize> = if cli.team.is_empty() {
        session
            .roster()
            .available_indices()
            .into_iter()
            .take(DEFAULT_TEAM_SIZE)
            .collect()
    } else {
        cli.team.clone()
    };
    if team.is_empty() {
        bail!("no creatures available to battle");
    }

    for round in 1..=cli.battles {
        let mut battle = session
            .start_team_battle(&team, &mut rng)
            .context("failed to start battle")?;
        println!("Battle {}:", round);
        play_battle(&mut battle, &mut rng)?;

        let summary = session
            .finish_team_battle(battle)
            .context("failed to apply battle results")?;
        for message in summary.messages() {
            println!("  {}", message);
        }
        for name in &summary.new_pokedex_entries {
            println!("  {} was added to the Pokedex.", name);
        }
    }

    println!("Roster:");
    for creature in session.roster().all() {
        let lock = if creature.is_locked() { " (locked)" } else { "" };
        println!(
            "  {:<12} L{:<3} XP {}/{}{}",
            creature.name(),
            creature.level(),
            creature.xp(),
            creature.xp_to_next_level(),
            lock
        );
    }
    println!(
        "Pokedex: {} entries, evolutions: {}",
        session.pokedex().len(),
        session.roster().evolution_count()
    );

    if let Some(path) = &cli.save {
        session
            .save(path)
            .with_context(|| format!("failed to save to {}", path.display()))?;
        info!(path = %path.display(), "saved");
        println!("Saved to {}", path.display());
    }
    Ok(())
}
