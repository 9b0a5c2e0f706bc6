//! Infinite Jump headless runner
//!
//! Plays runs with a simple autopilot and reports how far it got. The
//! browser build is driven through `platform::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;
    use std::process::ExitCode;

    use clap::Parser;

    use infinite_jump::game::Game;
    use infinite_jump::persistence::{MemoryStore, ProgressStore};
    use infinite_jump::platform::FileStore;
    use infinite_jump::sim::{GameState, RunPhase};
    use infinite_jump::tuning::Tuning;

    #[derive(Parser, Debug)]
    #[command(name = "infinite-jump", about = "Run Infinite Jump headless with an autopilot")]
    struct Args {
        /// RNG seed for level generation
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Number of runs to play
        #[arg(long, default_value_t = 1)]
        runs: u32,
        /// Tick budget per run
        #[arg(long, default_value_t = 36_000)]
        max_ticks: u32,
        /// Frame duration in milliseconds
        #[arg(long, default_value_t = 16.0)]
        dt: f32,
        #[arg(long, default_value_t = 400.0)]
        width: f32,
        #[arg(long, default_value_t = 800.0)]
        height: f32,
        /// JSON file overriding gameplay constants
        #[arg(long)]
        tuning: Option<PathBuf>,
        /// Progress file; without it progress lives in memory only
        #[arg(long)]
        save: Option<PathBuf>,
        /// Do not steer; just bounce in place
        #[arg(long)]
        idle: bool,
    }

    pub fn run() -> ExitCode {
        env_logger::init();
        let args = Args::parse();

        let tuning = match load_tuning(args.tuning.as_ref()) {
            Ok(tuning) => tuning,
            Err(err) => {
                log::error!("{err}");
                return ExitCode::FAILURE;
            }
        };

        match &args.save {
            Some(path) => play(Game::new(FileStore::new(path), tuning, args.seed), &args),
            None => play(Game::new(MemoryStore::new(), tuning, args.seed), &args),
        }
        ExitCode::SUCCESS
    }

    fn load_tuning(path: Option<&PathBuf>) -> Result<Tuning, String> {
        let Some(path) = path else {
            return Ok(Tuning::default());
        };
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("Could not read tuning file {}: {e}", path.display()))?;
        Tuning::from_json(&json).map_err(|e| format!("Bad tuning file {}: {e}", path.display()))
    }

    fn play<S: ProgressStore>(mut game: Game<S>, args: &Args) {
        log::info!(
            "Infinite Jump (native) starting: {} coins, best {:.0} m",
            game.coins(),
            game.high_score()
        );

        for run in 1..=args.runs {
            game.restart(args.width, args.height);
            let mut ticks = 0;
            while game.phase() == RunPhase::Running && ticks < args.max_ticks {
                let (left, right) = if args.idle {
                    (false, false)
                } else {
                    steer(game.state())
                };
                game.set_input(left, right);
                game.tick(args.dt);
                ticks += 1;
            }

            let outcome = match game.last_run() {
                Some(summary) if summary.new_record => "fell (new record)",
                Some(_) => "fell",
                None => "tick budget reached",
            };
            println!(
                "run {run}: {:.0} m, level {}, {} diamonds, {} coins, {} ticks - {outcome}",
                game.score(),
                game.level(),
                game.diamonds_collected(),
                game.coins(),
                ticks
            );
        }
        println!("best: {:.0} m", game.high_score());
    }

    /// Head for the nearest platform below the player while falling, and for
    /// the lowest platform above while rising
    fn steer(state: &GameState) -> (bool, bool) {
        let player = &state.player;
        let feet = player.bottom();
        let center = player.pos.x + player.size.x / 2.0;
        let falling = player.vel.y > 0.0;

        let target = state
            .platforms
            .iter()
            .filter(|p| if falling { p.pos.y >= feet } else { p.pos.y < feet })
            .min_by(|a, b| {
                let da = (a.pos.y - feet).abs();
                let db = (b.pos.y - feet).abs();
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            });

        match target {
            Some(p) => {
                let goal = p.pos.x + p.size.x / 2.0;
                let slack = p.size.x / 4.0;
                (center > goal + slack, center < goal - slack)
            }
            None => (false, false),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library, this is just to satisfy the compiler
}
