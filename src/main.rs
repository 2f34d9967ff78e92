//! Brickfall entry point
//!
//! Native builds run a headless session driven by the demo autopilot and print
//! a summary. The browser build starts from `brickfall::web` instead.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use anyhow::{Context, Result, anyhow};
    use clap::Parser;
    use serde::Serialize;

    use brickfall::Settings;
    use brickfall::platform::{AudioOut, Renderer, Session, SessionStats};
    use brickfall::sim::{Autopilot, RoundController, Snapshot};

    #[derive(Parser)]
    #[command(name = "brickfall")]
    #[command(about = "Run a headless Brickfall session")]
    struct Args {
        /// Settings JSON file (defaults when omitted)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Host frames to simulate
        #[arg(long, default_value_t = 3600)]
        frames: u64,
        /// Autopilot seed
        #[arg(long, default_value_t = 1)]
        seed: u64,
        /// Stay paused instead of letting the autopilot play
        #[arg(long)]
        no_autoplay: bool,
        /// Log a progress line every N rendered frames (0 = never)
        #[arg(long, default_value_t = 600)]
        report_every: u64,
        /// Print the final summary as JSON
        #[arg(long)]
        json: bool,
    }

    /// Logs progress instead of drawing
    struct LogRenderer {
        every: u64,
        rendered: u64,
    }

    impl Renderer for LogRenderer {
        fn render(&mut self, snapshot: &Snapshot) {
            self.rendered += 1;
            if self.every > 0 && self.rendered % self.every == 0 {
                let standing = snapshot.bricks.iter().filter(|b| b.visible).count();
                log::info!(
                    "level {} | score {} | best {} | bricks {} | {:?}",
                    snapshot.level,
                    snapshot.current.points,
                    snapshot.best.points,
                    standing,
                    snapshot.phase
                );
            }
        }
    }

    #[derive(Default)]
    struct CountingAudio {
        plays: u64,
    }

    impl AudioOut for CountingAudio {
        fn play_wall_hit(&mut self) {
            self.plays += 1;
            log::trace!("wall hit #{}", self.plays);
        }
    }

    #[derive(Serialize)]
    struct Summary {
        seed: u64,
        level: u32,
        score: u64,
        best: u64,
        sounds_played: u64,
        stats: SessionStats,
    }

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args = Args::parse();
        if args.frames == 0 {
            return Err(anyhow!("--frames must be > 0"));
        }

        let settings = match &args.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        log::info!("Brickfall (native) starting, {} frames at {} fps", args.frames, settings.frame_rate);

        let controller = RoundController::new()
            .with_paddle_cadence(settings.paddle_step, settings.paddle_interval());
        let renderer = LogRenderer {
            every: args.report_every,
            rendered: 0,
        };
        let mut session =
            Session::new(controller, renderer, CountingAudio::default(), settings.keys.clone());

        let mut pilot = (!args.no_autoplay).then(|| Autopilot::new(args.seed));
        let dt = settings.frame_duration();

        for _ in 0..args.frames {
            if let Some(command) = pilot.as_mut().and_then(|p| p.decide(session.controller())) {
                session.send(command);
            }
            session.frame(dt);
        }

        let round = session.controller().round();
        let summary = Summary {
            seed: args.seed,
            level: round.level,
            score: round.score_current.points,
            best: round.score_best.points,
            sounds_played: session.audio().plays,
            stats: session.stats().clone(),
        };

        if args.json {
            let json = serde_json::to_string_pretty(&summary).context("failed to encode summary")?;
            println!("{json}");
        } else {
            println!();
            println!("=== SESSION ===");
            println!("  Frames:         {}", summary.stats.frames);
            println!("  Ticks:          {}", summary.stats.ticks);
            println!("  Level:          {}", summary.level);
            println!("  Score:          {}", summary.score);
            println!("  Best:           {}", summary.best);
            println!("  Levels cleared: {}", summary.stats.levels_cleared);
            println!("  Rounds failed:  {}", summary.stats.rounds_failed);
            println!("  Wall sounds:    {}", summary.sounds_played);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    native::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is brickfall::web::start, this is just to satisfy the compiler
}
