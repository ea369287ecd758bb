//! Kislinka headless runner
//!
//! Drives the simulation with a scripted input sequence under a fixed
//! timestep, the way a display host would, and prints the final state as JSON.
//!
//! Usage: `kislinka [STAGE] [TUNING.json]`

use std::process::ExitCode;

use kislinka::Tuning;
use kislinka::consts::*;
use kislinka::sim::{
    GameEvent, GamePhase, GameState, TickInput, fire, open_stage_select, resurrect, select_stage,
    spawn_ammo_drop, tick,
};

/// Frames of wall-clock time to simulate (~20 seconds at 60 fps)
const DEMO_FRAMES: u32 = 1200;
/// Simulated display refresh interval
const FRAME_TIME: f32 = 1.0 / 60.0;

/// Host-side loop state
struct Runner {
    state: GameState,
    accumulator: f32,
    frame: u32,
}

impl Runner {
    fn new(state: GameState) -> Self {
        Self {
            state,
            accumulator: 0.0,
            frame: 0,
        }
    }

    /// Scripted intent: run right, hop periodically, aim slightly upward
    fn input_for(&self) -> (TickInput, Option<f32>) {
        let input = TickInput {
            left: false,
            right: true,
            jump: self.frame % 45 == 0,
        };
        let shoot = (self.frame % 12 == 0).then_some(-0.2);
        (input, shoot)
    }

    /// Run simulation ticks for one display frame
    fn update(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let (input, shoot) = self.input_for();
            if let Some(angle) = shoot {
                fire(&mut self.state, angle);
            }
            tick(&mut self.state, &input, SIM_DT);
            self.report();
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        if self.frame % 300 == 0 {
            spawn_ammo_drop(&mut self.state);
        }
        if self.state.run.phase == GamePhase::GameOver {
            resurrect(&mut self.state);
        }
        self.frame += 1;
    }

    fn report(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::StageCleared(i) => log::info!("Cleared stage {}", i + 1),
                GameEvent::Hurt => log::info!("Hurt, health {}", self.state.player.health),
                GameEvent::BossDefeated => log::info!("Boss defeated"),
                other => log::debug!("{:?}", other),
            }
        }
    }
}

fn load_tuning(path: Option<String>) -> Result<Tuning, String> {
    let Some(path) = path else {
        return Ok(Tuning::default());
    };
    let json = std::fs::read_to_string(&path).map_err(|e| format!("{path}: {e}"))?;
    Tuning::from_json(&json).map_err(|e| format!("{path}: {e}"))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Kislinka starting...");

    let mut args = std::env::args().skip(1);
    let stage = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .map(|n| n.saturating_sub(1))
        .unwrap_or(0);

    let tuning = match load_tuning(args.next()) {
        Ok(t) => t,
        Err(e) => {
            log::error!("Bad tuning file: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut state = GameState::with_tuning(0x5EED, tuning);
    open_stage_select(&mut state);
    select_stage(&mut state, stage);

    let mut runner = Runner::new(state);
    for _ in 0..DEMO_FRAMES {
        runner.update(FRAME_TIME);
    }

    let state = &runner.state;
    log::info!(
        "Finished on stage {} in {:?} (health {}, ammo {}{}, {} enemies left)",
        state.run.stage_index + 1,
        state.run.phase,
        state.player.health,
        state.player.ammo,
        if state.infinite_ammo() { ", powered up" } else { "" },
        state.alive_enemies().count()
    );

    match serde_json::to_string_pretty(&state.run) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize run state: {e}");
            ExitCode::FAILURE
        }
    }
}
