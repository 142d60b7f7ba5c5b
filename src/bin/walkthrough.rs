//! Headless Walkthrough
//!
//! Examines every interactable in a scene in id order, waiting out each
//! narration and dismissing each item, then prints the notification log
//! as JSON.

use curio::core::types::{Pose, Seconds};
use curio::interaction::{FrameInput, InteractionController, InteractionEvent};
use curio::ui::HudState;
use curio::world::{load_scene, Scene};
use clap::Parser;
use glam::Vec3;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Headless Walkthrough - examine everything and report what happened
#[derive(Parser, Debug)]
#[command(name = "walkthrough")]
#[command(about = "Examine every object in a scene and print the event log as JSON")]
struct Args {
    /// Scene manifest to load
    #[arg(long, default_value = "data/scenes/study.toml")]
    scene: PathBuf,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,

    /// Give up on an object after this many seconds
    #[arg(long, default_value_t = 30.0)]
    max_wait: f32,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

/// One logged notification
#[derive(Serialize)]
struct LogLine {
    time: Seconds,
    #[serde(flatten)]
    event: InteractionEvent,
}

/// JSON output structure
#[derive(Serialize)]
struct Report {
    scene: String,
    duration: Seconds,
    examined: usize,
    inventory: Vec<String>,
    log: Vec<LogLine>,
}

struct Runner {
    controller: InteractionController,
    scene: Scene,
    eye: Vec3,
    dt: Seconds,
    log: Vec<LogLine>,
}

impl Runner {
    fn step(&mut self, viewer: &Pose, input: FrameInput) -> Vec<InteractionEvent> {
        let events = self.controller.tick(&mut self.scene, viewer, &input);
        let time = self.controller.now();
        self.log.extend(events.iter().cloned().map(|event| LogLine { time, event }));
        events
    }

    /// Let in-flight transitions settle
    fn settle(&mut self, viewer: &Pose, budget: Seconds) {
        let deadline = self.controller.now() + budget;
        while !self.controller.animator().is_empty() && self.controller.now() < deadline {
            self.step(viewer, FrameInput::idle(self.dt));
        }
    }

    /// Examine one object start to finish. Returns false if nothing was examined.
    fn examine(&mut self, target: Vec3, budget: Seconds) -> bool {
        let viewer = Pose::looking_at(self.eye, target);
        self.settle(&viewer, budget);

        let events = self.step(&viewer, FrameInput::click(self.dt));
        if !events
            .iter()
            .any(|e| matches!(e, InteractionEvent::BeginView { .. }))
        {
            return false;
        }

        let deadline = self.controller.now() + budget;
        while self.controller.is_viewing() && self.controller.now() < deadline {
            let ready = self.controller.session().is_some_and(|s| s.can_finish);
            let input = if ready {
                FrameInput::back(self.dt)
            } else {
                FrameInput::idle(self.dt)
            };
            self.step(&viewer, input);
        }

        if self.controller.is_viewing() {
            tracing::warn!("Gave up waiting after {:.1}s", budget);
            self.controller.reset(&mut self.scene);
        }
        self.settle(&viewer, budget);
        true
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("curio=warn")),
        )
        .init();

    let args = Args::parse();
    let loaded = match load_scene(&args.scene) {
        Ok(loaded) => loaded,
        Err(err) => {
            tracing::error!("Failed to load {}: {}", args.scene.display(), err);
            return ExitCode::FAILURE;
        }
    };

    let mut runner = Runner {
        controller: InteractionController::new(loaded.config, HudState::new(), loaded.audio),
        scene: loaded.scene,
        eye: loaded.eye,
        dt: 1.0 / args.tick_rate.max(1) as f32,
        log: Vec::new(),
    };

    let targets: Vec<(String, Vec3)> = runner
        .scene
        .sorted()
        .iter()
        .map(|object| (object.name.clone(), object.pose.position))
        .collect();

    let mut examined = 0;
    for (name, position) in targets {
        if runner.examine(position, args.max_wait) {
            tracing::info!("Examined {}", name);
            examined += 1;
        } else {
            tracing::info!("Nothing to examine on {}", name);
        }
    }

    let report = Report {
        scene: args.scene.display().to_string(),
        duration: runner.controller.now(),
        examined,
        inventory: runner
            .controller
            .inventory()
            .items()
            .iter()
            .map(|item| item.name.clone())
            .collect(),
        log: runner.log,
    };

    let output = if args.pretty {
        serde_json::to_string_pretty(&report)
    } else {
        serde_json::to_string(&report)
    };
    match output {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::error!("Failed to serialize report: {}", err);
            ExitCode::FAILURE
        }
    }
}
