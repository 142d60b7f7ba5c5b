//! Curio - Interactive Shell
//!
//! Loads a scene manifest and lets you drive the examination engine from
//! the terminal: aim at objects, click, drag, go back, and let time pass.

use curio::core::error::Result;
use curio::core::types::{InteractableId, Pose, Seconds};
use curio::interaction::{FrameInput, InteractionController, InteractionEvent};
use curio::ui::HudState;
use curio::world::{load_scene_with_config, Scene};
use clap::Parser;
use glam::Vec2;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Interactive item examination shell
#[derive(Parser, Debug)]
#[command(name = "curio")]
#[command(about = "Aim at objects, examine them, and collect items")]
struct Args {
    /// Scene manifest to load
    #[arg(long, default_value = "data/scenes/study.toml")]
    scene: PathBuf,

    /// Optional config file merged over the manifest's [config] table
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation ticks per second
    #[arg(long, default_value_t = 60)]
    tick_rate: u32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("curio=info")),
        )
        .init();

    let args = Args::parse();
    let loaded = load_scene_with_config(&args.scene, args.config.as_deref())?;
    let eye = loaded.eye;
    let mut scene = loaded.scene;
    let mut controller = InteractionController::new(loaded.config, HudState::new(), loaded.audio);
    let mut viewer = Pose::at(eye);
    let dt: Seconds = 1.0 / args.tick_rate.max(1) as f32;

    println!("\n=== CURIO ===");
    println!("Loaded {} with {} objects", args.scene.display(), scene.len());
    println!();
    println!("Commands:");
    println!("  look <name>     - Turn to face an object");
    println!("  click           - Primary button (examine)");
    println!("  drag <dx> <dy>  - Hold primary and move the pointer (rotate)");
    println!("  back            - Secondary button (finish examining)");
    println!("  wait <secs>     - Let time pass");
    println!("  inv             - Show inventory");
    println!("  status / s      - Show HUD and session state");
    println!("  reset           - Abandon the current session");
    println!("  quit / q        - Exit");
    println!();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit"] | ["q"] => break,
            ["look", name] => match scene.by_name(name) {
                Some(object) => {
                    viewer = Pose::looking_at(eye, object.pose.position);
                    step(&mut controller, &mut scene, &viewer, FrameInput::idle(dt));
                }
                None => println!("Nothing called '{}' here", name),
            },
            ["click"] => step(&mut controller, &mut scene, &viewer, FrameInput::click(dt)),
            ["drag", dx, dy] => match (dx.parse::<f32>(), dy.parse::<f32>()) {
                (Ok(dx), Ok(dy)) => step(
                    &mut controller,
                    &mut scene,
                    &viewer,
                    FrameInput::drag(dt, Vec2::new(dx, dy)),
                ),
                _ => println!("Usage: drag <dx> <dy>"),
            },
            ["back"] => step(&mut controller, &mut scene, &viewer, FrameInput::back(dt)),
            ["wait", secs] => match secs.parse::<f32>() {
                Ok(secs) => {
                    let ticks = (secs / dt).ceil() as u32;
                    for _ in 0..ticks {
                        step(&mut controller, &mut scene, &viewer, FrameInput::idle(dt));
                    }
                    println!("t = {:.2}s", controller.now());
                }
                Err(_) => println!("Usage: wait <secs>"),
            },
            ["inv"] => {
                if controller.inventory().is_empty() {
                    println!("Inventory is empty");
                }
                for (slot, item) in controller.inventory().items().iter().enumerate() {
                    println!("  [{}] {}", slot, item.name);
                }
            }
            ["status"] | ["s"] => display_status(&controller, &scene),
            ["reset"] => {
                if !controller.reset(&mut scene) {
                    println!("Not examining anything");
                }
            }
            _ => println!("Unknown command. Available: look, click, drag, back, wait, inv, status, reset, quit"),
        }
    }

    println!("\nGoodbye! Collected {} item(s).", controller.inventory().len());
    Ok(())
}

/// Run one tick and print what happened
fn step(controller: &mut InteractionController, scene: &mut Scene, viewer: &Pose, input: FrameInput) {
    for event in controller.tick(scene, viewer, &input) {
        println!("  * {}", describe(&event, scene));
    }
}

fn describe(event: &InteractionEvent, scene: &Scene) -> String {
    let name = |id: InteractableId| {
        scene
            .get(id)
            .map(|object| object.name.clone())
            .unwrap_or_else(|| format!("{:?}", id))
    };
    match event {
        InteractionEvent::Interacted { interactable } => format!("used {}", name(*interactable)),
        InteractionEvent::BeginView { interactable, .. } => {
            format!("examining {}", name(*interactable))
        }
        InteractionEvent::Substituted { interactable, rule, .. } => {
            format!("{} changed ({})", name(*interactable), rule)
        }
        InteractionEvent::ItemCollected { interactable, .. } => {
            format!("collected {}", name(*interactable))
        }
        InteractionEvent::FinishView { interactable } => format!("done with {}", name(*interactable)),
    }
}

fn display_status(controller: &InteractionController, scene: &Scene) {
    let hud = controller.hud();
    println!("t = {:.2}s", controller.now());
    match controller.session() {
        Some(session) => {
            println!(
                "Examining {} ({}), can finish: {}",
                session.item.name,
                scene
                    .get(session.interactable)
                    .map(|o| o.name.as_str())
                    .unwrap_or("?"),
                session.can_finish
            );
        }
        None => println!("Looking around"),
    }
    println!("  hand cursor: {}", hud.hand_cursor);
    if !hud.caption.is_empty() {
        println!("  caption: {}", hud.caption);
    }
    if let Some(image) = hud.image {
        println!("  image: {:?}", image);
    }
    if hud.back_visible {
        println!("  [back]");
    }
    for toast in &hud.toasts {
        println!("  note: {}", toast);
    }
    if !controller.animator().is_empty() {
        println!("  {} object(s) in motion", controller.animator().len());
    }
}
