//! nvcombine - NV04 texture environment dump tool
//!
//! Translates a scene file's texture environments into multitexture triangle
//! combiner methods and prints the resulting push buffer.

mod scene;

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Parser;
use nc_core::{logging, Config};
use nc_debug::{CommandEntry, PushBufDebugger};
use nc_nv04::gl;
use nc_nv04::{emit_tex_envs, CommandBuffer, Context, Engine, TexEnvOutcome};
use serde::Serialize;

use crate::scene::Scene;

#[derive(Parser)]
#[command(name = "nvcombine")]
#[command(about = "Translate GL texture environments into NV04 combiner methods", long_about = None)]
#[command(version)]
struct Cli {
    /// Scene file describing the texture units
    scene: PathBuf,

    /// Configuration file (defaults to the user config directory)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the decoded push buffer as JSON
    #[arg(long)]
    json: bool,

    /// Also write the raw push buffer words, little-endian, to this file
    #[arg(long)]
    raw: Option<PathBuf>,
}

#[derive(Serialize)]
struct UnitReport {
    unit: usize,
    deferred_to_blend: bool,
    alpha: Option<u32>,
    color: Option<u32>,
}

#[derive(Serialize)]
struct Report<'a> {
    units: Vec<UnitReport>,
    commands: &'a [CommandEntry],
}

fn load_config(path: Option<&PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => match Config::load() {
            Ok(config) => Ok(config),
            Err(e) => {
                eprintln!("warning: using default configuration: {}", e);
                Ok(Config::default())
            }
        },
    }
}

fn unit_reports(outcomes: &[TexEnvOutcome]) -> Vec<UnitReport> {
    outcomes
        .iter()
        .enumerate()
        .map(|(unit, outcome)| match *outcome {
            TexEnvOutcome::Emitted { alpha, color } => UnitReport {
                unit,
                deferred_to_blend: false,
                alpha: Some(alpha.bits()),
                color: Some(color.bits()),
            },
            TexEnvOutcome::DeferredToBlend => UnitReport {
                unit,
                deferred_to_blend: true,
                alpha: None,
                color: None,
            },
        })
        .collect()
}

fn print_text(ctx: &Context, outcomes: &[TexEnvOutcome], commands: &[CommandEntry]) {
    for (unit, outcome) in outcomes.iter().enumerate() {
        let state = &ctx.tex_units[unit];
        let mode = gl::enum_name(state.combine.rgb.mode).unwrap_or("?");
        match outcome {
            TexEnvOutcome::Emitted { alpha, color } => {
                println!(
                    "unit {} ({}, rgb {}): alpha 0x{:08X} color 0x{:08X}",
                    unit,
                    if state.enabled { "enabled" } else { "disabled" },
                    mode,
                    alpha.bits(),
                    color.bits()
                );
            }
            TexEnvOutcome::DeferredToBlend => {
                println!("unit {}: no register combiners, deferred to blend state", unit);
            }
        }
    }

    if !commands.is_empty() {
        println!();
    }
    for entry in commands {
        println!(
            "[{}] 0x{:04X} {:<18} 0x{:08X}  {}",
            entry.subchannel, entry.method, entry.method_name, entry.data, entry.description
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_ref())?;
    logging::init(config.debug.log_level);

    tracing::info!("Loading scene {}", cli.scene.display());
    let scene = Scene::load(&cli.scene)?;

    let mut ctx = Context::new(Engine::from_config(&config.hardware));
    scene.apply(&mut ctx)?;

    let mut push = CommandBuffer::new(config.hardware.pushbuf_words);
    push.set_trace(config.debug.trace_pushbuf);

    let outcomes = emit_tex_envs(&mut ctx, &mut push)?;
    let words: Vec<u32> = push.finish().concat();

    let mut debugger = PushBufDebugger::new();
    debugger.decode_stream(&words)?;

    if let Some(path) = &cli.raw {
        let le: Vec<u32> = words.iter().map(|w| w.to_le()).collect();
        std::fs::write(path, bytemuck::cast_slice::<u32, u8>(&le))
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Wrote {} words to {}", words.len(), path.display());
    }

    if cli.json {
        let report = Report {
            units: unit_reports(&outcomes),
            commands: debugger.commands(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_text(&ctx, &outcomes, debugger.commands());
    }

    Ok(())
}
