use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use serde::Serialize;
use sketchboard::draw::Element;
use sketchboard::{BoardState, Config, Phase, Toolbox, script};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "sketchboard")]
#[command(version, about = "Hand-drawn style drawing board with undo/redo history")]
struct Cli {
    /// JSON event script to replay against an empty board
    #[arg(long, short = 's', value_name = "FILE")]
    script: Option<PathBuf>,

    /// Write the resulting canvas to a PNG file
    #[arg(long, short = 'e', value_name = "FILE")]
    export: Option<PathBuf>,

    /// Canvas width in pixels for export
    #[arg(long, default_value_t = 800)]
    width: i32,

    /// Canvas height in pixels for export
    #[arg(long, default_value_t = 600)]
    height: i32,

    /// Config file to use instead of ~/.config/sketchboard/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the final board as JSON
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool,
}

#[derive(Serialize)]
struct BoardSummary<'a> {
    phase: Phase,
    cursor: usize,
    history: usize,
    elements: &'a [Element],
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let Some(script_path) = cli.script.as_deref() else {
        println!("sketchboard: Hand-drawn style drawing board");
        println!();
        println!("Usage:");
        println!("  sketchboard --script events.json             Replay events and list elements");
        println!("  sketchboard --script events.json --json      Print the board as JSON");
        println!("  sketchboard --script events.json --export out.png");
        println!("  sketchboard --help                           Show help");
        println!();
        println!("Event script example:");
        println!(r#"  [{{"event": "select_tool", "tool": "line"}},"#);
        println!(r#"   {{"event": "pointer_down", "x": 10, "y": 10}},"#);
        println!(r#"   {{"event": "pointer_move", "x": 50, "y": 50}},"#);
        println!(r#"   {{"event": "pointer_up"}}]"#);
        return Ok(());
    };

    let config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    #[cfg_attr(not(feature = "cairo"), allow(unused_mut))]
    let mut state = BoardState::from_config(&config)?;
    #[cfg(feature = "cairo")]
    state.set_text_measurer(Box::new(sketchboard::draw::PangoTextMeasure));
    let mut toolbox = Toolbox::from_config(&config.toolbox);

    let events = script::load_events(script_path)?;
    let ignored = script::replay(&mut state, &mut toolbox, &events)
        .with_context(|| format!("Failed to replay {}", script_path.display()))?;
    if ignored > 0 {
        log::warn!("{ignored} event(s) had no effect on the board");
    }

    if cli.json {
        let summary = BoardSummary {
            phase: state.phase(),
            cursor: state.cursor(),
            history: state.history().len(),
            elements: state.elements(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        for element in state.elements() {
            println!("{}", describe(element));
        }
        println!(
            "phase: {}, cursor: {}/{}",
            state.phase(),
            state.cursor(),
            state.history().len()
        );
    }

    if let Some(path) = cli.export.as_deref() {
        export(&state, &config, path, cli.width, cli.height)?;
    }

    Ok(())
}

/// One-line summary of an element.
fn describe(element: &Element) -> String {
    let stroke = element
        .stroke()
        .map(|color| color.to_hex())
        .unwrap_or_else(|| "none".to_string());
    let geometry = match element {
        Element::Brush(brush) => format!("{} point(s)", brush.points.len()),
        Element::Text(text) => format!("({}, {}) {:?}", text.x1, text.y1, text.text),
        other => match other.as_shape() {
            Some(shape) => format!(
                "({}, {}) -> ({}, {})",
                shape.x1, shape.y1, shape.x2, shape.y2
            ),
            None => String::new(),
        },
    };
    format!(
        "#{} {} {} stroke={}",
        element.id(),
        element.tool(),
        geometry,
        stroke
    )
}

#[cfg(feature = "cairo")]
fn export(
    state: &BoardState,
    config: &Config,
    path: &std::path::Path,
    width: i32,
    height: i32,
) -> Result<()> {
    sketchboard::draw::export_png(state.elements(), width, height, &config.font(), path)
        .with_context(|| format!("Failed to export {}", path.display()))
}

#[cfg(not(feature = "cairo"))]
fn export(
    _state: &BoardState,
    _config: &Config,
    path: &std::path::Path,
    _width: i32,
    _height: i32,
) -> Result<()> {
    log::error!("Cannot export {}: built without Cairo support", path.display());
    anyhow::bail!("PNG export requires the `cairo` feature")
}
