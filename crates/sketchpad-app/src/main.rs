//! Headless sketchpad: replay a UI action script and export the result.

use anyhow::{Context, Result};
use clap::Parser;
use sketchpad_app::{Script, ShortcutRegistry, SketchpadApp};
use sketchpad_core::SketchpadConfig;
use std::path::PathBuf;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "sketchpad")]
#[command(about = "Replay a sketchpad action script and export it as PNG")]
#[command(version)]
struct Cli {
    /// JSON array of UI actions
    #[arg(required_unless_present = "list_shortcuts")]
    script: Option<PathBuf>,

    /// Output PNG path
    #[arg(short, long, value_name = "PATH", default_value = "sketchpad.png")]
    output: PathBuf,

    /// JSON config file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Font for glyphs (overrides `glyph_font` in the config)
    #[arg(short, long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Print keyboard shortcuts and exit
    #[arg(long)]
    list_shortcuts: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list_shortcuts {
        ShortcutRegistry::print_all();
        return Ok(());
    }

    let config = match &cli.config {
        Some(path) => SketchpadConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SketchpadConfig::default(),
    };

    let font = match cli.font.as_ref().or(config.glyph_font.as_ref()) {
        Some(path) => Some(
            sketchpad_render::load_font(path)
                .with_context(|| format!("loading font {}", path.display()))?,
        ),
        None => None,
    };

    let Some(script_path) = cli.script else {
        anyhow::bail!("no script given");
    };
    let script = Script::load(&script_path)
        .with_context(|| format!("loading script {}", script_path.display()))?;

    log::info!("Starting sketchpad replay of {} actions", script.actions.len());
    let mut app = SketchpadApp::new(config, font);
    script.replay(&mut app)?;

    let export = app.export()?;
    export
        .save(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    Ok(())
}
