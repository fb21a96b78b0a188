use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;

use ferrous_app::{load_toml, logging, App};
use ferrous_editor::{parse_script, EditorApp, EditorSettings};

#[derive(Parser)]
#[command(name = "ferrous_editor")]
#[command(about = "Place objects on a layered grid map and save them", long_about = None)]
struct Cli {
    /// Configuration file; defaults apply when absent
    #[arg(long, default_value = "editor.toml")]
    config: PathBuf,

    /// Command script to run; `-` reads stdin
    #[arg(long, default_value = "-")]
    script: PathBuf,

    /// Overrides `[app.log] level`
    #[arg(long)]
    log_level: Option<String>,
}

fn load_settings(path: &Path) -> anyhow::Result<EditorSettings> {
    if path.exists() {
        load_toml(path)
    } else {
        Ok(EditorSettings::default())
    }
}

fn read_script(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading script from stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings(&cli.config)?;
    if let Some(level) = cli.log_level {
        settings.app.log.level = level;
    }
    logging::init(&settings.app.log)?;

    let events = parse_script(&read_script(&cli.script)?)?;
    // the runner fixes the aspect from the viewport size
    let camera = settings.camera.to_camera(1.0);

    let outcome = App::new(EditorApp::from_settings(&settings))
        .with_config(settings.app.clone())
        .with_camera(camera)
        .run(events);

    for notice in outcome.app.notices() {
        println!("{notice}");
    }
    let editor = outcome.app.editor();
    println!(
        "{} objects placed, {} shown, layer {}",
        editor.store().len(),
        outcome.world.len(),
        editor.state().layer
    );
    Ok(())
}
