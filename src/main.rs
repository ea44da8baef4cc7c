//! tomo - documentation EPUB packager

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Deserialize;

use tomo::{DocumentedEntity, PackageConfig, build_epub};

#[derive(Parser)]
#[command(name = "tomo")]
#[command(version, about = "Documentation EPUB packager", long_about = None)]
#[command(after_help = "EXAMPLES:
    tomo docs.json              Build the EPUB described by docs.json
    tomo docs.json -o build     Build into ./build instead of the manifest's output dir")]
struct Cli {
    /// Build manifest (JSON) describing the project and its entities
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,

    /// Output directory (overrides the manifest)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,
}

/// JSON build manifest accepted on the command line.
#[derive(Deserialize)]
struct BuildManifest {
    project: String,
    version: String,
    #[serde(default)]
    output: Option<PathBuf>,
    #[serde(default)]
    logo: Option<PathBuf>,
    #[serde(default)]
    extras: Vec<PathBuf>,
    #[serde(default)]
    deps: HashMap<String, String>,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    entities: Vec<DocumentedEntity>,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), String> {
    let raw = std::fs::read_to_string(&cli.manifest)
        .map_err(|e| format!("{}: {e}", cli.manifest.display()))?;
    let manifest: BuildManifest =
        serde_json::from_str(&raw).map_err(|e| format!("{}: {e}", cli.manifest.display()))?;

    let output = cli
        .output
        .clone()
        .or(manifest.output)
        .unwrap_or_else(|| PathBuf::from("doc"));

    let mut config = PackageConfig::new(manifest.project, manifest.version, output);
    if let Some(logo) = manifest.logo {
        config = config.with_logo(logo);
    }
    if let Some(language) = manifest.language {
        config = config.with_language(language);
    }
    for extra in manifest.extras {
        config = config.with_extra(extra);
    }
    for (name, url) in manifest.deps {
        config = config.with_dep(name, url);
    }

    let archive = build_epub(&manifest.entities, &config).map_err(|e| e.to_string())?;
    if !cli.quiet {
        println!("{}", archive.display());
    }
    Ok(())
}
