//! # wtp
//!
//! Generates a water treatment plant model from a short prompt and reports
//! where the scene (`.glb`) and solid (`.stl`) files landed.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use plant_engine::{GeneratedModel, GeneratorConfig, PlantGenerator};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "wtp")]
#[command(about = "Parametric 3D models of water treatment plants")]
struct Cli {
    /// Log engine progress to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build and export a plant model
    Generate {
        /// Plant request, e.g. "150 MLD WTP"
        prompt: String,

        /// Directory receiving the exported files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Render the derived unit description instead of the multi-train plant
        #[arg(short, long)]
        description: bool,
    },

    /// Print the unit description derived from a prompt as JSON
    Describe {
        /// Plant request, e.g. "4 filters"
        prompt: String,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn generate(
    prompt: &str,
    output_dir: Option<PathBuf>,
    description: bool,
) -> Result<GeneratedModel> {
    let mut config = GeneratorConfig::default();
    if let Some(dir) = output_dir {
        config.output_dir = dir;
    }
    let generator = PlantGenerator::new(config)?;

    let model = if description {
        generator.generate_from_description(&generator.describe(prompt)?)?
    } else {
        generator.generate(prompt)?
    };

    // Trust the filesystem, not the return value
    if !model.paths.scene.exists() {
        bail!("GLB file not generated");
    }
    Ok(model)
}

fn describe(prompt: &str) -> Result<String> {
    let generator = PlantGenerator::new(GeneratorConfig::default())?;
    Ok(generator.describe(prompt)?.to_json()?)
}

fn run(cli: Cli) -> Result<String> {
    match cli.command {
        Commands::Generate {
            prompt,
            output_dir,
            description,
        } => {
            let model = generate(&prompt, output_dir, description)?;
            Ok(format!(
                "Model generated successfully\nscene: {}\nsolid: {}",
                model.paths.scene.display(),
                model.paths.solid.display()
            ))
        }
        Commands::Describe { prompt } => describe(&prompt),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(report) => {
            println!("{report}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = ?err, "generation failed");
            // Summary only; details go to the log
            println!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("wtp").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_generate() {
        let cli = parse(&["generate", "150 MLD WTP", "--output-dir", "out", "-d"]);
        match cli.command {
            Commands::Generate {
                prompt,
                output_dir,
                description,
            } => {
                assert_eq!(prompt, "150 MLD WTP");
                assert_eq!(output_dir, Some(PathBuf::from("out")));
                assert!(description);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_prompt_required() {
        assert!(Cli::try_parse_from(["wtp", "generate"]).is_err());
    }

    #[test]
    fn test_generate_reports_both_paths() {
        let dir = tempfile::tempdir().unwrap();
        let cli = parse(&[
            "generate",
            "10 MLD WTP",
            "--output-dir",
            dir.path().to_str().unwrap(),
        ]);
        let report = run(cli).unwrap();
        assert!(report.starts_with("Model generated successfully"));
        assert!(report.contains(".glb") && report.contains(".stl"));
    }

    #[test]
    fn test_generate_from_description() {
        let dir = tempfile::tempdir().unwrap();
        let model = generate("a clarifier", Some(dir.path().to_path_buf()), true).unwrap();
        assert!(model.paths.solid.exists());
    }

    #[test]
    fn test_describe_prints_json() {
        let json = describe("cylinder r=5 h=10 at x=0 and box w=3 d=3 h=3 at x=20").unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["type"], "simple_wtp");
        assert_eq!(value["units"].as_array().unwrap().len(), 2);
        assert_eq!(value["connections"][0]["to"], 1);
    }

    #[test]
    fn test_unwritable_output_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let err = generate("10 MLD", Some(blocker), false).unwrap_err();
        assert!(err.to_string().starts_with("I/O error"));
    }
}
