use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;

use iogen_core::config::{self, CONFIG_FILE_NAME, IogenConfig};
use iogen_core::grouping::group_paths_by_tag;
use iogen_core::output::write_files;
use iogen_core::parse;
use iogen_core::parse::spec::SwaggerSpec;
use iogen_core::{CodeGenerator, GeneratedFile};
use iogen_iots_client::{IotsClientConfig, IotsClientGenerator};

#[derive(Parser)]
#[command(name = "iogen", about = "Swagger 2.0 to io-ts client generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a client from a Swagger document
    Generate {
        /// Path to the Swagger document (YAML or JSON)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a Swagger document and check that it compiles
    Validate {
        /// Path to the Swagger document
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Initialize a new iogen configuration
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { input, output } => cmd_generate(input, output),

        Commands::Validate { input } => cmd_validate(&input),

        Commands::Init { force } => cmd_init(force),

        Commands::Completions { shell } => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            clap_complete::generate(shell, &mut cmd, "iogen", &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Try to load the project config file from the current directory.
fn try_load_config() -> Result<Option<IogenConfig>> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    let loaded = config::load_config(&config_path)?;
    if loaded.is_some() {
        log::info!("using {}", config_path.display());
    }
    Ok(loaded)
}

fn load_spec(path: &Path) -> Result<SwaggerSpec> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("yaml");

    let parsed = match ext {
        "json" => parse::from_json(&content)?,
        _ => parse::from_yaml(&content)?,
    };
    Ok(parsed)
}

fn generate_files(spec: &SwaggerSpec, cfg: &IogenConfig) -> Result<Vec<GeneratedFile>> {
    let options = IotsClientConfig {
        no_jsdoc: cfg.client.no_jsdoc,
    };
    Ok(IotsClientGenerator.generate(spec, &options)?)
}

/// Generate the "do not edit" README.
fn readme_content() -> &'static str {
    r#"# Generated Code - Do Not Edit

This directory is **auto-generated** by iogen.
Any manual changes will be overwritten the next time `iogen generate` is run.

To regenerate, run:
```
iogen generate
```

To customize the generated output, edit your `.iogen.yaml` configuration file.
"#
}

fn cmd_generate(input: Option<PathBuf>, output: Option<PathBuf>) -> Result<()> {
    let cfg = try_load_config()?.unwrap_or_default();
    let input = input.unwrap_or_else(|| PathBuf::from(&cfg.input));
    let output_dir = output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    let spec = load_spec(&input)?;
    eprintln!("Generating {} → {}", input.display(), output_dir.display());

    let mut files = generate_files(&spec, &cfg)?;
    if cfg.output_options.readme {
        files.push(GeneratedFile {
            path: "README.md".to_string(),
            content: readme_content().to_string(),
        });
    }

    fs::create_dir_all(&output_dir).with_context(|| {
        format!("failed to create output directory {}", output_dir.display())
    })?;
    write_files(&output_dir, &files)
        .with_context(|| format!("failed to write files under {}", output_dir.display()))?;
    for file in &files {
        eprintln!("  wrote {}", output_dir.join(&file.path).display());
    }

    eprintln!("Generated {} files in {}", files.len(), output_dir.display());
    Ok(())
}

fn cmd_validate(input: &Path) -> Result<()> {
    let spec = load_spec(input)?;

    eprintln!("Valid Swagger {} document: {}", spec.swagger, spec.info.title);
    eprintln!("  Version: {}", spec.info.version);
    eprintln!("  Paths: {}", spec.paths.len());
    eprintln!(
        "  Definitions: {}",
        spec.definitions.as_ref().map_or(0, |d| d.len())
    );
    eprintln!("  Controllers: {}", group_paths_by_tag(&spec.paths).len());

    // Also check that the document compiles
    let files = generate_files(&spec, &IogenConfig::default())?;
    eprintln!("  Files: {}", files.len());

    eprintln!("Validation successful.");
    Ok(())
}

fn cmd_init(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, config::default_config_content())?;
    eprintln!("Created {}", config_path.display());
    Ok(())
}
