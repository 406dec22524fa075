//! Command-line interface for appstream

#[cfg(feature = "cli")]
use clap::{ArgAction, Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::{Path, PathBuf};

#[cfg(feature = "cli")]
use appstream::markup::{import_description, validate_description};
#[cfg(feature = "cli")]
use appstream::{Component, Store};

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "appstream")]
#[command(author, version, about = "AppStream firmware metadata tool", long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate metainfo files
    Validate {
        /// Metainfo files to check
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Convert plain-text release notes into description markup
    #[command(name = "import-description")]
    ImportDescription {
        /// Plain-text file to convert
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// Build a compressed catalog from metainfo files
    Build {
        /// Catalog origin
        #[arg(long)]
        origin: String,

        /// Output file, e.g. firmware.xml.gz
        #[arg(short, long)]
        output: PathBuf,

        /// Metainfo files to include
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
    },

    /// Show the contents of a catalog
    Dump {
        /// Catalog file (.gz files are decompressed)
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Validate { files } => cmd_validate(&files),
        Commands::ImportDescription { file } => cmd_import_description(&file),
        Commands::Build {
            origin,
            output,
            files,
        } => cmd_build(origin, &output, &files),
        Commands::Dump { catalog, json } => cmd_dump(&catalog, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn load_component(path: &Path) -> Result<Component, Box<dyn std::error::Error>> {
    let xml = fs::read_to_string(path)?;
    Ok(Component::parse(&xml)?)
}

#[cfg(feature = "cli")]
fn cmd_validate(files: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let mut failures = 0;

    for path in files {
        let outcome = load_component(path).and_then(|c| c.validate().map_err(Into::into));
        match outcome {
            Ok(()) => println!("✓ {}", path.display()),
            Err(e) => {
                failures += 1;
                println!("✗ {}: {}", path.display(), e);
            }
        }
    }

    if failures > 0 {
        return Err(format!("{} of {} files failed validation", failures, files.len()).into());
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_import_description(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = fs::read_to_string(file)?;
    let markup = import_description(&text);
    validate_description(&format!("<description>{}</description>", markup))?;
    print!("{}", markup);
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_build(origin: String, output: &Path, files: &[PathBuf]) -> Result<(), Box<dyn std::error::Error>> {
    let mut store = Store::with_origin(origin);

    for path in files {
        let component = load_component(path)?;
        component
            .validate()
            .map_err(|e| format!("{}: {}", path.display(), e))?;
        tracing::info!(file = %path.display(), id = ?component.id, "adding component");
        store.add(component);
    }

    store.to_file(output)?;
    println!("Wrote {} components to {}", store.len(), output.display());
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_dump(catalog: &Path, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = if catalog.extension().map_or(false, |ext| ext == "gz") {
        Store::from_file(catalog)?
    } else {
        Store::parse(&fs::read_to_string(catalog)?)?
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&store)?);
        return Ok(());
    }

    println!("appstream v{}", appstream::VERSION);
    println!();
    println!("Origin: {}", store.origin.as_deref().unwrap_or("(none)"));
    println!("Components: {}", store.len());
    for component in store.components() {
        println!();
        println!("  {}", component.id.as_deref().unwrap_or("(no id)"));
        if let Some(name) = &component.name {
            println!("    Name: {}", name);
        }
        for provide in &component.provides {
            println!("    Provides: {}", provide.value.as_deref().unwrap_or_default());
        }
        for release in &component.releases {
            println!(
                "    Release {} ({})",
                release.version.as_deref().unwrap_or("?"),
                format_timestamp(release.timestamp)
            );
        }
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn format_timestamp(timestamp: i64) -> String {
    use chrono::{TimeZone, Utc};

    match Utc.timestamp_opt(timestamp, 0).single() {
        Some(dt) if timestamp != 0 => dt.format("%Y-%m-%d").to_string(),
        _ => "no date".to_string(),
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
