use anyhow::{Context, Result, anyhow};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use log::{debug, info, warn};
use stepperblocks::field::{InstanceSelector, OptionsProvider};
use stepperblocks::generator::GenerationPass;
use stepperblocks::model::Workspace;
use stepperblocks::profile::{BoardProfile, PinType, parse_pin_reservation};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Complete Arduino sketch
    Sketch,
    /// Fragments, pin assignments and block warnings as JSON
    Json,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Generate Arduino Stepper code from a block workspace", long_about = None)]
struct Cli {
    /// Workspace JSON file
    #[arg(value_name = "WORKSPACE")]
    workspace: Utf8PathBuf,

    /// Target board (uno, leonardo, mega)
    #[arg(short, long, default_value = "uno")]
    board: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Sketch)]
    format: OutputFormat,

    /// Pre-claim a pin for another peripheral, e.g. `3=SERVO`
    #[arg(long, value_name = "PIN=TYPE", value_parser = parse_pin_reservation)]
    reserve: Vec<(String, PinType)>,

    /// Print the stepper instance dropdown options instead of generating code
    #[arg(long)]
    list_instances: bool,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<Utf8PathBuf>,

    /// Enable debug messages
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins unless -v asks for debug output.
    let mut builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        builder.filter(None, log::LevelFilter::Debug);
    } else if std::env::var_os(env_logger::DEFAULT_FILTER_ENV).is_none() {
        builder.filter(None, log::LevelFilter::Info);
    }
    builder.init();

    let board = BoardProfile::find(&cli.board).ok_or_else(|| {
        let known: Vec<&str> = BoardProfile::all().iter().map(|b| b.name).collect();
        anyhow!("Unknown board {} (known: {})", cli.board, known.join(", "))
    })?;
    let workspace = Workspace::load_from_file(&cli.workspace)?;
    info!(
        "Loaded {} top-level blocks from {}",
        workspace.blocks.len(),
        cli.workspace
    );
    if workspace.is_empty() {
        warn!("Workspace {} contains no blocks", cli.workspace);
    }

    let text = if cli.list_instances {
        let options = InstanceSelector::new(&workspace).options();
        match cli.format {
            OutputFormat::Json => serde_json::to_string_pretty(&options)?,
            OutputFormat::Sketch => options
                .iter()
                .map(|o| format!("{}\n", o.label))
                .collect::<String>(),
        }
    } else {
        let mut pass = GenerationPass::new(board);
        for (pin, pin_type) in &cli.reserve {
            pass.reserve_pin(pin, *pin_type)
                .with_context(|| format!("Failed to reserve pin {} as {}", pin, pin_type))?;
        }
        let report = pass.run(&workspace);
        for id in report.warnings.blocks() {
            if let Some(text) = report.warnings.for_block(id) {
                warn!("{}: {}", id, text);
            }
        }
        for (pin, pin_type) in report.pins.iter() {
            debug!("Pin {} claimed as {}", pin, pin_type);
        }
        match cli.format {
            OutputFormat::Sketch => report.sketch(),
            OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        }
    };

    match cli.output {
        Some(path) => std::fs::write(path.as_std_path(), text)
            .with_context(|| format!("Failed to write {}", path))?,
        None => print!("{}", text),
    }
    Ok(())
}
