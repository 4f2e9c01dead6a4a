use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tt_core::units::pa_to_log10_bar;
use tt_fluids::{CoolPropProvider, EosProvider, backend_name_for_key};
use tt_tables::{FluidTable, GeneratorConfig, TableGenerator, TableStore, TablesResult};

const DEFAULT_OUT_DIR: &str = "assets/tables";

#[derive(Parser)]
#[command(name = "tt-cli")]
#[command(about = "ThermoTables CLI - Offline fluid property table generator", long_about = None)]
struct Cli {
    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate tables for the given fluid keys
    Generate {
        /// Fluid keys (e.g. R-410A R-718); regenerates existing tables if empty
        keys: Vec<String>,
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
        /// YAML generator configuration
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Rebuild index.json from the tables on disk
    Index {
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
    },
    /// Print the backend identifier for fluid keys
    Resolve {
        /// Fluid keys
        #[arg(required = true)]
        keys: Vec<String>,
    },
    /// Validate a stored table and summarize it
    Show {
        /// Fluid key
        key: String,
        /// Output directory
        #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
        out_dir: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Generate {
            keys,
            out_dir,
            config,
        } => cmd_generate(&keys, &out_dir, config.as_deref()),
        Commands::Index { out_dir } => cmd_index(&out_dir),
        Commands::Resolve { keys } => {
            cmd_resolve(&keys);
            Ok(())
        }
        Commands::Show { key, out_dir } => cmd_show(&key, &out_dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn cmd_generate(keys: &[String], out_dir: &Path, config_path: Option<&Path>) -> TablesResult<()> {
    let config = match config_path {
        Some(path) => GeneratorConfig::load_yaml(path)?,
        None => GeneratorConfig::default(),
    };
    let generator = TableGenerator::new(CoolPropProvider::new(), config)?;
    let store = TableStore::new(out_dir);

    let summary = generator.run(keys, &store)?;

    println!(
        "✓ Wrote {} table(s) to {}",
        summary.written.len(),
        out_dir.display()
    );
    for skipped in &summary.skipped {
        println!("  skipped {}: {}", skipped.key, skipped.reason);
    }
    if summary.grid_timing.count() > 0 {
        println!(
            "  grid {:.2} s avg, saturation {:.2} s avg per fluid",
            summary.grid_timing.average_seconds(),
            summary.saturation_timing.average_seconds()
        );
    }
    println!("  index: {} fluid(s)", summary.index.fluids.len());
    Ok(())
}

fn cmd_index(out_dir: &Path) -> TablesResult<()> {
    let store = TableStore::new(out_dir);
    let index = store.write_index()?;
    println!("✓ Indexed {} fluid(s) in {}", index.fluids.len(), store.index_path().display());
    for key in &index.fluids {
        println!("  {key}");
    }
    Ok(())
}

fn cmd_resolve(keys: &[String]) {
    let provider = CoolPropProvider::new();
    for key in keys {
        let backend_name = backend_name_for_key(key);
        println!("{key} -> {}", provider.qualified_name(&backend_name));
    }
}

fn cmd_show(key: &str, out_dir: &Path) -> TablesResult<()> {
    let store = TableStore::new(out_dir);
    let table = store.load_table(key)?;
    table.validate()?;
    print_table_summary(&table);
    Ok(())
}

fn print_table_summary(table: &FluidTable) {
    println!("Table: {} (schema v{})", table.fluid_key, table.schema_version);
    println!("  Backend:      {} ({})", table.backend_id, table.source);
    println!("  Generated by: {}", table.generated_by);
    println!("  T:            {}", table.axes.temperature_k);
    println!("  log10(P/bar): {}", table.axes.log_p_bar);
    println!("  Coverage:     {}", table.coverage());
    for (name, grid) in [
        ("hVap", &table.h_vap),
        ("hLiq", &table.h_liq),
        ("sVap", &table.s_vap),
        ("sLiq", &table.s_liq),
    ] {
        println!(
            "    {name}: {}/{}",
            grid.resolved_count(),
            grid.cell_count()
        );
    }

    match (table.saturation.first(), table.saturation.last()) {
        (Some(low), Some(high)) => println!(
            "  Saturation:   {} levels, log10(P/bar) {:.3} .. {:.3}",
            table.saturation.len(),
            pa_to_log10_bar(low.pressure_pa),
            pa_to_log10_bar(high.pressure_pa)
        ),
        _ => println!("  Saturation:   none"),
    }
    println!(
        "  Two-phase:    {} qualities x {} pressures",
        table.two_phase.quality.len(),
        table.two_phase.column_count()
    );
}
