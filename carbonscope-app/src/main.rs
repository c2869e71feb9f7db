use anyhow::{bail, Context, Result};
use carbonscope_core::analysis::{self, DEFAULT_REQUEST_COUNT};
use carbonscope_core::compare;
use carbonscope_core::error::{BatchError, CarbonscopeError};
use carbonscope_core::export::CsvExporter;
use carbonscope_core::loader;
use carbonscope_core::simulation::engine::{DynamicSimulation, TICK_INTERVAL};
use carbonscope_core::simulation::state::DynamicValueState;
use carbonscope_core::wizard::{self, RecordDraft, WizardContext, WizardState};
use carbonscope_schemas::stage::LifecycleStageKey;
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::PathBuf;
use tracing::info;

mod config;
mod plotting;
mod report;

#[derive(Parser)]
#[command(name = "carbonscope", version, about = "Record, compare and export AI service lifecycle CO2 impact")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load record files and print totals and per-unit metrics
    Inspect {
        files: Vec<PathBuf>,
        /// Inference request count used for the per-unit averages
        #[arg(long)]
        request_count: Option<i64>,
    },
    /// Normalize services onto a common 0-100 scale and render charts
    Compare {
        /// YAML compare request with per-service request counts
        #[arg(long, conflicts_with = "files")]
        request: Option<PathBuf>,
        files: Vec<PathBuf>,
        /// Request count applied to every listed file
        #[arg(long)]
        request_count: Option<i64>,
    },
    /// Flatten records to CSV, one row per lifecycle stage
    Export {
        files: Vec<PathBuf>,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Scaffold a new record file by walking the editing wizard steps
    New {
        service_id: String,
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Skip the hardware stages step
        #[arg(long)]
        exclude_hardware: bool,
        #[arg(short, long)]
        output: PathBuf,
    },
    /// Run the dynamic-value simulation for one record
    Simulate {
        file: PathBuf,
        #[arg(long, default_value_t = 10)]
        ticks: u32,
        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carbonscope=info".into()),
        )
        .init();

    println!("--- Carbonscope ---");

    match Cli::parse().command {
        Command::Inspect {
            files,
            request_count,
        } => inspect(&files, request_count),
        Command::Compare {
            request,
            files,
            request_count,
        } => compare_services(request, &files, request_count),
        Command::Export { files, output } => export(&files, &output),
        Command::New {
            service_id,
            name,
            description,
            exclude_hardware,
            output,
        } => new_record(&service_id, &name, &description, exclude_hardware, &output),
        Command::Simulate { file, ticks, seed } => simulate(&file, ticks, seed),
    }
}

fn inspect(files: &[PathBuf], request_count: Option<i64>) -> Result<()> {
    let outcome = config::load_record_files(files);
    if outcome.admitted.is_empty() {
        if let Some(error) = &outcome.error {
            report::print_batch_error(error);
        }
        bail!("No valid records to inspect");
    }

    let empty_state = DynamicValueState::default();
    let requested = request_count.unwrap_or(DEFAULT_REQUEST_COUNT as i64);
    for record in &outcome.admitted {
        let metrics = analysis::service_metrics(record, &empty_state, requested);
        report::print_service_report(&metrics);
    }

    if let Some(error) = &outcome.error {
        report::print_batch_error(error);
    }
    Ok(())
}

fn compare_services(
    request: Option<PathBuf>,
    files: &[PathBuf],
    request_count: Option<i64>,
) -> Result<()> {
    let request = match request {
        Some(path) => config::CompareRequest::load(&path)?,
        None => config::CompareRequest::from_files(files, request_count),
    };
    if request.services.is_empty() {
        bail!("Nothing to compare: no record files given");
    }

    // one bad file never aborts the comparison of the others
    let empty_state = DynamicValueState::default();
    let mut metrics = Vec::new();
    let mut rejected: Vec<(String, CarbonscopeError)> = Vec::new();
    for entry in &request.services {
        let source_name = entry.path.display().to_string();
        let loaded = fs::read_to_string(&entry.path)
            .map_err(|e| CarbonscopeError::FileIO(source_name.clone(), e))
            .and_then(|text| loader::parse_record(&source_name, &text));
        match loaded {
            Ok(record) => metrics.push(analysis::service_metrics(
                &record,
                &empty_state,
                entry.effective_request_count(),
            )),
            Err(error) => rejected.push((source_name, error)),
        }
    }

    if metrics.is_empty() {
        report::print_batch_error(&BatchError { rejected });
        bail!("No valid records to compare");
    }

    let table = compare::normalize(&metrics);
    report::print_radar_table(&table);

    let output_dir = format!(
        "./runs/compare_{}",
        chrono::Utc::now().format("%Y%m%d_%H%M%S")
    );
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;
    plotting::generate_all_plots(&output_dir, &metrics, &table)?;

    if !rejected.is_empty() {
        report::print_batch_error(&BatchError { rejected });
    }
    Ok(())
}

fn export(files: &[PathBuf], output: &PathBuf) -> Result<()> {
    let outcome = config::load_record_files(files);
    if outcome.admitted.is_empty() {
        if let Some(error) = &outcome.error {
            report::print_batch_error(error);
        }
        bail!("No valid records to export");
    }

    let output_path = output.display().to_string();
    let mut exporter = CsvExporter::new(&output_path)?;
    exporter.write_records(&outcome.admitted)?;
    println!(
        "Exported {} service(s), {} rows, to '{}'",
        outcome.admitted.len(),
        outcome.admitted.len() * 10,
        output_path
    );

    if let Some(error) = &outcome.error {
        report::print_batch_error(error);
    }
    Ok(())
}

fn new_record(
    service_id: &str,
    name: &str,
    description: &str,
    exclude_hardware: bool,
    output: &PathBuf,
) -> Result<()> {
    let ctx = WizardContext {
        include_hardware: !exclude_hardware,
    };

    let mut state = WizardState::Entry;
    loop {
        println!("--- Wizard step: {:?} ---", state);
        let following = wizard::next(state, &ctx);
        if following == state {
            break;
        }
        state = following;
    }

    let record = RecordDraft::new(service_id)
        .with_name(name)
        .with_description(description)
        .build()?;
    let json = serde_json::to_string_pretty(&record)?;
    fs::write(output, json)
        .map_err(|e| CarbonscopeError::FileIO(output.display().to_string(), e))?;

    println!(
        "Scaffolded record '{}' with all stages in none mode at {:?}",
        record.service_id, output
    );
    for key in LifecycleStageKey::ALL {
        println!("  {} ({:?})", key.label(), key.category());
    }
    println!("Edit the stage configs, then inspect, compare or export the file.");
    Ok(())
}

fn simulate(file: &PathBuf, ticks: u32, seed: Option<u64>) -> Result<()> {
    let source_name = file.display().to_string();
    let text = fs::read_to_string(file)
        .map_err(|e| CarbonscopeError::FileIO(source_name.clone(), e))?;
    let record = loader::parse_record(&source_name, &text)?;

    let mut simulation = DynamicSimulation::new();
    simulation.bind(&record);
    if simulation.state().is_empty() {
        println!("Record '{}' has no dynamic stages; totals are static.", record.service_id);
    }

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    info!(
        service_id = %record.service_id,
        interval_secs = TICK_INTERVAL.as_secs(),
        "simulating dynamic values"
    );
    println!(
        "--- Simulating {} tick(s) (live interval: every {}s) ---",
        ticks,
        TICK_INTERVAL.as_secs()
    );

    let totals = analysis::aggregate(&record, simulation.state());
    println!("tick 0: grand total {:.4} kg CO2e", totals.grand_total);
    for _ in 0..ticks {
        simulation.tick(&mut rng);
        let totals = analysis::aggregate(&record, simulation.state());
        println!(
            "tick {}: grand total {:.4} kg CO2e (operational {:.4}, embodied {:.4})",
            simulation.ticks(),
            totals.grand_total,
            totals.operational_total,
            totals.embodied_total
        );
    }
    Ok(())
}
