mod config;

use std::path::{Path, PathBuf};

use anyhow::{bail, ensure, Context, Result};
use clap::{Args, Parser, Subcommand};
use spymaster_circuit::Message;
use spymaster_common::{read_json, read_key_manifest, write_json, write_key_manifest};
use spymaster_contract::{JsonFileStore, SettlementContract, SettlementReceipt};
use spymaster_prover::{
    Attestation, AttestationKey, ChainBuilder, KeyedTranscriptSystem, ProgramInfo, ProvingSystem,
    StepProgram, StepRecord,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ToolsConfig;

const DEFAULT_ATTESTATION_PATH: &str = "attestation.json";

#[derive(Parser)]
#[command(
    name = "spymaster",
    about = "Fold agent messages into attestations and settle them"
)]
struct Cli {
    /// Key manifest path (overrides SPYMASTER_KEY_PATH).
    #[arg(long, global = true)]
    key: Option<PathBuf>,
    /// Settlement state path (overrides SPYMASTER_STATE_PATH).
    #[arg(long, global = true)]
    state: Option<PathBuf>,
    /// Program name (overrides SPYMASTER_PROGRAM_NAME).
    #[arg(long, global = true)]
    program: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an attestation key and write its manifest.
    Keygen(KeygenArgs),
    /// Fold a JSON array of messages into an attestation.
    Prove(ProveArgs),
    /// Check an attestation against the configured key.
    Verify(AttestationArgs),
    /// Settle an attestation into the contract state.
    Settle(AttestationArgs),
    /// Print the contract state.
    State(StateArgs),
    /// Print the step circuit shape and program id.
    CircuitInfo,
}

#[derive(Args)]
struct KeygenArgs {
    /// Overwrite an existing key manifest.
    #[arg(long)]
    force: bool,
}

#[derive(Args)]
struct ProveArgs {
    /// JSON file holding an array of messages.
    #[arg(long)]
    messages: PathBuf,
    /// Where to write the resulting attestation.
    #[arg(long, default_value = DEFAULT_ATTESTATION_PATH)]
    output: PathBuf,
    /// Seed the chain with a verifiable zero-output attestation.
    #[arg(long, conflicts_with = "resume")]
    bootstrap: bool,
    /// Continue from a previously written attestation.
    #[arg(long)]
    resume: Option<PathBuf>,
}

#[derive(Args)]
struct AttestationArgs {
    #[arg(long, default_value = DEFAULT_ATTESTATION_PATH)]
    attestation: PathBuf,
}

#[derive(Args)]
struct StateArgs {
    /// Print app-state slots instead of the stored record.
    #[arg(long)]
    app_state: bool,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spymaster=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = ToolsConfig::from_env()?;
    if let Some(key) = cli.key {
        config.key_path = key;
    }
    if let Some(state) = cli.state {
        config.state_path = state;
    }
    if let Some(program) = cli.program {
        config.program_name = program;
    }

    match cli.command {
        Commands::Keygen(args) => {
            keygen(&config, args.force)?;
            println!("Wrote key manifest to {}", config.key_path.display());
        }
        Commands::Prove(args) => {
            let (tip, records) = prove(
                &config,
                &args.messages,
                args.bootstrap,
                args.resume.as_deref(),
            )?;
            print_records(&records);
            write_json(&args.output, &tip)?;
            println!(
                "Highest message number {} after {} step(s); attestation written to {}",
                tip.output(),
                tip.depth(),
                args.output.display()
            );
        }
        Commands::Verify(args) => {
            let attestation: Attestation = read_json(&args.attestation)?;
            let system = load_system(&config)?;
            ensure!(
                system.verify(&attestation),
                "attestation {} does not verify",
                args.attestation.display()
            );
            println!(
                "Attestation verifies: output {} at depth {}",
                attestation.output(),
                attestation.depth()
            );
        }
        Commands::Settle(args) => {
            let receipt = settle(&config, &args.attestation)?;
            println!("{}", serde_json::to_string_pretty(&receipt)?);
        }
        Commands::State(args) => {
            let system = load_system(&config)?;
            let contract =
                SettlementContract::deploy(system, JsonFileStore::new(&config.state_path))?;
            let json = if args.app_state {
                serde_json::to_string_pretty(&contract.app_state())?
            } else {
                serde_json::to_string_pretty(contract.state())?
            };
            println!("{json}");
        }
        Commands::CircuitInfo => {
            let info = ProgramInfo::compile(config.program_name.as_str())?;
            println!("{}", serde_json::to_string_pretty(&info)?);
            println!("Constraints: {}", info.shape.constraints());
        }
    }

    Ok(())
}

fn keygen(config: &ToolsConfig, force: bool) -> Result<()> {
    if config.key_path.exists() && !force {
        bail!(
            "{} already exists; pass --force to overwrite",
            config.key_path.display()
        );
    }
    let key = AttestationKey::random();
    write_key_manifest(&config.key_path, &key.to_manifest(&config.program_name))?;
    info!(path = %config.key_path.display(), "generated attestation key");
    Ok(())
}

fn load_system(config: &ToolsConfig) -> Result<KeyedTranscriptSystem> {
    let manifest = read_key_manifest(&config.key_path)
        .with_context(|| format!("failed to load key from {}", config.key_path.display()))?;
    ensure!(
        manifest.program == config.program_name,
        "key was generated for program {:?}, not {:?}",
        manifest.program,
        config.program_name
    );
    let key = AttestationKey::from_manifest(&manifest)?;
    let program = ProgramInfo::compile(config.program_name.as_str())?;
    Ok(KeyedTranscriptSystem::new(key, program))
}

fn prove(
    config: &ToolsConfig,
    messages_path: &Path,
    bootstrap: bool,
    resume: Option<&Path>,
) -> Result<(Attestation, Vec<StepRecord>)> {
    let messages: Vec<Message> = read_json(messages_path)?;
    let program = StepProgram::new(load_system(config)?);

    let chain = match resume {
        Some(path) => {
            let tip: Attestation = read_json(path)?;
            ChainBuilder::resume(&program, tip)
                .with_context(|| format!("cannot resume from {}", path.display()))?
        }
        None if bootstrap => ChainBuilder::bootstrapped(&program)?,
        None => ChainBuilder::new(&program),
    };
    let chain = chain.extend(messages)?;
    Ok(chain.into_parts())
}

fn settle(config: &ToolsConfig, attestation_path: &Path) -> Result<SettlementReceipt> {
    let attestation: Attestation = read_json(attestation_path)?;
    let system = load_system(config)?;
    let mut contract = SettlementContract::deploy(system, JsonFileStore::new(&config.state_path))?;
    Ok(contract.update_highest_message_number(&attestation)?)
}

fn print_records(records: &[StepRecord]) {
    println!(
        "{:>6}  {:>14}  {:>8}  {:>6}  {:>14}",
        "step", "message", "accepted", "raised", "highest"
    );
    for (i, r) in records.iter().enumerate() {
        println!(
            "{:>6}  {:>14}  {:>8}  {:>6}  {:>14}",
            i + 1,
            r.message_number,
            r.accepted,
            r.raised,
            r.output
        );
    }
}
