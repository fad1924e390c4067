//! Command-line front end for Switchyard.
//!
//! Usage:
//!
//! ```text
//! switchyard [--data-dir <dir>] <command> [args]
//! ```
//!
//! Backends are stored under `<dir>/backends/` and the selector model in
//! `<dir>/selector_model.json`. Every command prints JSON on standard output;
//! logs go to standard error and honour `RUST_LOG`.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use eyre::{Result, WrapErr, eyre};
use mockable::DefaultClock;
use serde::Serialize;
use switchyard::analysis::domain::InputKind;
use switchyard::backend::{
    adapters::json_file::JsonFileBackendRegistry,
    domain::{BackendId, BackendKind, BackendType, BackendUpdate},
    services::{BackendRegistryService, RegisterBackendRequest},
};
use switchyard::dispatch::{
    adapters::{ReqwestHttpTransport, TokioProcessTransport},
    domain::DispatchConfig,
    services::Junction,
};
use switchyard::routing::RequestRouter;
use switchyard::selection::{
    adapters::json_file::JsonFileKeywordModelStore, domain::TrainingExample,
    services::BackendSelector,
};
use tokio::runtime::Builder;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

type Registry = BackendRegistryService<JsonFileBackendRegistry, DefaultClock>;
type Selector = BackendSelector<JsonFileKeywordModelStore>;
type Router = RequestRouter<
    JsonFileBackendRegistry,
    JsonFileKeywordModelStore,
    ReqwestHttpTransport,
    TokioProcessTransport,
    DefaultClock,
>;

#[derive(Debug, Parser)]
#[command(name = "switchyard", about = "Route requests to registered AI backends")]
struct Cli {
    /// Directory holding the backend registry and selector model.
    #[arg(long, env = "SWITCHYARD_DATA_DIR", default_value = "switchyard_data")]
    data_dir: Utf8PathBuf,

    /// Per-dispatch timeout in seconds; 0 disables the timeout.
    #[arg(long, env = "SWITCHYARD_DISPATCH_TIMEOUT_SECS", default_value_t = 120)]
    dispatch_timeout_secs: u64,

    /// Program used to run bot scripts.
    #[arg(long, env = "SWITCHYARD_SCRIPT_INTERPRETER", default_value = "python3")]
    script_interpreter: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Register a backend.
    Add(AddArgs),
    /// List registered backends.
    List {
        /// Only list backends of this type.
        #[arg(long = "type")]
        backend_type: Option<BackendType>,
    },
    /// Show one backend.
    Show {
        /// Backend identifier.
        id: BackendId,
    },
    /// Change a backend's name, description, or target.
    Update(UpdateArgs),
    /// Unregister a backend and forget what the selector learned about it.
    Remove {
        /// Backend identifier.
        id: BackendId,
    },
    /// Train the selector from a JSON array of labelled examples.
    Train {
        /// Path to the training file.
        file: Utf8PathBuf,
    },
    /// Route text to the best backend.
    Route {
        /// Request text.
        text: String,
        /// Tag the text as transcribed speech.
        #[arg(long)]
        speech: bool,
    },
    /// Send text to every backend, optionally of one type.
    Broadcast {
        /// Request text.
        text: String,
        /// Only dispatch to backends of this type.
        #[arg(long = "type")]
        backend_type: Option<BackendType>,
    },
    /// Report dispatcher health.
    Health,
}

#[derive(Debug, Args)]
struct TargetArgs {
    /// API endpoint URL (api).
    #[arg(long)]
    endpoint: Option<String>,
    /// API bearer credential (api).
    #[arg(long)]
    api_key: Option<String>,
    /// Script path (bot, custom_ai).
    #[arg(long)]
    script: Option<String>,
    /// Command line (local_ai, custom_ai).
    #[arg(long)]
    command: Option<String>,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Display name.
    #[arg(long)]
    name: String,
    /// Free-text description.
    #[arg(long)]
    description: String,
    /// Backend type: api, bot, local_ai, or custom_ai.
    #[arg(long = "type")]
    backend_type: BackendType,
    #[command(flatten)]
    target: TargetArgs,
}

#[derive(Debug, Args)]
struct UpdateArgs {
    /// Backend identifier.
    id: BackendId,
    /// New display name.
    #[arg(long)]
    name: Option<String>,
    /// New description.
    #[arg(long)]
    description: Option<String>,
    /// New backend type; requires the matching target options.
    #[arg(long = "type")]
    backend_type: Option<BackendType>,
    #[command(flatten)]
    target: TargetArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let runtime = Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to start async runtime")?;
    runtime.block_on(run(cli))
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        data_dir,
        dispatch_timeout_secs,
        script_interpreter,
        command,
    } = cli;
    let clock = Arc::new(DefaultClock);
    let registry = Arc::new(BackendRegistryService::new(
        Arc::new(JsonFileBackendRegistry::open(data_dir.join("backends"))?),
        Arc::clone(&clock),
    ));
    let config = DispatchConfig::default()
        .with_dispatch_timeout(Some(Duration::from_secs(dispatch_timeout_secs)))
        .with_script_interpreter(script_interpreter);
    let dispatcher = || open_router(&data_dir, Arc::clone(&registry), Arc::clone(&clock), config);

    match command {
        Command::Add(args) => add(&registry, args).await,
        Command::List { backend_type } => {
            let backends = match backend_type {
                Some(filter) => registry.list_by_type(filter).await?,
                None => registry.list_all().await?,
            };
            print_json(&backends)
        }
        Command::Show { id } => {
            let backend = registry
                .find_by_id(id)
                .await?
                .ok_or_else(|| eyre!("backend {id} not found"))?;
            print_json(&backend)
        }
        Command::Update(args) => update(&registry, args).await,
        Command::Remove { id } => {
            let (router, _) = dispatcher().await?;
            let removed = router.retire_backend(id).await?;
            print_json(&serde_json::json!({ "id": id, "removed": removed }))
        }
        Command::Train { file } => {
            let raw = std::fs::read_to_string(&file)
                .wrap_err_with(|| format!("failed to read training file {file}"))?;
            let examples: Vec<TrainingExample> = serde_json::from_str(&raw)
                .wrap_err_with(|| format!("invalid training file {file}"))?;
            let (_, selector) = dispatcher().await?;
            selector.train(&examples).await?;
            print_json(&serde_json::json!({ "trained": examples.len() }))
        }
        Command::Route { text, speech } => {
            let kind = if speech {
                InputKind::Speech
            } else {
                InputKind::Text
            };
            let (router, _) = dispatcher().await?;
            let outcome = router.route(&text, kind).await;
            router.junction().graceful_shutdown();
            print_json(&outcome?)
        }
        Command::Broadcast { text, backend_type } => {
            let (router, _) = dispatcher().await?;
            let entries = router.broadcast(&text, InputKind::Text, backend_type).await;
            router.junction().graceful_shutdown();
            print_json(&entries?)
        }
        Command::Health => {
            let (router, _) = dispatcher().await?;
            print_json(&router.junction().health_check())
        }
    }
}

async fn open_router(
    data_dir: &Utf8Path,
    registry: Arc<Registry>,
    clock: Arc<DefaultClock>,
    config: DispatchConfig,
) -> Result<(Router, Arc<Selector>)> {
    let store = JsonFileKeywordModelStore::open(data_dir.join("selector_model.json"))?;
    let selector = Arc::new(BackendSelector::load(Arc::new(store)).await?);
    let junction = Junction::new(
        Arc::new(ReqwestHttpTransport::new()),
        Arc::new(TokioProcessTransport::new()),
        clock,
        config,
    );
    let router = RequestRouter::new(registry, Arc::clone(&selector), junction);
    Ok((router, selector))
}

async fn add(registry: &Registry, args: AddArgs) -> Result<()> {
    let kind = build_kind(args.backend_type, args.target)?;
    let descriptor = registry
        .register(RegisterBackendRequest::new(args.name, args.description, kind))
        .await?;
    print_json(&descriptor)
}

async fn update(registry: &Registry, args: UpdateArgs) -> Result<()> {
    let mut changes = BackendUpdate::new();
    if let Some(name) = args.name {
        changes = changes.with_name(name);
    }
    if let Some(description) = args.description {
        changes = changes.with_description(description);
    }
    if let Some(backend_type) = args.backend_type {
        changes = changes.with_kind(build_kind(backend_type, args.target)?);
    }
    if changes.is_empty() {
        return Err(eyre!("nothing to update"));
    }

    if !registry.update(args.id, changes).await? {
        return Err(eyre!("backend {} not found", args.id));
    }
    let descriptor = registry
        .find_by_id(args.id)
        .await?
        .ok_or_else(|| eyre!("backend {} not found", args.id))?;
    print_json(&descriptor)
}

fn build_kind(backend_type: BackendType, target: TargetArgs) -> Result<BackendKind> {
    let TargetArgs {
        endpoint,
        api_key,
        script,
        command,
    } = target;
    let kind = match backend_type {
        BackendType::Api => BackendKind::api(
            endpoint.ok_or_else(|| eyre!("--endpoint is required for api backends"))?,
            api_key.ok_or_else(|| eyre!("--api-key is required for api backends"))?,
        )?,
        BackendType::Bot => {
            BackendKind::bot(script.ok_or_else(|| eyre!("--script is required for bot backends"))?)?
        }
        BackendType::LocalAi => BackendKind::local_ai(
            command.ok_or_else(|| eyre!("--command is required for local_ai backends"))?,
        )?,
        BackendType::CustomAi => BackendKind::custom_ai(script, command)?,
    };
    Ok(kind)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, value)?;
    writeln!(stdout)?;
    Ok(())
}
