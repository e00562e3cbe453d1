use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use mocker::agent::{CodingAgent, Operation};
use mocker::config::AppConfig;
use mocker::seed::seed;
use mocker::server::{AppState, ServerBuilder};
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mocker", version, about = "Mock user/task admin API server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve(ServeArgs),

    /// Render a coding agent prompt for a source file
    Agent(AgentArgs),
}

#[derive(clap::Args, Default)]
struct ServeArgs {
    /// YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Address to bind, overrides the configuration
    #[arg(long)]
    bind: Option<String>,

    /// Start with empty stores
    #[arg(long)]
    no_seed: bool,
}

#[derive(clap::Args)]
struct AgentArgs {
    #[arg(value_enum)]
    operation: AgentOperation,

    /// Source file; reads stdin when omitted
    file: Option<PathBuf>,

    /// Language of the code
    #[arg(long, default_value = mocker::agent::DEFAULT_LANGUAGE)]
    language: String,

    /// API key, falls back to ANTHROPIC_API_KEY
    #[arg(long)]
    api_key: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum AgentOperation {
    Review,
    Security,
    Improve,
}

impl From<AgentOperation> for Operation {
    fn from(op: AgentOperation) -> Self {
        match op {
            AgentOperation::Review => Operation::Review,
            AgentOperation::Security => Operation::Security,
            AgentOperation::Improve => Operation::Improve,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mocker=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command.unwrap_or_else(|| Command::Serve(ServeArgs::default())) {
        Command::Serve(args) => serve(args).await,
        Command::Agent(args) => agent(args),
    }
}

async fn serve(args: ServeArgs) -> Result<()> {
    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }
    if args.no_seed {
        config.seed = false;
    }

    let bind = config.server.bind.clone();
    let load_seed = config.seed;
    let state = AppState::new(config)?;

    if load_seed {
        seed(&state).await?;
    }

    ServerBuilder::mock_api(state).serve(&bind).await
}

fn agent(args: AgentArgs) -> Result<()> {
    let code = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?,
        None => {
            let mut code = String::new();
            std::io::stdin()
                .read_to_string(&mut code)
                .context("failed to read stdin")?;
            code
        }
    };

    let agent = CodingAgent::new(args.api_key)?;
    let output = agent.run(args.operation.into(), &code, Some(&args.language))?;
    println!("{output}");
    Ok(())
}
