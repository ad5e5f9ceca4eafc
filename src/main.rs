use clap::{Parser, Subcommand};
use ghostops::config::Config;
use ghostops::pipeline;
use ghostops::request::OperationRequest;
use ghostops::server;
use tracing::{debug, error};

/// Migrate or wipe content across staging/prod Ghost deployments
#[derive(Parser)]
#[command(name = "ghostops")]
#[command(about = "Ghost admin API content operations", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the operation endpoint over HTTP
    Serve {
        /// Port to listen on
        #[arg(long, default_value = "8080")]
        port: u16,
    },
    /// Run a single operation and exit
    Run {
        /// Operation to perform: delete or move
        operation: String,

        /// Target environment for delete: staging or prod
        #[arg(short, long)]
        environment: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    debug!("ghostops started with verbosity level: {}", cli.verbose);

    let result = match cli.command {
        Commands::Serve { port } => run_serve(port).await,
        Commands::Run {
            operation,
            environment,
        } => run_once(operation, environment).await,
    };

    if let Err(e) = result {
        error!("Fatal error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_serve(port: u16) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    server::serve(config, port).await
}

async fn run_once(operation: String, environment: Option<String>) -> anyhow::Result<()> {
    // Validate before reading configuration: a bad request never needs the
    // credentials and never reaches the network.
    let request = OperationRequest {
        operation: Some(operation),
        environment,
    };
    let operation = request.validate()?;

    let config = Config::from_env()?;
    let outcome = pipeline::run(&config, operation).await?;
    println!("{}", outcome.body);
    Ok(())
}
