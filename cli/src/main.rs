//! Project Legit client: verify product authenticity against the ledger backend.

mod report;

use anyhow::Context;
use clap::Parser;
use futures_util::future::join_all;
use legit_backend::{OperationReceipt, RegisterProductRequest, TransferOwnershipRequest};
use legit_nullables::SimulatedBackend;
use legit_types::ProductId;
use legit_utils::LogFormat;
use legit_verification::{ClientConfig, ResultSlot, VerificationController};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use crate::report::VerifyReport;

#[derive(Parser, Debug)]
#[command(name = "legit", version, about = "Project Legit product verification client")]
struct Cli {
    /// Base URL of the backend verification service.
    #[arg(long, global = true, env = "LEGIT_BACKEND_URL")]
    backend_url: Option<String>,

    /// Overall request timeout in seconds (default: wait indefinitely).
    #[arg(long, global = true, env = "LEGIT_REQUEST_TIMEOUT")]
    timeout: Option<u64>,

    /// Share one in-flight lookup between verifications of the same product.
    #[arg(long, global = true, env = "LEGIT_COALESCE")]
    coalesce: bool,

    /// Answer from the built-in demo catalogue instead of the backend.
    #[arg(long, global = true, env = "LEGIT_SIMULATE")]
    simulate: bool,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "LEGIT_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "LEGIT_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Output machine-readable JSON.
    #[arg(long, global = true)]
    json: bool,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true, env = "LEGIT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Verify one or more products on the ledger.
    Verify {
        /// Product ids, verified concurrently.
        #[arg(required = true, num_args = 1..)]
        product_ids: Vec<String>,
    },
    /// Register a product under the backend's manufacturer account.
    Register { product_id: String },
    /// Transfer a product to a new owner.
    Transfer {
        product_id: String,
        /// Public key of the current owner.
        #[arg(long)]
        from: String,
        /// Public key of the new owner.
        #[arg(long)]
        to: String,
    },
    /// Check that the backend is reachable.
    Ping,
}

impl Cli {
    /// File settings as the base, flags and env vars on top.
    fn resolve_config(&self) -> anyhow::Result<ClientConfig> {
        let mut config = match &self.config {
            Some(path) => ClientConfig::from_toml_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => ClientConfig::default(),
        };
        if let Some(url) = &self.backend_url {
            config.backend_url = url.clone();
        }
        if self.timeout.is_some() {
            config.request_timeout_secs = self.timeout;
        }
        config.coalesce_in_flight |= self.coalesce;
        if let Some(level) = &self.log_level {
            config.log_level = level.clone();
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        Ok(config)
    }
}

fn build_controller(cli: &Cli, config: &ClientConfig) -> anyhow::Result<VerificationController> {
    if !cli.simulate {
        return Ok(VerificationController::from_config(config)?);
    }
    tracing::info!("using simulated backend");
    let controller = VerificationController::new(Arc::new(SimulatedBackend::new()));
    Ok(if config.coalesce_in_flight {
        controller.with_coalescing()
    } else {
        controller
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    legit_utils::init_logging(config.log_format, &config.log_level);

    let controller = build_controller(&cli, &config)?;
    tracing::debug!(
        backend = controller.backend().name(),
        url = %config.backend_url,
        "client ready"
    );

    match &cli.command {
        Command::Verify { product_ids } => verify(&controller, product_ids, cli.json).await,
        Command::Register { product_id } => {
            let receipt = register(&controller, product_id).await?;
            print_receipt(&receipt, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Transfer {
            product_id,
            from,
            to,
        } => {
            let receipt = transfer(&controller, product_id, from, to).await?;
            print_receipt(&receipt, cli.json)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Ping => {
            let message = controller.backend().ping().await?;
            println!("{message}");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Exits non-zero unless every product verified as legit.
async fn verify(
    controller: &VerificationController,
    inputs: &[String],
    json: bool,
) -> anyhow::Result<ExitCode> {
    let attempts = inputs.iter().map(|raw| async move {
        match ProductId::parse(raw) {
            Ok(id) => controller.verify_listed(&id).await,
            Err(_) => controller.verify(ResultSlot::Main, raw).await,
        }
    });
    let outcomes = join_all(attempts).await;

    let store = controller.snapshot();
    let reports: Vec<VerifyReport> = inputs
        .iter()
        .zip(outcomes)
        .map(|(raw, outcome)| VerifyReport::collect(raw, outcome, &store))
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}", report.to_text());
        }
    }

    let all_legit = reports.iter().all(|r| r.outcome.is_legit());
    Ok(if all_legit {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

async fn register(
    controller: &VerificationController,
    raw_id: &str,
) -> anyhow::Result<OperationReceipt> {
    let product_id = ProductId::parse(raw_id)?;
    let receipt = controller
        .backend()
        .register_product(&RegisterProductRequest {
            product_id: product_id.to_string(),
        })
        .await?;
    Ok(receipt)
}

async fn transfer(
    controller: &VerificationController,
    raw_id: &str,
    from: &str,
    to: &str,
) -> anyhow::Result<OperationReceipt> {
    let product_id = ProductId::parse(raw_id)?;
    let receipt = controller
        .backend()
        .transfer_ownership(&TransferOwnershipRequest {
            product_id: product_id.to_string(),
            current_owner_public_key: from.to_string(),
            new_owner_public_key: to.to_string(),
        })
        .await?;
    Ok(receipt)
}

fn print_receipt(receipt: &OperationReceipt, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(receipt)?);
    } else {
        println!("{}: {}", receipt.status, receipt.message);
        if !receipt.cli_output.is_empty() {
            println!("{}", receipt.cli_output);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use legit_nullables::NullBackend;

    #[test]
    fn verify_accepts_several_ids() {
        let cli = Cli::try_parse_from(["legit", "verify", "A-1", "B-2"]).unwrap();
        match cli.command {
            Command::Verify { product_ids } => assert_eq!(product_ids, vec!["A-1", "B-2"]),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn verify_requires_an_id() {
        assert!(Cli::try_parse_from(["legit", "verify"]).is_err());
    }

    #[test]
    fn transfer_needs_both_keys() {
        assert!(Cli::try_parse_from(["legit", "transfer", "A-1", "--from", "GA"]).is_err());
        let cli =
            Cli::try_parse_from(["legit", "transfer", "A-1", "--from", "GA", "--to", "GB"])
                .unwrap();
        assert!(matches!(cli.command, Command::Transfer { .. }));
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "legit",
            "--backend-url",
            "http://10.1.1.1:8000",
            "--timeout",
            "7",
            "--coalesce",
            "--log-format",
            "json",
            "ping",
        ])
        .unwrap();
        let config = cli.resolve_config().unwrap();
        assert_eq!(config.backend_url, "http://10.1.1.1:8000");
        assert_eq!(config.request_timeout_secs, Some(7));
        assert!(config.coalesce_in_flight);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn simulated_controller_uses_demo_backend() {
        let cli = Cli::try_parse_from(["legit", "--simulate", "ping"]).unwrap();
        let controller = build_controller(&cli, &ClientConfig::default()).unwrap();
        assert_eq!(controller.backend().name(), "simulated");
    }

    fn null_controller() -> (Arc<NullBackend>, VerificationController) {
        let backend = Arc::new(NullBackend::new());
        let controller = VerificationController::new(backend.clone());
        (backend, controller)
    }

    #[tokio::test]
    async fn register_sends_the_trimmed_id() {
        let (backend, controller) = null_controller();

        let receipt = register(&controller, "  ROLEX-SUB-345678 ").await.unwrap();

        assert_eq!(receipt.status, "success");
        assert_eq!(
            backend.registrations(),
            vec![RegisterProductRequest {
                product_id: "ROLEX-SUB-345678".into()
            }]
        );
    }

    #[tokio::test]
    async fn register_rejects_a_blank_id_before_the_backend() {
        let (backend, controller) = null_controller();

        assert!(register(&controller, "   ").await.is_err());
        assert!(backend.registrations().is_empty());
    }

    #[tokio::test]
    async fn transfer_carries_both_owner_keys() {
        let (backend, controller) = null_controller();

        let receipt = transfer(&controller, "NIKE-AIR-123456", "GAOLD", "GANEW")
            .await
            .unwrap();

        assert_eq!(receipt.message, "Ownership transfer initiated");
        assert!(backend.registrations().is_empty());
        assert_eq!(
            backend.transfers(),
            vec![TransferOwnershipRequest {
                product_id: "NIKE-AIR-123456".into(),
                current_owner_public_key: "GAOLD".into(),
                new_owner_public_key: "GANEW".into(),
            }]
        );
    }
}
