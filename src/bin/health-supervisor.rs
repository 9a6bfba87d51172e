use std::process::ExitCode;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use service_health::config::{validation, LogFormat, ObservabilityConfig, ProbeConfig};
use service_health::health::{HealthStatus, HttpProber, Prober, Supervisor};
use service_health::lifecycle::{signals, Shutdown};
use service_health::observability;

#[derive(Parser)]
#[command(name = "health-supervisor")]
#[command(about = "Liveness probe for the service's /healthz endpoint", long_about = None)]
struct Cli {
    #[command(flatten)]
    probe: ProbeArgs,

    /// Emit JSON log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct ProbeArgs {
    #[arg(short, long, global = true, default_value_t = ProbeConfig::default().url)]
    url: String,

    #[arg(long, global = true, default_value_t = ProbeConfig::default().interval_secs)]
    interval_secs: u64,

    #[arg(long, global = true, default_value_t = ProbeConfig::default().timeout_secs)]
    timeout_secs: u64,

    /// Consecutive failures before the verdict turns unhealthy
    #[arg(long, global = true, default_value_t = ProbeConfig::default().retries)]
    retries: u32,
}

impl From<ProbeArgs> for ProbeConfig {
    fn from(args: ProbeArgs) -> Self {
        Self {
            url: args.url,
            interval_secs: args.interval_secs,
            timeout_secs: args.timeout_secs,
            retries: args.retries,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Probe once; exit 0 on 200 OK, 1 otherwise (container HEALTHCHECK form)
    Check,
    /// Probe on a fixed cadence until SIGINT/SIGTERM and log verdicts
    Watch,
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let observability_config = ObservabilityConfig {
        log_format: if cli.json { LogFormat::Json } else { LogFormat::Text },
        ..ObservabilityConfig::default()
    };
    observability::init_logging(&observability_config)?;

    let probe: ProbeConfig = cli.probe.into();
    let validated = match cli.command {
        Commands::Check => validation::validate_check(&probe),
        Commands::Watch => validation::validate_probe(&probe),
    };
    if let Err(errors) = validated {
        for e in &errors {
            eprintln!("Error: {}", e);
        }
        return Ok(ExitCode::from(2));
    }

    let prober = HttpProber::new(&probe.url, probe.timeout())?;

    match cli.command {
        Commands::Check => {
            let result = prober.probe_once().await;
            tracing::info!(
                url = %probe.url,
                outcome = result.outcome.as_str(),
                latency_ms = result.latency.as_millis() as u64,
                "Probe finished"
            );
            Ok(if result.outcome.is_success() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Watch => {
            let supervisor = Supervisor::new(prober, probe.interval(), probe.retries);
            let mut verdicts = supervisor.subscribe();

            let shutdown = Shutdown::new();
            let supervisor_shutdown = shutdown.subscribe();
            signals::spawn_signal_listener(shutdown.clone());

            let reporter = tokio::spawn(async move {
                while verdicts.changed().await.is_ok() {
                    let verdict = *verdicts.borrow_and_update();
                    match verdict {
                        HealthStatus::Unhealthy => tracing::warn!(verdict = %verdict, "Verdict changed"),
                        HealthStatus::Healthy => tracing::info!(verdict = %verdict, "Verdict changed"),
                    }
                }
            });

            let last = supervisor.run(supervisor_shutdown).await;
            // Supervisor dropped: the verdict channel closes and the reporter ends.
            let _ = tokio::time::timeout(Duration::from_secs(1), reporter).await;

            tracing::info!(verdict = %last, "Health supervisor stopped");
            Ok(ExitCode::SUCCESS)
        }
    }
}
