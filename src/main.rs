use anyhow::{bail, Context, Result};
use log::{error, info, warn};
use std::fs;
use tokio::signal::unix::{signal, SignalKind};

use edge_button_controller::config::Config;
use edge_button_controller::daemon::Daemon;
use edge_button_controller::extensions::{self, Extension};
use edge_button_controller::gpio::RppalGpio;
use edge_button_controller::runtime::{self, PollSettings};

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/etc/edge-button-controller/config.yaml".to_string());

    info!("edge button controller starting");
    info!("loading configuration from {config_path}");

    let config = load_config(&config_path)?;
    let enabled = resolve_extensions(&config)?;

    for binding in &config.bindings {
        if !enabled.iter().any(|e| e.covers(binding.pin)) {
            warn!(
                "binding on {} {} targets a pad no enabled extension covers",
                binding.pin, binding.event
            );
        }
    }

    let gpio = RppalGpio::new().context("failed to open the gpio controller")?;
    runtime::install(
        Box::new(gpio),
        PollSettings {
            interval_ms: config.polling.interval_ms,
            debounce_ms: config.polling.debounce_ms,
        },
    )
    .context("failed to install button runtime")?;

    for extension in &enabled {
        info!("initializing extension {}", extension.name);
        extension.init();
    }
    for mount in runtime::mounted() {
        info!("  - {} on line {} ({:?})", mount.pin, mount.line, mount.class);
    }

    let mut daemon = Daemon::new(config);

    let mut sigterm = signal(SignalKind::terminate()).context("failed to install SIGTERM handler")?;
    let mut sigint = signal(SignalKind::interrupt()).context("failed to install SIGINT handler")?;
    let mut sighup = signal(SignalKind::hangup()).context("failed to install SIGHUP handler")?;

    info!("daemon started");

    loop {
        tokio::select! {
            result = daemon.poll() => {
                if let Err(e) = result {
                    error!("poll error: {e:#}");
                    return Err(e);
                }
            }
            _ = sigterm.recv() => {
                info!("SIGTERM received, shutting down");
                break;
            }
            _ = sigint.recv() => {
                info!("SIGINT received, shutting down");
                break;
            }
            _ = sighup.recv() => {
                info!("SIGHUP received, reloading configuration");
                match load_config(&config_path).and_then(|new_config| {
                    resolve_extensions(&new_config)?;
                    Ok(new_config)
                }) {
                    Ok(new_config) => daemon.reload_config(new_config),
                    Err(e) => error!("reload failed, keeping current configuration: {e:#}"),
                }
            }
        }
    }

    info!("shutdown complete");
    Ok(())
}

fn load_config(path: &str) -> Result<Config> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read config file {path}"))?;
    let config: Config =
        serde_yaml::from_str(&raw).context("failed to parse configuration file")?;
    if config.polling.interval_ms == 0 {
        bail!("polling.interval_ms must be greater than zero");
    }
    Ok(config)
}

fn resolve_extensions(config: &Config) -> Result<Vec<&'static Extension>> {
    config
        .extensions
        .iter()
        .map(|name| {
            extensions::by_name(name)
                .ok_or_else(|| anyhow::anyhow!("unknown extension in configuration: {name}"))
        })
        .collect()
}

fn init_logger() {
    // env_logger to stdout/stderr; systemd/journald captures it.
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    env_logger::init();
}
