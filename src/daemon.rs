use std::time::{Duration, Instant};

use anyhow::Result;
use log::{debug, info, warn};
use tokio::time::sleep;

use crate::button::Event;
use crate::command;
use crate::config::{Config, EventBinding};
use crate::runtime;

/// Drives the poll loop: waits one interval, drains the runtime's
/// events and dispatches any bound commands.
pub struct Daemon {
    config: Config,
}

impl Daemon {
    pub fn new(config: Config) -> Self {
        info!(
            "polling every {}ms (debounce {}ms)",
            config.polling.interval_ms, config.polling.debounce_ms
        );
        for binding in &config.bindings {
            info!(
                "  - {} {} -> {}",
                binding.pin,
                binding.event,
                binding.description.as_deref().unwrap_or(&binding.command)
            );
        }
        Daemon { config }
    }

    pub async fn poll(&mut self) -> Result<()> {
        sleep(Duration::from_millis(self.config.polling.interval_ms)).await;

        for event in runtime::poll_all(Instant::now()) {
            self.handle(event);
        }
        Ok(())
    }

    fn handle(&self, event: Event) {
        debug!("{} {}", event.source, event.kind);

        let Some(binding) = self.lookup(&event) else {
            return;
        };
        info!("{} {} -> running binding command", event.source, event.kind);
        if let Err(e) = command::run(&binding.command) {
            warn!("binding for {} {} failed: {e:#}", event.source, event.kind);
        }
    }

    fn lookup(&self, event: &Event) -> Option<&EventBinding> {
        self.config
            .bindings
            .iter()
            .find(|b| b.pin == event.source && b.event == event.kind)
    }

    /// Swap in a reloaded config. Mounted extensions are terminal, so a
    /// changed extension list only takes effect after a restart; the
    /// same goes for the debounce window, which is applied at mount
    /// time.
    pub fn reload_config(&mut self, new_config: Config) {
        let mut old_extensions = self.config.extensions.clone();
        let mut new_extensions = new_config.extensions.clone();
        old_extensions.sort();
        new_extensions.sort();
        if old_extensions != new_extensions {
            warn!("extension list changed; mounted extensions persist until restart");
        }
        if new_config.polling.debounce_ms != self.config.polling.debounce_ms {
            warn!("debounce window is applied when buttons mount; restart to change it");
        }

        self.config = new_config;
        info!("configuration reloaded");
    }
}
