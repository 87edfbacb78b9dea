//! Debounced layout runtime.
//!
//! Hosts call [`LayoutRuntime::update_layout`] whenever something may have
//! moved (resize, join/leave, volume change). Nothing is computed at that
//! point: the request is parked in a single-slot debouncer and the host's loop
//! calls [`LayoutRuntime::poll`] once [`LayoutRuntime::next_deadline`] passes.
//! Only the latest request is ever executed.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde_json::{Value, json};

use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::{LayoutPass, layout_snapshot};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::LayoutMetrics;
use crate::tile::{ElementProvider, LayoutSnapshot, Positioner, StyleInspector};

pub mod debounce;

pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};

const LOG_TARGET: &str = "tile_layout::runtime";

/// Knobs for the runtime itself, separate from the layout configuration.
#[derive(Clone)]
pub struct RuntimeConfig {
    /// Quiet period between the last request and its execution.
    pub debounce: Duration,
    /// Optional structured logger used by the runtime.
    pub logger: Option<Logger>,
    /// Metrics accumulator shared with the host.
    pub metrics: Option<Arc<Mutex<LayoutMetrics>>>,
    /// Target field used when emitting metrics snapshots.
    pub metrics_target: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            logger: None,
            metrics: None,
            metrics_target: "tile_layout::runtime.metrics".to_string(),
        }
    }
}

impl RuntimeConfig {
    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) {
        if self.metrics.is_none() {
            self.metrics = Some(Arc::new(Mutex::new(LayoutMetrics::new())));
        }
    }

    /// Access the shared metrics handle if metrics are enabled.
    pub fn metrics_handle(&self) -> Option<Arc<Mutex<LayoutMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }
}

#[derive(Debug)]
struct PendingPass<H> {
    config: LayoutConfig,
    snapshot: LayoutSnapshot<H>,
}

/// Owns the active configuration and the single pending layout request.
pub struct LayoutRuntime<H> {
    config: LayoutConfig,
    pending: Debouncer<PendingPass<H>>,
    settings: RuntimeConfig,
    started: Instant,
}

impl<H: Clone> LayoutRuntime<H> {
    pub fn new(config: LayoutConfig) -> Result<Self> {
        Self::with_settings(config, RuntimeConfig::default())
    }

    pub fn with_settings(config: LayoutConfig, settings: RuntimeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            pending: Debouncer::new(settings.debounce),
            settings,
            started: Instant::now(),
        })
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration wholesale. Requests already pending keep the
    /// configuration they were made with.
    pub fn set_config(&mut self, config: LayoutConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        self.log(
            LogLevel::Info,
            "config_replaced",
            [
                json_kv("vroom", json!(self.config.vroom)),
                json_kv("big_first", json!(self.config.big_first)),
                json_kv("fixed_ratio", json!(self.config.fixed_ratio)),
            ],
        );
        Ok(())
    }

    /// Park a layout request. Any earlier pending request is dropped and the
    /// delay restarts from `now`.
    pub fn update_layout(&mut self, snapshot: LayoutSnapshot<H>, now: Instant) {
        let tiles = snapshot.tiles.len();
        let replaced = self.pending.schedule(
            PendingPass {
                config: self.config.clone(),
                snapshot,
            },
            now,
        );
        self.with_metrics(|m| m.record_request(replaced));
        let message = if replaced {
            "layout_superseded"
        } else {
            "layout_requested"
        };
        self.log(LogLevel::Debug, message, [json_kv("tiles", json!(tiles))]);
    }

    /// Snapshot `provider` now and park the result.
    pub fn update_from<P>(&mut self, provider: &P, now: Instant) -> Result<()>
    where
        P: ElementProvider<Handle = H>,
    {
        let snapshot = provider.snapshot()?;
        self.update_layout(snapshot, now);
        Ok(())
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_pending()
    }

    /// When the pending request becomes due, if there is one.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.pending.deadline()
    }

    pub fn cancel_pending(&mut self) -> bool {
        self.pending.cancel().is_some()
    }

    /// Execute the pending request if its deadline has passed, applying every
    /// frame through `positioner`. Returns the executed pass.
    pub fn poll<S, P>(
        &mut self,
        now: Instant,
        styles: &S,
        positioner: &mut P,
    ) -> Result<Option<LayoutPass<H>>>
    where
        S: StyleInspector<H> + ?Sized,
        P: Positioner<H> + ?Sized,
    {
        let Some(PendingPass { config, snapshot }) = self.pending.take_due(now) else {
            return Ok(None);
        };

        let Some(pass) = layout_snapshot(&config, snapshot, styles)? else {
            self.with_metrics(LayoutMetrics::record_skip);
            self.log(
                LogLevel::Debug,
                "layout_skipped",
                [json_kv("reason", json!("container_hidden"))],
            );
            return Ok(None);
        };

        let animation = config.animate.as_ref();
        for placement in &pass.placements {
            positioner.position(&placement.handle, placement.frame, animation)?;
        }

        self.with_metrics(|m| m.record_pass(pass.placements.len()));
        self.log(
            LogLevel::Info,
            "layout_executed",
            [
                json_kv("placements", json!(pass.placements.len())),
                json_kv("split", json!(pass.split)),
                json_kv(
                    "partitions",
                    serde_json::to_value(&pass.partitions).unwrap_or(Value::Null),
                ),
                json_kv("fingerprint", json!(pass.fingerprint().to_hex().to_string())),
            ],
        );
        Ok(Some(pass))
    }

    /// Replay timestamped requests as a host loop would, polling before each
    /// request and draining the last one. Returns every executed pass.
    pub fn run_scripted<I, S, P>(
        &mut self,
        requests: I,
        styles: &S,
        positioner: &mut P,
    ) -> Result<Vec<LayoutPass<H>>>
    where
        I: IntoIterator<Item = (Instant, LayoutSnapshot<H>)>,
        S: StyleInspector<H> + ?Sized,
        P: Positioner<H> + ?Sized,
    {
        let mut passes = Vec::new();
        for (at, snapshot) in requests {
            if let Some(pass) = self.poll(at, styles, positioner)? {
                passes.push(pass);
            }
            self.update_layout(snapshot, at);
        }
        if let Some(deadline) = self.next_deadline() {
            if let Some(pass) = self.poll(deadline, styles, positioner)? {
                passes.push(pass);
            }
        }
        Ok(passes)
    }

    /// Log the current metrics snapshot, if both metrics and a logger are set.
    pub fn emit_metrics(&self, now: Instant) {
        if let (Some(logger), Some(metrics)) =
            (self.settings.logger.as_ref(), self.settings.metrics.as_ref())
        {
            if let Ok(guard) = metrics.lock() {
                let uptime = now.saturating_duration_since(self.started);
                let event = guard
                    .snapshot(uptime)
                    .to_log_event(&self.settings.metrics_target);
                let _ = logger.log_event(event);
            }
        }
    }

    fn with_metrics(&self, record: impl FnOnce(&mut LayoutMetrics)) {
        if let Some(metrics) = self.settings.metrics.as_ref() {
            if let Ok(mut guard) = metrics.lock() {
                record(&mut *guard);
            }
        }
    }

    fn log<I>(&self, level: LogLevel, message: &str, fields: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        if let Some(logger) = self.settings.logger.as_ref() {
            let event = event_with_fields(level, LOG_TARGET, message, fields);
            let _ = logger.log_event(event);
        }
    }
}
