use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;
use std::time::Duration;

/// Counters accumulated by the layout runtime.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    requests: u64,
    superseded: u64,
    passes: u64,
    skipped: u64,
    frames: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_request(&mut self, replaced_pending: bool) {
        self.requests = self.requests.saturating_add(1);
        if replaced_pending {
            self.superseded = self.superseded.saturating_add(1);
        }
    }

    pub fn record_pass(&mut self, frame_count: usize) {
        self.passes = self.passes.saturating_add(1);
        self.frames = self.frames.saturating_add(frame_count as u64);
    }

    pub fn record_skip(&mut self) {
        self.skipped = self.skipped.saturating_add(1);
    }

    pub fn snapshot(&self, uptime: Duration) -> MetricSnapshot {
        MetricSnapshot {
            uptime_ms: uptime.as_millis() as u64,
            requests: self.requests,
            superseded: self.superseded,
            passes: self.passes,
            skipped: self.skipped,
            frames: self.frames,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub uptime_ms: u64,
    pub requests: u64,
    pub superseded: u64,
    pub passes: u64,
    pub skipped: u64,
    pub frames: u64,
}

impl MetricSnapshot {
    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("uptime_ms".to_string(), json!(self.uptime_ms));
        map.insert("requests".to_string(), json!(self.requests));
        map.insert("superseded".to_string(), json!(self.superseded));
        map.insert("passes".to_string(), json!(self.passes));
        map.insert("skipped".to_string(), json!(self.skipped));
        map.insert("frames".to_string(), json!(self.frames));
        map
    }

    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }
}
