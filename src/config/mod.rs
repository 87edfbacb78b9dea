//! Layout configuration: partial options, the defaulting step and validation.
//!
//! Callers usually hold a [`LayoutOptions`] (possibly parsed from JSON using
//! the camelCase option names) and turn it into an immutable [`LayoutConfig`]
//! with [`LayoutOptions::into_config`]. Validation happens here, once, so a
//! layout pass never has to second-guess its inputs.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_MAX_RATIO: f64 = 3.0 / 2.0;
pub const DEFAULT_MIN_RATIO: f64 = 9.0 / 16.0;
pub const DEFAULT_BIG_PERCENTAGE: f64 = 0.8;
pub const DEFAULT_BIG_CLASS: &str = "OT_big";
pub const DEFAULT_ANIMATION_MS: u64 = 200;
pub const DEFAULT_EASING: &str = "swing";

/// Completion callback fired by a positioner once an animated move settles.
pub type CompletionHook = Arc<dyn Fn() + Send + Sync>;

/// Transition applied by the positioner when moving a tile.
#[derive(Clone)]
pub struct Animation {
    pub duration: Duration,
    pub easing: String,
    pub on_complete: Option<CompletionHook>,
}

impl Animation {
    pub fn new(duration: Duration, easing: impl Into<String>) -> Self {
        Self {
            duration,
            easing: easing.into(),
            on_complete: None,
        }
    }

    pub fn with_completion<F>(mut self, hook: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_complete = Some(Arc::new(hook));
        self
    }

    /// Invoke the completion hook, if one is attached.
    pub fn notify_complete(&self) {
        if let Some(hook) = self.on_complete.as_ref() {
            hook();
        }
    }
}

impl Default for Animation {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_ANIMATION_MS), DEFAULT_EASING)
    }
}

impl fmt::Debug for Animation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Animation")
            .field("duration", &self.duration)
            .field("easing", &self.easing)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl PartialEq for Animation {
    fn eq(&self, other: &Self) -> bool {
        self.duration == other.duration && self.easing == other.easing
    }
}

/// Ratio bounds and fixed-ratio flag for one partition (big or small).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioPolicy {
    pub min_ratio: f64,
    pub max_ratio: f64,
    pub fixed_ratio: bool,
}

/// Fully populated, immutable layout configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    pub max_ratio: f64,
    pub min_ratio: f64,
    pub fixed_ratio: bool,
    pub big_class: String,
    pub big_percentage: f64,
    pub big_max_ratio: f64,
    pub big_min_ratio: f64,
    pub big_fixed_ratio: bool,
    pub big_first: bool,
    pub vroom: bool,
    pub animate: Option<Animation>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutOptions::default().resolve()
    }
}

impl LayoutConfig {
    pub fn small_policy(&self) -> RatioPolicy {
        RatioPolicy {
            min_ratio: self.min_ratio,
            max_ratio: self.max_ratio,
            fixed_ratio: self.fixed_ratio,
        }
    }

    pub fn big_policy(&self) -> RatioPolicy {
        RatioPolicy {
            min_ratio: self.big_min_ratio,
            max_ratio: self.big_max_ratio,
            fixed_ratio: self.big_fixed_ratio,
        }
    }

    /// Reject configurations the engine cannot lay out sensibly.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("maxRatio", self.max_ratio),
            ("minRatio", self.min_ratio),
            ("bigMaxRatio", self.big_max_ratio),
            ("bigMinRatio", self.big_min_ratio),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::InvalidRatio { field, value });
            }
        }
        if self.min_ratio > self.max_ratio {
            return Err(ConfigError::InvertedBounds {
                tier: "small",
                min: self.min_ratio,
                max: self.max_ratio,
            });
        }
        if self.big_min_ratio > self.big_max_ratio {
            return Err(ConfigError::InvertedBounds {
                tier: "big",
                min: self.big_min_ratio,
                max: self.big_max_ratio,
            });
        }
        if !(self.big_percentage > 0.0 && self.big_percentage <= 1.0) {
            return Err(ConfigError::BigPercentage(self.big_percentage));
        }
        if self.big_class.is_empty() {
            return Err(ConfigError::EmptyBigClass);
        }
        Ok(())
    }
}

/// `animate` accepts a bare boolean or a `{ duration, easing }` object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AnimateOption {
    Enabled(bool),
    Spec {
        #[serde(default)]
        duration: Option<u64>,
        #[serde(default)]
        easing: Option<String>,
    },
}

impl AnimateOption {
    fn resolve(self) -> Option<Animation> {
        match self {
            AnimateOption::Enabled(false) => None,
            AnimateOption::Enabled(true) => Some(Animation::default()),
            AnimateOption::Spec { duration, easing } => Some(Animation::new(
                Duration::from_millis(duration.unwrap_or(DEFAULT_ANIMATION_MS)),
                easing.unwrap_or_else(|| DEFAULT_EASING.to_string()),
            )),
        }
    }
}

/// Partial options; every missing field falls back to its documented default.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutOptions {
    pub max_ratio: Option<f64>,
    pub min_ratio: Option<f64>,
    pub fixed_ratio: Option<bool>,
    pub big_class: Option<String>,
    pub big_percentage: Option<f64>,
    pub big_max_ratio: Option<f64>,
    pub big_min_ratio: Option<f64>,
    pub big_fixed_ratio: Option<bool>,
    pub big_first: Option<bool>,
    pub vroom: Option<bool>,
    pub animate: Option<AnimateOption>,
}

impl LayoutOptions {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Fill every unset field with its default. Pure, never fails.
    pub fn resolve(self) -> LayoutConfig {
        LayoutConfig {
            max_ratio: self.max_ratio.unwrap_or(DEFAULT_MAX_RATIO),
            min_ratio: self.min_ratio.unwrap_or(DEFAULT_MIN_RATIO),
            fixed_ratio: self.fixed_ratio.unwrap_or(false),
            big_class: self
                .big_class
                .unwrap_or_else(|| DEFAULT_BIG_CLASS.to_string()),
            big_percentage: self.big_percentage.unwrap_or(DEFAULT_BIG_PERCENTAGE),
            big_max_ratio: self.big_max_ratio.unwrap_or(DEFAULT_MAX_RATIO),
            big_min_ratio: self.big_min_ratio.unwrap_or(DEFAULT_MIN_RATIO),
            big_fixed_ratio: self.big_fixed_ratio.unwrap_or(false),
            big_first: self.big_first.unwrap_or(true),
            vroom: self.vroom.unwrap_or(false),
            animate: self.animate.and_then(AnimateOption::resolve),
        }
    }

    /// Resolve defaults and validate in one step.
    pub fn into_config(self) -> Result<LayoutConfig, ConfigError> {
        let config = self.resolve();
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn defaults_match_documented_table() {
        let config = LayoutConfig::default();
        assert_eq!(config.max_ratio, 1.5);
        assert_eq!(config.min_ratio, 0.5625);
        assert!(!config.fixed_ratio);
        assert_eq!(config.big_percentage, 0.8);
        assert_eq!(config.big_max_ratio, 1.5);
        assert_eq!(config.big_min_ratio, 0.5625);
        assert!(!config.big_fixed_ratio);
        assert!(config.big_first);
        assert!(!config.vroom);
        assert!(config.animate.is_none());
        assert_eq!(config.big_class, "OT_big");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn json_options_override_only_given_fields() {
        let options =
            LayoutOptions::from_json(r#"{"maxRatio": 2.0, "bigFirst": false, "vroom": true}"#)
                .unwrap();
        let config = options.into_config().unwrap();
        assert_eq!(config.max_ratio, 2.0);
        assert_eq!(config.min_ratio, DEFAULT_MIN_RATIO);
        assert!(!config.big_first);
        assert!(config.vroom);
    }

    #[test]
    fn animate_accepts_bool_or_object() {
        let off = LayoutOptions::from_json(r#"{"animate": false}"#).unwrap().resolve();
        assert!(off.animate.is_none());

        let on = LayoutOptions::from_json(r#"{"animate": true}"#).unwrap().resolve();
        assert_eq!(on.animate, Some(Animation::default()));

        let custom = LayoutOptions::from_json(r#"{"animate": {"duration": 350}}"#)
            .unwrap()
            .resolve();
        let animation = custom.animate.unwrap();
        assert_eq!(animation.duration, Duration::from_millis(350));
        assert_eq!(animation.easing, "swing");
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let options = LayoutOptions {
            min_ratio: Some(2.0),
            max_ratio: Some(1.0),
            ..LayoutOptions::default()
        };
        assert_eq!(
            options.into_config(),
            Err(ConfigError::InvertedBounds {
                tier: "small",
                min: 2.0,
                max: 1.0
            })
        );

        let big = LayoutOptions {
            big_min_ratio: Some(1.6),
            ..LayoutOptions::default()
        };
        assert!(matches!(
            big.into_config(),
            Err(ConfigError::InvertedBounds { tier: "big", .. })
        ));
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let percentage = LayoutOptions {
            big_percentage: Some(1.5),
            ..LayoutOptions::default()
        };
        assert_eq!(
            percentage.into_config(),
            Err(ConfigError::BigPercentage(1.5))
        );

        let ratio = LayoutOptions {
            max_ratio: Some(0.0),
            ..LayoutOptions::default()
        };
        assert!(matches!(
            ratio.into_config(),
            Err(ConfigError::InvalidRatio { field: "maxRatio", .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = LayoutOptions::from_json("{\"maxRatio\": \"tall\"}").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn completion_hook_fires_on_notify() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let animation = Animation::default().with_completion(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        animation.notify_complete();
        animation.clone().notify_complete();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }
}
