use serde::{Deserialize, Serialize};

use crate::core::error::ConfigError;
use crate::extensions::easing::Easing;

/// Tuning for a [`ScrollGate`](crate::ScrollGate).
/// Loaded from JSON by the embedding page; every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Shortest transition animation (default: 650).
    pub min_duration_ms: f64,
    /// Longest transition animation (default: 1400).
    pub max_duration_ms: f64,
    /// Fixed part of the duration estimate, before clamping (default: 600).
    pub base_duration_ms: f64,
    /// Duration added per pixel of travel, before clamping (default: 0.5).
    pub ms_per_px: f64,
    /// Advisory duration. Stands in for `base_duration_ms`; travel still
    /// adds to it and the result is clamped.
    pub duration_hint_ms: Option<f64>,
    /// Grace window after an animation during which input stays locked (default: 350).
    pub tail_ms: f64,
    /// Ignored down-gestures required before leaving a hold slide (default: 2).
    pub hold_threshold: u32,
    /// Tall slides that apply the hold rule (default: first slide only).
    pub hold_slides: Vec<usize>,
    /// Swipes shorter than this are noise (default: 40).
    pub touch_min_distance: f64,
    /// Viewports at or below this width are compact and disable the gate (default: 811).
    pub compact_max_width: f64,
    /// Tolerance for every geometry comparison (default: 1).
    pub edge_epsilon: f64,
    /// A slide counts as tall once it exceeds the viewport by more than this (default: 2).
    pub tall_margin: f64,
    pub easing: Easing,
    /// Step with PageUp/PageDown/arrow keys/Space (default: true).
    pub keyboard: bool,
    /// Extra class added to the container while the gate is active.
    pub container_class: Option<String>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            min_duration_ms: 650.0,
            max_duration_ms: 1400.0,
            base_duration_ms: 600.0,
            ms_per_px: 0.5,
            duration_hint_ms: None,
            tail_ms: 350.0,
            hold_threshold: 2,
            hold_slides: vec![0],
            touch_min_distance: 40.0,
            compact_max_width: 811.0,
            edge_epsilon: 1.0,
            tall_margin: 2.0,
            easing: Easing::SineInOut,
            keyboard: true,
            container_class: None,
        }
    }
}

impl GateConfig {
    /// Parse and validate a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GateConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let finite = [
            self.min_duration_ms,
            self.max_duration_ms,
            self.base_duration_ms,
            self.ms_per_px,
            self.tail_ms,
            self.touch_min_distance,
            self.compact_max_width,
            self.edge_epsilon,
            self.tall_margin,
        ];
        if finite.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(ConfigError::Invalid("numeric fields must be finite and non-negative"));
        }
        if self.min_duration_ms > self.max_duration_ms {
            return Err(ConfigError::Invalid("min_duration_ms exceeds max_duration_ms"));
        }
        if self.duration_hint_ms.is_some_and(|h| !h.is_finite() || h < 0.0) {
            return Err(ConfigError::Invalid("duration_hint_ms must be finite and non-negative"));
        }
        Ok(())
    }

    /// Animation duration for a scroll of `distance` pixels. Longer travel
    /// always animates at least as long as shorter travel.
    pub fn duration_for(&self, distance: f64) -> f64 {
        let distance = if distance.is_finite() { distance.abs() } else { 0.0 };
        let base = self.duration_hint_ms.unwrap_or(self.base_duration_ms);
        (base + distance * self.ms_per_px).clamp(self.min_duration_ms, self.max_duration_ms)
    }

    pub fn is_hold_slide(&self, index: usize) -> bool {
        self.hold_slides.contains(&index)
    }

    /// Whether a viewport of `width` pixels is compact.
    pub fn is_compact_width(&self, width: f64) -> bool {
        width <= self.compact_max_width
    }

    /// `matchMedia` query equivalent to [`GateConfig::is_compact_width`].
    pub fn compact_media_query(&self) -> String {
        format!("(max-width: {}px)", self.compact_max_width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = GateConfig::from_json("{}").unwrap();
        assert_eq!(config, GateConfig::default());
        assert_eq!(config.hold_slides, vec![0]);
    }

    #[test]
    fn parse_partial_config() {
        let json = r#"{
            "tail_ms": 200,
            "hold_slides": [0, 3],
            "easing": "cubic_in_out",
            "container_class": "gate-on"
        }"#;
        let config = GateConfig::from_json(json).unwrap();
        assert_eq!(config.tail_ms, 200.0);
        assert!(config.is_hold_slide(3));
        assert!(!config.is_hold_slide(1));
        assert_eq!(config.easing, Easing::CubicInOut);
        assert_eq!(config.container_class.as_deref(), Some("gate-on"));
        assert_eq!(config.min_duration_ms, 650.0);
    }

    #[test]
    fn rejects_inverted_duration_range() {
        let err = GateConfig::from_json(r#"{ "min_duration_ms": 2000 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = GateConfig::from_json("{ tail_ms: }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn duration_is_distance_based_and_clamped() {
        let config = GateConfig::default();
        assert_eq!(config.duration_for(10.0), 650.0);
        assert_eq!(config.duration_for(800.0), 1000.0);
        assert_eq!(config.duration_for(-800.0), 1000.0);
        assert_eq!(config.duration_for(1000.0), 1100.0);
        assert_eq!(config.duration_for(10_000.0), 1400.0);
        assert_eq!(config.duration_for(f64::NAN), 650.0);
    }

    #[test]
    fn duration_hint_only_replaces_the_base() {
        let config = GateConfig { duration_hint_ms: Some(650.0), ..GateConfig::default() };
        assert_eq!(config.duration_for(200.0), 750.0);
        assert_eq!(config.duration_for(5000.0), 1400.0);

        let slow = GateConfig { duration_hint_ms: Some(3000.0), ..GateConfig::default() };
        assert_eq!(slow.duration_for(10.0), 1400.0);
    }

    #[test]
    fn compact_breakpoint() {
        let config = GateConfig::default();
        assert!(config.is_compact_width(768.0));
        assert!(config.is_compact_width(811.0));
        assert!(!config.is_compact_width(812.0));
        assert!(!config.is_compact_width(1024.0));
        assert_eq!(config.compact_media_query(), "(max-width: 811px)");
    }
}
