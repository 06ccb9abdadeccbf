use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extensions::curve::KeyCurve;
use crate::extensions::easing::EasingMode;
use crate::extensions::path::{ArcParams, PathMode};

/// Per-clip tween settings, as persisted by the host timeline asset.
/// Loaded from JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TweenConfig {
    /// Drive the object's position (default: true).
    pub tween_position: bool,
    /// Drive the object's rotation (default: true).
    pub tween_rotation: bool,
    /// Progress shaping applied before both channels.
    pub easing: EasingMode,
    /// Used only when `easing` is `Custom`. Must run from (0,0) to (1,1).
    pub custom_curve: KeyCurve,
    /// Trajectory shape.
    pub path: PathMode,
    /// Arc peak above the start for `ParabolaByHeight` (default: 3).
    pub para_height: f32,
    /// Downward acceleration for `ParabolaByGravity` (default: 10).
    pub para_gravity: f32,
}

impl Default for TweenConfig {
    fn default() -> Self {
        Self {
            tween_position: true,
            tween_rotation: true,
            easing: EasingMode::Linear,
            custom_curve: KeyCurve::default(),
            path: PathMode::Line,
            para_height: 3.0,
            para_gravity: 10.0,
        }
    }
}

/// Reasons a configuration is refused up front.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid tween config JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{name} must be positive and finite, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("custom curve must start at 0,0 and end at 1,1")]
    CurveNotNormalised,
}

impl TweenConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse and validate in one step.
    pub fn from_json_checked(json: &str) -> Result<Self, ConfigError> {
        let config = Self::from_json(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Check the parameters the selected modes will read.
    ///
    /// Evaluation tolerates every failure reported here; validation lets a
    /// host surface them once at load time instead of every frame.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.path {
            PathMode::ParabolaByHeight => positive("para_height", self.para_height)?,
            PathMode::ParabolaByGravity => positive("para_gravity", self.para_gravity)?,
            PathMode::Line => {}
        }
        if self.easing == EasingMode::Custom && !self.custom_curve.is_normalised() {
            return Err(ConfigError::CurveNotNormalised);
        }
        Ok(())
    }

    pub fn arc_params(&self) -> ArcParams {
        ArcParams {
            height: self.para_height,
            gravity: self.para_gravity,
        }
    }

    // -- Builder methods --

    pub fn with_easing(mut self, easing: EasingMode) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_custom_curve(mut self, curve: KeyCurve) -> Self {
        self.easing = EasingMode::Custom;
        self.custom_curve = curve;
        self
    }

    pub fn with_height_arc(mut self, height: f32) -> Self {
        self.path = PathMode::ParabolaByHeight;
        self.para_height = height;
        self
    }

    pub fn with_gravity_arc(mut self, gravity: f32) -> Self {
        self.path = PathMode::ParabolaByGravity;
        self.para_gravity = gravity;
        self
    }

    pub fn position_only(mut self) -> Self {
        self.tween_position = true;
        self.tween_rotation = false;
        self
    }

    pub fn rotation_only(mut self) -> Self {
        self.tween_position = false;
        self.tween_rotation = true;
        self
    }
}

fn positive(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let config = TweenConfig::from_json("{}").unwrap();
        assert_eq!(config, TweenConfig::default());
        assert!(config.tween_position && config.tween_rotation);
        assert_eq!(config.para_height, 3.0);
        assert_eq!(config.para_gravity, 10.0);
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "tween_rotation": false,
            "easing": "custom",
            "custom_curve": [
                { "time": 0.0, "value": 0.0, "out_tangent": 2.0 },
                { "time": 1.0, "value": 1.0 }
            ],
            "path": "parabola_by_gravity",
            "para_gravity": 9.8
        }"#;
        let config = TweenConfig::from_json_checked(json).unwrap();
        assert!(!config.tween_rotation);
        assert_eq!(config.easing, EasingMode::Custom);
        assert_eq!(config.path, PathMode::ParabolaByGravity);
        assert_eq!(config.custom_curve.first().unwrap().out_tangent, 2.0);
        assert_eq!(config.arc_params().gravity, 9.8);
    }

    #[test]
    fn json_round_trip_keeps_modes() {
        let config = TweenConfig::default()
            .with_easing(EasingMode::Harmonic)
            .with_height_arc(4.5);
        let back = TweenConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn validation_checks_only_active_parameters() {
        let mut config = TweenConfig { para_height: -1.0, ..Default::default() };
        assert!(config.validate().is_ok());

        config.path = PathMode::ParabolaByHeight;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive { name: "para_height", .. })
        ));

        let gravity = TweenConfig::default().with_gravity_arc(0.0);
        assert!(matches!(
            gravity.validate(),
            Err(ConfigError::NonPositive { name: "para_gravity", .. })
        ));
    }

    #[test]
    fn validation_rejects_unnormalised_custom_curve() {
        let config = TweenConfig::default().with_custom_curve(KeyCurve::linear(0.0, 0.1, 1.0, 1.0));
        assert!(matches!(config.validate(), Err(ConfigError::CurveNotNormalised)));
    }

    #[test]
    fn bad_json_is_reported() {
        let err = TweenConfig::from_json_checked(r#"{ "path": "zigzag" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
