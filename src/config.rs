use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::error::{GaugeError, Result};

/// Declarative description of a radial gauge.
///
/// Values live in `[min_value, max_value]`; angles are in degrees, measured
/// clockwise from 12 o'clock, so the default `-90..90` sweep is the upper half
/// circle. Radial sizes are in the same unit as `width`.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GaugeConfig {
    #[builder(default = 0.0)]
    pub min_value: f64,
    #[builder(default = 1000.0)]
    pub max_value: f64,

    // Labels
    #[builder(default = 5)]
    pub max_segment_labels: usize,
    #[builder(default)]
    pub custom_segment_stops: Vec<f64>,
    #[builder(default = 5)]
    pub major_ticks: usize,

    // Ring geometry
    #[builder(default = 300.0)]
    pub width: f64,
    #[builder(default = 60.0)]
    pub ring_width: f64,
    #[builder(default = 20.0)]
    pub ring_inset: f64,
    #[builder(default = 0.0)]
    pub corner_radius: f64,
    #[builder(default = 0.0)]
    pub arc_padding: f64,

    // Sweep
    #[builder(default = -90.0)]
    pub min_angle: f64,
    #[builder(default = 90.0)]
    pub max_angle: f64,
}

impl Default for GaugeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GaugeConfig {
    /// Parses a JSON document (camelCase keys, missing keys take defaults) and
    /// validates the result.
    pub fn from_json(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Outer radius of the drawing area.
    pub fn radius(&self) -> f64 {
        self.width / 2.0
    }

    /// Angular sweep in degrees.
    pub fn angle_range(&self) -> f64 {
        self.max_angle - self.min_angle
    }

    /// Checks the invariants every derivation relies on.
    pub fn validate(&self) -> Result<()> {
        let (min, max) = (self.min_value, self.max_value);
        if !(min.is_finite() && max.is_finite() && min < max) {
            return Err(GaugeError::InvalidRange { min, max });
        }

        let (min_angle, max_angle) = (self.min_angle, self.max_angle);
        if !(min_angle.is_finite() && max_angle.is_finite() && min_angle < max_angle) {
            return Err(GaugeError::InvalidAngles {
                min: min_angle,
                max: max_angle,
            });
        }

        for (name, value) in [
            ("width", self.width),
            ("ring width", self.ring_width),
            ("ring inset", self.ring_inset),
            ("corner radius", self.corner_radius),
            ("arc padding", self.arc_padding),
        ] {
            check_dimension(name, value)?;
        }
        if self.width == 0.0 {
            return Err(GaugeError::InvalidDimension {
                name: "width",
                value: self.width,
            });
        }
        let inner_radius = self.radius() - self.ring_width - self.ring_inset;
        if inner_radius < 0.0 {
            return Err(GaugeError::InvalidDimension {
                name: "inner radius",
                value: inner_radius,
            });
        }

        for (index, &value) in self.custom_segment_stops.iter().enumerate() {
            if !(value >= min && value <= max) {
                return Err(GaugeError::StopOutOfRange { value, min, max });
            }
            if index > 0 && value <= self.custom_segment_stops[index - 1] {
                return Err(GaugeError::NonMonotonicStops { index });
            }
        }

        Ok(())
    }
}

pub(crate) fn check_dimension(name: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(GaugeError::InvalidDimension { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = GaugeConfig::default();
        assert_eq!(config.max_value, 1000.0);
        assert_eq!(config.major_ticks, 5);
        assert!(config.custom_segment_stops.is_empty());
        config.validate().unwrap();
    }

    #[test]
    fn builder_overrides_defaults() {
        let config = GaugeConfig::builder()
            .max_value(100.0)
            .custom_segment_stops(vec![0.0, 50.0, 100.0])
            .build();
        assert_eq!(config.max_value, 100.0);
        assert_eq!(config.width, 300.0);
        assert_eq!(config.custom_segment_stops.len(), 3);
    }

    #[test]
    fn rejects_inverted_range() {
        let config = GaugeConfig::builder().min_value(10.0).max_value(10.0).build();
        assert!(matches!(
            config.validate(),
            Err(GaugeError::InvalidRange { .. })
        ));
    }

    #[test]
    fn rejects_inverted_angles() {
        let config = GaugeConfig::builder().min_angle(90.0).max_angle(-90.0).build();
        assert!(matches!(
            config.validate(),
            Err(GaugeError::InvalidAngles { .. })
        ));
    }

    #[test]
    fn rejects_unordered_stops() {
        let config = GaugeConfig::builder()
            .max_value(100.0)
            .custom_segment_stops(vec![10.0, 40.0, 40.0])
            .build();
        assert!(matches!(
            config.validate(),
            Err(GaugeError::NonMonotonicStops { index: 2 })
        ));
    }

    #[test]
    fn rejects_stop_outside_domain() {
        let config = GaugeConfig::builder()
            .max_value(100.0)
            .custom_segment_stops(vec![10.0, 140.0])
            .build();
        assert!(matches!(
            config.validate(),
            Err(GaugeError::StopOutOfRange { value, .. }) if value == 140.0
        ));
    }

    #[test]
    fn rejects_negative_ring_width() {
        let config = GaugeConfig::builder().ring_width(-1.0).build();
        assert!(matches!(
            config.validate(),
            Err(GaugeError::InvalidDimension { name: "ring width", .. })
        ));
    }

    #[test]
    fn rejects_zero_width() {
        let config = GaugeConfig::builder().width(0.0).ring_width(0.0).ring_inset(0.0).build();
        assert!(matches!(
            config.validate(),
            Err(GaugeError::InvalidDimension { name: "width", .. })
        ));
    }

    #[test]
    fn rejects_ring_wider_than_radius() {
        let config = GaugeConfig::builder().width(100.0).ring_width(40.0).ring_inset(20.0).build();
        assert!(matches!(
            config.validate(),
            Err(GaugeError::InvalidDimension { name: "inner radius", value }) if value == -10.0
        ));
    }

    #[test]
    fn parses_camel_case_json() {
        let config = GaugeConfig::from_json(
            r#"{"maxValue": 100, "customSegmentStops": [0, 25, 100], "ringWidth": 20}"#,
        )
        .unwrap();
        assert_eq!(config.max_value, 100.0);
        assert_eq!(config.ring_width, 20.0);
        assert_eq!(config.custom_segment_stops, vec![0.0, 25.0, 100.0]);
        assert_eq!(config.min_angle, -90.0);
    }

    #[test]
    fn json_errors_are_reported() {
        assert!(matches!(
            GaugeConfig::from_json("{\"maxValue\": \"high\"}"),
            Err(GaugeError::Config(_))
        ));
        assert!(matches!(
            GaugeConfig::from_json("{\"minValue\": 5, \"maxValue\": 1}"),
            Err(GaugeError::InvalidRange { .. })
        ));
    }
}
