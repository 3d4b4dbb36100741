//! Per-gauge derivation of scale, ticks, segment ratios and arc generators.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::arc::ArcGenerator;
use crate::config::{check_dimension, GaugeConfig};
use crate::error::Result;
use crate::memo::Memo;
use crate::scale::{calculate_scale, calculate_ticks, Scale};
use crate::segments::{calculate_segment_stops, even_tick_data, TickData};

type BorderKey = (GaugeConfig, f64, f64, f64);

/// Derives gauge geometry from a [`GaugeConfig`], caching the last result of
/// each derivation.
///
/// Create one per gauge. Every method validates the config and, when it equals
/// the previous input, returns the cached value.
#[derive(Debug, Default)]
pub struct GaugeConfigurator {
    scale: Memo<GaugeConfig, Scale>,
    ticks: Memo<GaugeConfig, Vec<f64>>,
    tick_data: Memo<GaugeConfig, TickData>,
    arc: Memo<GaugeConfig, ArcGenerator>,
    border_arc: Memo<BorderKey, ArcGenerator>,
}

impl GaugeConfigurator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Linear scale over `[min_value, max_value]` split into
    /// `max_segment_labels` segments.
    pub fn configure_scale(&mut self, config: &GaugeConfig) -> Result<Scale> {
        self.scale.get_or_try_insert_with(config, || {
            config.validate()?;
            let scale = calculate_scale(config.min_value, config.max_value, config.max_segment_labels);
            debug!(?scale, "configured scale");
            Ok(scale)
        })
    }

    /// Label values. Custom segment stops replace the computed ticks whenever
    /// they are present and segment labels are enabled.
    pub fn configure_ticks(&mut self, config: &GaugeConfig) -> Result<Vec<f64>> {
        let scale = self.configure_scale(config)?;
        self.ticks.get_or_try_insert_with(config, || {
            let mut ticks = calculate_ticks(&scale, config.max_segment_labels);
            if !config.custom_segment_stops.is_empty() && config.max_segment_labels != 0 {
                trace!("custom segment stops override computed ticks");
                ticks = config.custom_segment_stops.clone();
            }
            debug!(count = ticks.len(), "configured ticks");
            Ok(ticks)
        })
    }

    /// Angular share of each ring segment: `major_ticks` even shares, or the
    /// spans between custom segment stops.
    pub fn configure_tick_data(&mut self, config: &GaugeConfig) -> Result<TickData> {
        self.tick_data.get_or_try_insert_with(config, || {
            config.validate()?;
            let tick_data = calculate_segment_stops(
                even_tick_data(config.major_ticks),
                &config.custom_segment_stops,
                config.min_value,
                config.max_value,
            );
            debug!(segments = tick_data.len(), "configured tick data");
            Ok(Arc::from(tick_data))
        })
    }

    /// Generator for the main ring, with rounded corners and padding between
    /// segments.
    pub fn configure_arc(&mut self, config: &GaugeConfig) -> Result<ArcGenerator> {
        let tick_data = self.configure_tick_data(config)?;
        self.arc.get_or_try_insert_with(config, || {
            let r = config.radius();
            let arc = ArcGenerator::new(tick_data, config.min_angle, config.max_angle)
                .inner_radius(r - config.ring_width - config.ring_inset)
                .outer_radius(r - config.ring_inset)
                .corner_radius(config.corner_radius)
                .pad_angle(config.arc_padding);
            debug!(radii = ?arc.radii(), "configured arc");
            Ok(arc)
        })
    }

    /// Generator for a border ring of `border_width` inside the main ring.
    ///
    /// Rounding and padding are always off for the border; `corner_radius`
    /// and `arc_padding` are accepted for call-site symmetry only.
    pub fn border_arc(
        &mut self,
        config: &GaugeConfig,
        corner_radius: f64,
        arc_padding: f64,
        border_width: f64,
    ) -> Result<ArcGenerator> {
        check_dimension("border width", border_width)?;
        let tick_data = self.configure_tick_data(config)?;
        let key = (config.clone(), corner_radius, arc_padding, border_width);
        self.border_arc.get_or_try_insert_with(&key, || {
            if corner_radius != 0.0 || arc_padding != 0.0 {
                warn!(corner_radius, arc_padding, "border arc ignores rounding and padding");
            }
            let r = config.radius();
            let arc = ArcGenerator::new(tick_data, config.min_angle, config.max_angle)
                .inner_radius(r - config.ring_inset)
                .outer_radius(r - config.ring_inset - border_width);
            debug!(radii = ?arc.radii(), "configured border arc");
            Ok(arc)
        })
    }

    /// Needle angle in radians for `value`, clamped to the value domain.
    pub fn needle_angle(&mut self, config: &GaugeConfig, value: f64) -> Result<f64> {
        let scale = self.configure_scale(config)?;
        let ratio = scale.normalize(value.clamp(config.min_value, config.max_value));
        Ok((config.min_angle + ratio * config.angle_range()).to_radians())
    }

    /// Cache hits across all derivations.
    pub fn cache_hits(&self) -> u64 {
        self.scale.hits()
            + self.ticks.hits()
            + self.tick_data.hits()
            + self.arc.hits()
            + self.border_arc.hits()
    }

    /// Drops every cached derivation.
    pub fn reset(&mut self) {
        self.scale.clear();
        self.ticks.clear();
        self.tick_data.clear();
        self.arc.clear();
        self.border_arc.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GaugeError;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn example() -> GaugeConfig {
        GaugeConfig::builder()
            .min_value(0.0)
            .max_value(100.0)
            .max_segment_labels(5)
            .major_ticks(5)
            .width(200.0)
            .ring_width(20.0)
            .ring_inset(5.0)
            .corner_radius(2.0)
            .arc_padding(0.02)
            .min_angle(-90.0)
            .max_angle(90.0)
            .build()
    }

    #[test]
    fn scale_spans_the_domain() {
        let mut configurator = GaugeConfigurator::new();
        let scale = configurator.configure_scale(&example()).unwrap();
        assert_eq!(scale.normalize(0.0), 0.0);
        assert_eq!(scale.normalize(100.0), 1.0);
        assert_eq!(scale.segments(), 5);
    }

    #[test]
    fn computed_ticks_without_custom_stops() {
        let mut configurator = GaugeConfigurator::new();
        let ticks = configurator.configure_ticks(&example()).unwrap();
        assert_eq!(ticks, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
    }

    #[test]
    fn custom_stops_replace_ticks() {
        let mut config = example();
        config.custom_segment_stops = vec![10.0, 40.0, 70.0];
        config.max_segment_labels = 3;
        let mut configurator = GaugeConfigurator::new();
        assert_eq!(configurator.configure_ticks(&config).unwrap(), vec![10.0, 40.0, 70.0]);
    }

    #[test]
    fn custom_stops_ignored_without_labels() {
        let mut config = example();
        config.custom_segment_stops = vec![10.0, 40.0, 70.0];
        config.max_segment_labels = 0;
        let mut configurator = GaugeConfigurator::new();
        assert!(configurator.configure_ticks(&config).unwrap().is_empty());
    }

    #[test]
    fn tick_data_is_even() {
        let mut configurator = GaugeConfigurator::new();
        let tick_data = configurator.configure_tick_data(&example()).unwrap();
        assert_eq!(tick_data.len(), 5);
        for ratio in tick_data.iter() {
            assert_relative_eq!(*ratio, 0.2);
        }
    }

    #[test]
    fn zero_major_ticks_yields_no_segments() {
        let mut config = example();
        config.major_ticks = 0;
        let mut configurator = GaugeConfigurator::new();
        assert!(configurator.configure_tick_data(&config).unwrap().is_empty());
        assert!(configurator.configure_arc(&config).unwrap().is_empty());
    }

    #[test]
    fn main_arc_geometry() {
        let mut configurator = GaugeConfigurator::new();
        let arc = configurator.configure_arc(&example()).unwrap();
        assert_eq!(arc.radii(), (75.0, 95.0));
        assert_eq!(arc.rounding(), (2.0, 0.02));
        assert_relative_eq!(arc.segment(0).start_angle, -FRAC_PI_2);
        assert_relative_eq!(arc.segment(4).end_angle, FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn border_arc_forces_square_corners() {
        let mut configurator = GaugeConfigurator::new();
        let border = configurator.border_arc(&example(), 3.0, 0.05, 4.0).unwrap();
        assert_eq!(border.radii(), (95.0, 91.0));
        assert_eq!(border.rounding(), (0.0, 0.0));
        assert_eq!(border.len(), 5);
    }

    #[test]
    fn border_width_must_be_positive() {
        let mut configurator = GaugeConfigurator::new();
        assert!(matches!(
            configurator.border_arc(&example(), 0.0, 0.0, f64::NAN),
            Err(GaugeError::InvalidDimension { name: "border width", .. })
        ));
    }

    #[test]
    fn equal_configs_hit_the_cache() {
        let mut configurator = GaugeConfigurator::new();
        let first = configurator.configure_arc(&example()).unwrap();
        let hits = configurator.cache_hits();
        let second = configurator.configure_arc(&example()).unwrap();
        assert_eq!(first, second);
        // tick data and arc both hit
        assert_eq!(configurator.cache_hits(), hits + 2);
    }

    #[test]
    fn changed_config_recomputes() {
        let mut configurator = GaugeConfigurator::new();
        let first = configurator.configure_tick_data(&example()).unwrap();
        let mut config = example();
        config.major_ticks = 4;
        let second = configurator.configure_tick_data(&config).unwrap();
        assert_eq!(first.len(), 5);
        assert_eq!(second.len(), 4);
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = example();
        config.max_value = -1.0;
        let mut configurator = GaugeConfigurator::new();
        assert!(matches!(
            configurator.configure_arc(&config),
            Err(GaugeError::InvalidRange { .. })
        ));
        assert!(configurator.configure_ticks(&config).is_err());
    }

    #[test]
    fn needle_angle_clamps() {
        let mut configurator = GaugeConfigurator::new();
        let config = example();
        assert_relative_eq!(configurator.needle_angle(&config, 50.0).unwrap(), 0.0);
        assert_relative_eq!(configurator.needle_angle(&config, -10.0).unwrap(), -FRAC_PI_2);
        assert_relative_eq!(configurator.needle_angle(&config, 250.0).unwrap(), FRAC_PI_2);
    }

    #[test]
    fn reset_empties_caches() {
        let mut configurator = GaugeConfigurator::new();
        configurator.configure_scale(&example()).unwrap();
        configurator.reset();
        configurator.configure_scale(&example()).unwrap();
        assert_eq!(configurator.cache_hits(), 0);
    }
}
