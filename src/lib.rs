//! Geometry for radial gauges: value scale, tick labels, ring segment ratios
//! and the arc generators that outline each ring segment.
//!
//! ```
//! use arcgauge::{GaugeConfig, GaugeConfigurator};
//!
//! let config = GaugeConfig::builder().max_value(100.0).build();
//! let mut gauge = GaugeConfigurator::new();
//!
//! let ticks = gauge.configure_ticks(&config)?;
//! assert_eq!(ticks.first(), Some(&0.0));
//!
//! let arc = gauge.configure_arc(&config)?;
//! let outlines: Vec<String> = arc.paths().iter().map(|path| path.to_svg()).collect();
//! assert_eq!(outlines.len(), 5);
//! # Ok::<(), arcgauge::GaugeError>(())
//! ```

pub mod arc;
pub mod config;
pub mod configurator;
pub mod error;
pub mod memo;
pub mod path;
pub mod render;
pub mod scale;
pub mod segments;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use arc::{ArcGenerator, ArcSegment};
pub use config::GaugeConfig;
pub use configurator::GaugeConfigurator;
pub use error::{GaugeError, Result};
pub use path::{Path, PathCommand};
pub use render::{Canvas, Color};
pub use scale::Scale;
pub use segments::TickData;
