//! Chart preparation, configuration and registry.
//!
//! The pipeline is: [`data::prepare`] filters and maps records into
//! unit-converted points and decimates them to the configured budget,
//! [`config::build`] wraps a prepared series in a declarative config
//! (axes, colors, tooltip reverse-conversion), and [`registry::ChartRegistry`]
//! holds the results for painting, bulk destroy and bulk export.

pub mod config;
pub mod data;
pub mod registry;
