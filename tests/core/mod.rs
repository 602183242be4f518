//! Core module tests for non-UI functionality
//!
//! Tests for:
//! - Unit conversions and formatting
//! - Settings persistence and shared configuration
//! - Chart data preparation and configuration
//! - Zone summaries and color resolution
//! - Theme resolution
//! - Debounce timers

pub mod charts_tests;
pub mod debounce_tests;
pub mod settings_tests;
pub mod units_tests;
