//! Core engines for the financial coaching portal: profile sections,
//! completion tracking, the template-driven wizard, and the field
//! resolution/export engine used by the coach-side viewer.

pub mod config;
pub mod error;
pub mod profile;
pub mod telemetry;
