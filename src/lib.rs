//! Indoor weather station simulator.
//!
//! Reads a nearby outdoor reference station, synthesizes a plausible indoor
//! reading and uploads it to a personal-weather-station ingestion endpoint.

pub mod config;
pub mod controller;
pub mod domain;
pub mod outdoor;
pub mod report;
pub mod simulation;
pub mod telemetry;
pub mod utils;
