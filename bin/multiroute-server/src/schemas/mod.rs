//! Request / response DTO types for the HTTP surface.
//!
//! Result shapes live in `multiroute-core`; only inbound bodies are defined
//! here.

pub mod ai;
