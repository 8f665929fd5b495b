// Cinematch: content-based movie and series recommendations
//
// This is the library root. Each module corresponds to a major subsystem
// of the recommendation pipeline.

pub mod catalog;
pub mod config;
pub mod output;
pub mod recommend;
pub mod scoring;
pub mod sentiment;
pub mod vectors;
