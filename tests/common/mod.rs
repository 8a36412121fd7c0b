#![allow(dead_code)]

pub mod synthetic_image;

use std::path::PathBuf;

/// A fresh path under the system temp dir, unique per test name and process.
pub fn temp_png(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tracing_paper_{}_{}.png", name, std::process::id()))
}
