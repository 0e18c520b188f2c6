//! Observation sources: seeded standard-normal draws and text files.

use std::path::Path;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Seeded RNG, or one seeded from the OS when `seed` is `None`.
pub fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Draws `n` independent standard-normal observations.
pub fn standard_normal<R: Rng>(n: usize, rng: &mut R) -> Vec<f64> {
    (0..n).map(|_| rng.sample(StandardNormal)).collect()
}

/// Reads one observation per line. Blank lines and `#` comments are skipped.
pub fn read_observations(path: &Path) -> Result<Vec<f64>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read observations: {}", path.display()))?;
    parse_observations(&text).with_context(|| format!("in {}", path.display()))
}

fn parse_observations(text: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let content = line.split('#').next().unwrap_or("").trim();
        if content.is_empty() {
            continue;
        }
        let value: f64 = content
            .parse()
            .with_context(|| format!("line {}: cannot parse {content:?} as a number", i + 1))?;
        values.push(value);
    }
    Ok(values)
}
