use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::analysis::insights::InsightThresholds;
use crate::analysis::momentum::MomentumPreset;
use crate::analysis::phase::PhaseWindow;
use crate::analysis::spell::DEFAULT_MIN_SPELL_BALLS;

pub const DEFAULT_LIMIT: usize = 10;

/// Tunables for one analysis run. Any field left out of a config file keeps its default.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub limit: usize,
    pub momentum: MomentumPreset,
    pub min_spell_balls: u32,
    pub powerplay: PhaseWindow,
    pub death: PhaseWindow,
    pub windows: Vec<PhaseWindow>,
    pub insights: InsightThresholds,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            momentum: MomentumPreset::default(),
            min_spell_balls: DEFAULT_MIN_SPELL_BALLS,
            powerplay: PhaseWindow::powerplay(),
            death: PhaseWindow::death(),
            windows: PhaseWindow::standard(),
            insights: InsightThresholds::default(),
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(s).context("Failed to parse analysis config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("Invalid config file {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        for window in self.windows.iter().chain([&self.powerplay, &self.death]) {
            if window.start > window.end {
                bail!(
                    "Phase window {} starts after it ends ({}..{})",
                    window.name,
                    window.start,
                    window.end
                );
            }
        }
        Ok(())
    }
}
