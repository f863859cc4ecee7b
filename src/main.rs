#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(
    clippy::cargo,
    clippy::nursery,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::module_name_repetitions)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use glob::GlobError;
use rayon::prelude::*;
use tracing::{debug, error, info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use innings::analysis::momentum::MomentumPreset;
use innings::output::WriterMap;
use innings::{AnalysisConfig, MatchAnalyzer, MatchCache};

const ABOUT: &str = "Derives batting, bowling, partnership and momentum datasets \
                     from ball-by-ball match records.";

#[derive(Parser, Debug)]
#[command(name = "innings", about = ABOUT)]
struct Opt {
    /// A match JSON file, or a directory of them.
    #[arg(short, long)]
    input: PathBuf,

    #[arg(short, long)]
    output_dir: PathBuf,

    /// Rows kept in the batting and bowling tables per match.
    #[arg(short, long)]
    limit: Option<usize>,

    #[arg(short, long, value_enum)]
    momentum: Option<MomentumPreset>,

    /// JSON analysis config; absent fields keep their defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 300)]
    cache_ttl_secs: u64,

    #[arg(short, long)]
    verbose: bool,
}

impl Opt {
    fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_path(path)?,
            None => AnalysisConfig::default(),
        };
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if let Some(preset) = self.momentum {
            config.momentum = preset;
        }
        Ok(config)
    }
}

struct FileProcessor {
    config: AnalysisConfig,
    cache: MatchCache,
    writers: WriterMap,
}

impl FileProcessor {
    const CACHE_CAPACITY: usize = 1024;

    pub fn new(opt: &Opt) -> Result<Self> {
        Ok(Self {
            config: opt.analysis_config()?,
            cache: MatchCache::new(
                Self::CACHE_CAPACITY,
                Duration::from_secs(opt.cache_ttl_secs),
            ),
            writers: WriterMap::new(&opt.output_dir)?,
        })
    }

    fn match_files(input: &Path) -> Result<Vec<PathBuf>> {
        if input.is_file() {
            return Ok(vec![input.to_path_buf()]);
        }
        if !input.is_dir() {
            bail!("Input {} does not exist", input.display());
        }
        let pattern = input.join("*.json");
        let pattern = pattern
            .to_str()
            .with_context(|| format!("Non-UTF-8 input path {}", input.display()))?;
        let mut files = glob::glob(pattern)
            .context("Invalid input pattern")?
            .collect::<Result<Vec<PathBuf>, GlobError>>()?;
        files.par_sort();
        Ok(files)
    }

    fn match_id(path: &Path) -> String {
        path.file_stem()
            .map_or_else(|| String::from("unknown"), |s| s.to_string_lossy().into_owned())
    }

    fn process_file(&self, path: &Path) -> Result<()> {
        debug!("Processing file {}", path.display());
        let record = self.cache.get_or_load(path)?;
        let report = MatchAnalyzer::with_config(&record, self.config.clone()).report();
        self.writers
            .write_report(&Self::match_id(path), &report)
            .with_context(|| format!("Failed to write output for {}", path.display()))
    }

    pub fn process_files(&self, input: &Path) -> Result<()> {
        let files = Self::match_files(input)?;
        info!("Analyzing {} match files", files.len());
        let failures = AtomicUsize::new(0);
        files.par_iter().for_each(|f| {
            if let Err(e) = self.process_file(f) {
                error!("{:?}", e);
                failures.fetch_add(1, Ordering::Relaxed);
            }
        });
        self.writers.flush_all()?;
        let failures = failures.into_inner();
        if failures > 0 {
            warn!("{} of {} files could not be analyzed", failures, files.len());
        }
        debug!(
            "{} records cached for {:?}",
            self.cache.len(),
            self.cache.ttl()
        );
        Ok(())
    }
}

#[allow(clippy::expect_used)]
fn main() {
    let opt: Opt = Opt::parse();
    let level = if opt.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to initialize trace");

    let start = Instant::now();

    FileProcessor::new(&opt)
        .and_then(|processor| processor.process_files(&opt.input))
        .expect("Error occurred while processing files");

    let end = start.elapsed();
    info!(
        "Wrote output to {} in {:?}",
        opt.output_dir.display(),
        end
    );
}
