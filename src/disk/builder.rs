//! Grid assembly: one knot hash per row, rows computed in parallel.
//!
//! Each row depends only on the key and its own index, so rows are hashed
//! independently and collected back in index order. The result is identical
//! for any thread count.

use std::sync::OnceLock;

use rayon::prelude::*;

use super::GRID_SIDE;
use super::grid::DiskGrid;
use super::row::RowBits;
use crate::error::KnotError;
use crate::knot::{KnotParams, knot_hash_with};

static PHYSICAL_CORES: OnceLock<usize> = OnceLock::new();

/// Environment override for the builder's default thread count.
pub const THREADS_ENV: &str = "KNOTGRID_THREADS";

/// Hash input for one row: `"<key>-<row>"`.
pub fn row_input(key: &str, row: usize) -> String {
    format!("{key}-{row}")
}

/// Length sequence for one row: the bytes of `"<key>-<row>"` then the suffix.
pub fn length_sequence(key: &str, row: usize) -> Vec<u8> {
    KnotParams::STANDARD.lengths_for(row_input(key, row).as_bytes())
}

/// The 128 cells of `row` for `key`.
pub fn compute_row_hash(key: &str, row: usize) -> RowBits {
    row_hash_with(key, row, &KnotParams::STANDARD)
}

#[inline]
fn row_hash_with(key: &str, row: usize, params: &KnotParams) -> RowBits {
    RowBits::from(knot_hash_with(row_input(key, row).as_bytes(), params))
}

fn build_rows(key: &str, params: &KnotParams, parallel: bool) -> (DiskGrid, usize) {
    let rows: Vec<RowBits> = if parallel {
        let mut rows = Vec::with_capacity(GRID_SIDE);
        (0..GRID_SIDE)
            .into_par_iter()
            .map(|row| row_hash_with(key, row, params))
            .collect_into_vec(&mut rows);
        rows
    } else {
        (0..GRID_SIDE)
            .map(|row| row_hash_with(key, row, params))
            .collect()
    };
    let used = rows.iter().map(|row| row.count_used() as usize).sum();
    (DiskGrid::from_rows(rows), used)
}

/// Build the full grid for `key` on the current rayon pool.
///
/// Returns the grid and its used-cell count.
pub fn build_grid(key: &str) -> (DiskGrid, usize) {
    let parallel = rayon::current_num_threads() > 1;
    let (grid, used) = build_rows(key, &KnotParams::STANDARD, parallel);
    log::debug!("built grid for {key:?}: {used} used cells");
    (grid, used)
}

#[inline]
fn physical_core_count() -> usize {
    *PHYSICAL_CORES.get_or_init(|| num_cpus::get_physical().max(1))
}

fn env_thread_count() -> Option<usize> {
    let value = std::env::var(THREADS_ENV).ok()?;
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Some(n),
        _ => {
            log::warn!("ignoring {THREADS_ENV}={value:?}: expected a positive integer");
            None
        }
    }
}

/// Resolve the thread count from a config, falling back to env, then cores.
fn resolve_thread_count(config: &GridConfig) -> usize {
    let mut threads = config
        .thread_count
        .or_else(env_thread_count)
        .unwrap_or_else(physical_core_count);
    if let Some(cap) = config.max_threads {
        threads = threads.min(cap);
    }
    threads.clamp(1, GRID_SIDE)
}

/// Configuration for a [`GridBuilder`].
///
/// `GridConfig::default()` auto-detects threads and uses the standard knot
/// parameters; customise via the builder methods.
#[derive(Clone, Debug, Default)]
pub struct GridConfig {
    /// Threads for the row pool. `None` reads `KNOTGRID_THREADS`, then
    /// falls back to the physical core count.
    pub thread_count: Option<usize>,
    /// Hard upper bound on threads.
    pub max_threads: Option<usize>,
    /// Rounds and length suffix for every row hash.
    pub params: KnotParams,
}

impl GridConfig {
    pub fn thread_count(mut self, n: usize) -> Self {
        self.thread_count = Some(n.max(1));
        self
    }

    pub fn max_threads(mut self, n: usize) -> Self {
        self.max_threads = Some(n.max(1));
        self
    }

    pub fn params(mut self, params: KnotParams) -> Self {
        self.params = params;
        self
    }
}

/// Builds grids on a dedicated thread pool.
pub struct GridBuilder {
    pool: rayon::ThreadPool,
    params: KnotParams,
}

impl GridBuilder {
    pub fn new() -> Result<Self, KnotError> {
        Self::with_config(GridConfig::default())
    }

    pub fn with_config(config: GridConfig) -> Result<Self, KnotError> {
        let threads = resolve_thread_count(&config);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|i| format!("knot-grid-{i}"))
            .build()?;
        log::debug!("grid builder using {threads} threads");
        Ok(Self {
            pool,
            params: config.params,
        })
    }

    #[inline]
    pub fn thread_count(&self) -> usize {
        self.pool.current_num_threads()
    }

    #[inline]
    pub fn params(&self) -> &KnotParams {
        &self.params
    }

    pub fn row(&self, key: &str, row: usize) -> RowBits {
        row_hash_with(key, row, &self.params)
    }

    /// Build the grid for `key` and count its used cells.
    pub fn build(&self, key: &str) -> (DiskGrid, usize) {
        let parallel = self.thread_count() > 1;
        let (grid, used) = self
            .pool
            .install(|| build_rows(key, &self.params, parallel));
        log::debug!(
            "built grid for {key:?} on {} threads: {used} used cells",
            self.thread_count()
        );
        (grid, used)
    }
}
