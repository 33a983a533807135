#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use rand::RngCore;
use rand::SeedableRng;
use std::time::Instant;
use knot_grid::disk::{DiskGrid, GRID_SIDE, GridBuilder, GridConfig, RegionMap};

const KEY: &str = "flqrgnkx";
const BUILD_ITERATIONS: u32 = 20;
const LABEL_ITERATIONS: u32 = 200;

fn bench_build(threads: usize) -> (f64, usize) {
    let builder = GridBuilder::with_config(GridConfig::default().thread_count(threads))
        .expect("failed to build bench thread pool");
    let mut used = 0;
    let start = Instant::now();
    for _ in 0..BUILD_ITERATIONS {
        let (grid, count) = builder.build(KEY);
        std::hint::black_box(&grid);
        used = count;
    }
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    (total_ms / BUILD_ITERATIONS as f64, used)
}

fn random_grid(density: f64, seed: u64) -> DiskGrid {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let threshold = (u64::MAX as f64 * density) as u64;
    let mut grid = DiskGrid::empty();
    for y in 0..GRID_SIDE {
        for x in 0..GRID_SIDE {
            if rng.next_u64() <= threshold {
                grid.set_used(x, y, true);
            }
        }
    }
    grid
}

fn bench_label(grid: &DiskGrid) -> (f64, usize) {
    let mut regions = 0;
    let start = Instant::now();
    for _ in 0..LABEL_ITERATIONS {
        regions = std::hint::black_box(RegionMap::label(grid)).count();
    }
    let total_ms = start.elapsed().as_secs_f64() * 1000.0;
    (total_ms / LABEL_ITERATIONS as f64, regions)
}

fn main() {
    env_logger::init();
    let max_threads = num_cpus::get_physical().max(1);

    println!("{:<10} {:>10} {:>12}", "Threads", "Used", "Build(ms)");
    println!("{}", "-".repeat(34));
    let mut threads = 1;
    while threads <= max_threads {
        let (avg_ms, used) = bench_build(threads);
        println!("{threads:<10} {used:>10} {avg_ms:>12.4}");
        threads *= 2;
    }

    println!();
    println!("{:<10} {:>10} {:>10} {:>12}", "Density", "Used", "Regions", "Label(ms)");
    println!("{}", "-".repeat(45));
    for density in [0.10, 0.42, 0.50, 0.59, 0.83] {
        let grid = random_grid(density, 0x5EED_1234_ABCD_EF01);
        let (avg_ms, regions) = bench_label(&grid);
        println!(
            "{:<10} {:>10} {:>10} {:>12.4}",
            format!("{density:.2}"),
            grid.used_count(),
            regions,
            avg_ms
        );
    }
}
