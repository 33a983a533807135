#[cfg(feature = "mimalloc-global")]
#[global_allocator]
static GLOBAL_ALLOCATOR: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::error::Error;
use std::path::PathBuf;
use std::time::Instant;

use knot_grid::disk::{GridBuilder, GridConfig, RegionMap};
use knot_grid::knot_hash;

const USAGE: &str = "usage: knot-grid (--key KEY | --input PATH | --hash TEXT) \
                     [--threads N] [--max-threads N] [--show N]";

enum KeySource {
    Literal(String),
    File(PathBuf),
}

struct MainArgs {
    config: GridConfig,
    key: Option<KeySource>,
    hash: Option<String>,
    show: usize,
}

fn parse_args() -> MainArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut config = GridConfig::default();
    let mut key = None;
    let mut hash = None;
    let mut show = 0;
    let next_arg = |i: usize, flag: &str| -> &str {
        args.get(i)
            .map(String::as_str)
            .unwrap_or_else(|| panic!("{flag} requires a value\n{USAGE}"))
    };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--key" => {
                i += 1;
                key = Some(KeySource::Literal(next_arg(i, "--key").to_owned()));
            }
            "--input" => {
                i += 1;
                key = Some(KeySource::File(PathBuf::from(next_arg(i, "--input"))));
            }
            "--hash" => {
                i += 1;
                hash = Some(next_arg(i, "--hash").to_owned());
            }
            "--threads" => {
                i += 1;
                let n: usize = next_arg(i, "--threads")
                    .parse()
                    .expect("--threads requires a positive integer");
                config = config.thread_count(n);
            }
            "--max-threads" => {
                i += 1;
                let n: usize = next_arg(i, "--max-threads")
                    .parse()
                    .expect("--max-threads requires a positive integer");
                config = config.max_threads(n);
            }
            "--show" => {
                i += 1;
                show = next_arg(i, "--show")
                    .parse()
                    .expect("--show requires a non-negative integer");
            }
            other => panic!("unknown argument: {other}\n{USAGE}"),
        }
        i += 1;
    }
    if key.is_none() && hash.is_none() {
        panic!("no key given\n{USAGE}");
    }
    MainArgs {
        config,
        key,
        hash,
        show,
    }
}

fn read_key(source: KeySource) -> std::io::Result<String> {
    match source {
        KeySource::Literal(key) => Ok(key),
        KeySource::File(path) => {
            let key = std::fs::read_to_string(&path)?.trim().to_owned();
            log::info!("read key from {}", path.display());
            Ok(key)
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = parse_args();

    if let Some(text) = args.hash {
        println!("{}", knot_hash(text.as_bytes()));
    }
    let Some(source) = args.key else {
        return Ok(());
    };
    let key = read_key(source)?;

    let builder = GridBuilder::with_config(args.config)?;

    let start = Instant::now();
    let (grid, used) = builder.build(&key);
    let build_ms = start.elapsed().as_secs_f64() * 1000.0;

    let start = Instant::now();
    let regions = RegionMap::label(&grid);
    let label_ms = start.elapsed().as_secs_f64() * 1000.0;

    log::info!(
        "grid built in {build_ms:.3} ms on {} threads, labeled in {label_ms:.3} ms",
        builder.thread_count()
    );

    if args.show > 0 {
        print!("{}", grid.render(args.show, args.show));
    }
    println!("Used squares: {used}");
    println!("Regions: {}", regions.count());
    Ok(())
}
