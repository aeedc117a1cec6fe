use std::hint::black_box;
use std::time::Instant;

use clap::Parser;
use color_print::cprintln;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

use emu::hooks::{steps::Steps, trace::Trace};
use treejit::{avl::AvlTree, compile_with, BenchConfig, Error, Order, SearchTree, NOT_FOUND};

#[derive(Parser, Debug)]
#[clap(
    name = "treejit",
    version = "v1.0.0",
    about = "Compile a search tree into branch code and compare lookup times",
    allow_negative_numbers = true
)]
struct Args {
    /// YAML file with benchmark parameters
    #[arg(short, long)]
    config: Option<String>,

    /// Number of keys in the tree
    #[arg(short = 'n', long)]
    size: Option<usize>,

    /// Number of random lookups
    #[arg(short, long)]
    lookups: Option<usize>,

    #[arg(short, long)]
    seed: Option<u64>,

    /// Traversal used to flatten the tree
    #[arg(long, value_enum)]
    order: Option<Order>,

    /// Print the compiled program
    #[arg(short, long)]
    dump: bool,

    /// Write the compiled program to a file
    #[arg(short, long)]
    output: Option<String>,

    /// Trace one lookup instruction by instruction
    #[arg(long)]
    trace: Option<i32>,
}

impl Args {
    fn config(&self) -> Result<BenchConfig, Error> {
        let base = match &self.config {
            Some(fname) => BenchConfig::load(fname)?,
            None => BenchConfig::default(),
        };
        Ok(BenchConfig {
            tree_size: self.size.unwrap_or(base.tree_size),
            lookups: self.lookups.unwrap_or(base.lookups),
            seed: self.seed.unwrap_or(base.seed),
            order: self.order.unwrap_or(base.order),
        })
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("treejit=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        cprintln!("<r,s>error</>: {}", e);
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            cprintln!("  <r>caused by</>: {}", cause);
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let cfg = args.config()?;
    tracing::info!(?cfg, "config");
    cprintln!("<s>treejit</>");

    // ------------------------------------------------------------------------
    cprintln!("<g,s>[TREE]</> {} keys", cfg.tree_size);
    let size = i32::try_from(cfg.tree_size).map_err(|_| Error::TreeTooLarge(cfg.tree_size))?;
    let tree: AvlTree = (0..size).map(|k| (k, k)).collect();
    println!(" * Height = {}", tree.height());
    println!(" * Nodes  = {}", tree.len());

    cprintln!("<g,s>[KEYS]</> {} lookups, seed {}", cfg.lookups, cfg.seed);
    let mut rng = SmallRng::seed_from_u64(cfg.seed);
    let keys: Vec<i32> = (0..cfg.lookups)
        .map(|_| match size {
            0 => 0,
            _ => rng.gen_range(0..size),
        })
        .collect();

    // ------------------------------------------------------------------------
    cprintln!("<g,s>[TREE LOOKUP]</>");
    let start = Instant::now();
    let expected: Vec<i32> = keys
        .iter()
        .map(|&k| black_box(tree.lookup(black_box(k)).unwrap_or(NOT_FOUND)))
        .collect();
    let tree_elapsed = start.elapsed();
    cprintln!(" * took <y>{:.6}</> s", tree_elapsed.as_secs_f64());

    cprintln!("<g,s>[COMPILE]</> order {}", cfg.order);
    let start = Instant::now();
    let proc = compile_with(&tree, cfg.order)?;
    let compile_elapsed = start.elapsed();
    cprintln!(
        " * {} instructions, took <y>{:.6}</> s",
        proc.program().len(),
        compile_elapsed.as_secs_f64()
    );

    cprintln!("<g,s>[COMPILED LOOKUP]</>");
    let start = Instant::now();
    let actual: Vec<i32> = keys
        .iter()
        .map(|&k| black_box(proc.call(black_box(k))))
        .collect();
    let compiled_elapsed = start.elapsed();
    cprintln!(" * took <y>{:.6}</> s", compiled_elapsed.as_secs_f64());

    for ((&key, &expected), &actual) in keys.iter().zip(&expected).zip(&actual) {
        if expected != actual {
            return Err(Error::Mismatch {
                key,
                expected,
                actual,
            });
        }
    }
    cprintln!(" * <g>all {} lookups agree</>", keys.len());

    // ------------------------------------------------------------------------
    if args.dump {
        cprintln!("<g,s>[DUMP]</>");
        for line in proc.program().cformat() {
            println!("{}", line);
        }
    }

    if let Some(key) = args.trace {
        cprintln!("<g,s>[TRACE]</> key {}", key);
        let mut steps = Steps::new();
        let ret = proc.call_with(key, None, &mut [&mut Trace, &mut steps])?;
        cprintln!(" * returned <y>{}</> after {} steps", ret, steps.count());
    }

    if let Some(fname) = &args.output {
        proc.save(fname)?;
        cprintln!("<g,s>[OUTPUT]</> {}", fname);
    }

    println!("=================================================");
    Ok(())
}
