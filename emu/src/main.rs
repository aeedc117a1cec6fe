use clap::Parser;
use color_print::cprintln;

use emu::{
    hooks::{steps::Steps, trace::Trace, Hook},
    Procedure,
};

#[derive(Parser, Debug)]
#[clap(
    name = "treeemu",
    version = "v1.0.0",
    about = "Run lookups against a compiled search procedure",
    allow_negative_numbers = true
)]
struct Args {
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    /// Print every executed instruction
    #[arg(long)]
    trace: bool,

    /// Print the program listing before running
    #[arg(short, long)]
    dump: bool,

    input_file: String,

    keys: Vec<i32>,
}

fn main() {
    let args = Args::parse();
    cprintln!("<s>treeemu</>");

    println!("+-----------------------------------------------+");
    println!("| {:<45} |", args.input_file);
    println!("+-----------------------------------------------+");

    let proc = match Procedure::load(&args.input_file) {
        Ok(proc) => proc,
        Err(e) => {
            cprintln!("<r,s>error</>: {}", e);
            if let Some(source) = std::error::Error::source(&e) {
                cprintln!("  <r>caused by</>: {}", source);
            }
            std::process::exit(1);
        }
    };

    if args.dump {
        cprintln!("<g,s>[DUMP]</>");
        for line in proc.program().cformat() {
            println!("{}", line);
        }
    }

    cprintln!("<g,s>[RUN]</>");
    for key in args.keys {
        let mut steps = Steps::new();
        let mut trace = Trace;
        let mut hooks: Vec<&mut dyn Hook> = vec![&mut steps];
        if args.trace {
            hooks.push(&mut trace);
        }
        match proc.call_with(key, args.tmax, &mut hooks) {
            Ok(ret) => {
                drop(hooks);
                cprintln!(
                    " <b>{:>11}</> => <y>{:>11}</> ({} steps)",
                    key,
                    ret,
                    steps.count()
                );
            }
            Err(e) => {
                cprintln!("<r,s>error</>: {}", e);
                std::process::exit(1);
            }
        }
    }

    println!("=================================================");
}
