use std::fs;
use std::process;

use clap::{Parser, Subcommand};

use aoaconv::{dependency_report, make_aoa, validate_only, wbs, AoaResult};

#[derive(Parser)]
#[command(about = "Converts an Activity-on-Node work breakdown into a minimal Activity-on-Arc network")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the engine and print the resulting AoA arc table
    Convert {
        /// WBS input file (ACT/LINK directives)
        input: String,
    },
    /// Check an input for malformed ids/links/cycles without building the network
    Validate {
        /// WBS input file (ACT/LINK directives)
        input: String,
    },
    /// Print each activity's minimal and full predecessor id sets
    Deps {
        /// WBS input file (ACT/LINK directives)
        input: String,
    },
}

fn main() {
    let cli = Cli::parse();
    match cli.command {
        Commands::Convert { input } => convert(&input),
        Commands::Validate { input } => validate(&input),
        Commands::Deps { input } => deps(&input),
    }
}

fn read_wbs(path: &str) -> wbs::Wbs {
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading {}: {}", path, e);
        process::exit(1);
    });
    wbs::parse(&text).unwrap_or_else(|e| {
        eprintln!("Error parsing {}: {}", path, e);
        process::exit(1);
    })
}

fn print_arc_table(result: &AoaResult) {
    let mut n_real = 0usize;
    let mut n_dummy = 0usize;
    for i in 0..result.len() {
        if result.is_dummy(i) {
            n_dummy += 1;
            println!("  --  {:5} -> {:<5}", result.act_src[i], result.act_dst[i]);
        } else {
            n_real += 1;
            println!(
                "{:>5}  {:5} -> {:<5}",
                result.act_id[i], result.act_src[i], result.act_dst[i]
            );
        }
    }
    println!(
        "# {} real arcs, {} dummy arcs, {} events",
        n_real,
        n_dummy,
        result.n_events()
    );
}

fn convert(input: &str) {
    let w = read_wbs(input);
    match make_aoa(&w.act_id, &w.lnk_src, &w.lnk_dst) {
        Ok(result) => print_arc_table(&result),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn validate(input: &str) {
    let w = read_wbs(input);
    match validate_only(&w.act_id, &w.lnk_src, &w.lnk_dst) {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("REJECTED: {}", e);
            process::exit(1);
        }
    }
}

fn deps(input: &str) {
    let w = read_wbs(input);
    match dependency_report(&w.act_id, &w.lnk_src, &w.lnk_dst) {
        Ok(report) => {
            for (i, &id) in w.act_id.iter().enumerate() {
                let mut min = report.min_deps[i].clone();
                let mut full = report.full_deps[i].clone();
                min.sort_unstable();
                full.sort_unstable();
                println!("{:>5}: min={:?} full={:?}", id, min, full);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
