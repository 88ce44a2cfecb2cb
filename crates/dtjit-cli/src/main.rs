use std::io::Write;
use std::path::PathBuf;

use clap::Parser;

use dtjit_codegen::generator;

/// Read a decision tree file and compile an evaluator program for it.
#[derive(Debug, Parser)]
#[command(name = "dtg", version, about)]
struct Args {
    /// Enable debug output
    #[arg(short = 'd', long = "debug")]
    debug: bool,
    /// Select optimization level (ignored: this backend has no separate
    /// optimization pass, kept for command-line compatibility)
    #[arg(short = 'O', value_name = "0..3", default_value_t = 0)]
    opt_level: u8,
    /// Select code generator subtree depth: 1 = if/else, 2 = subtree
    /// switch, 3 = subtree switch with SIMD condition vectors
    #[arg(short = 'L', value_name = "1..3", default_value_t = 3)]
    switch_level: u8,
    /// Write output as human-readable text instead of the binary object format
    #[arg(short = 'S')]
    text_output: bool,
    /// Write output to FILE_NAME (defaults to stdout)
    #[arg(short = 'o', value_name = "FILE")]
    output: Option<PathBuf>,
    /// Decision tree input file (JSON node array)
    input: PathBuf,
}

fn main() {
    let args = Args::parse();

    let filter = if args.debug {
        tracing::level_filters::LevelFilter::DEBUG
    } else {
        tracing::level_filters::LevelFilter::INFO
    };
    let env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(filter.into())
        .from_env_lossy();
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    if args.switch_level == 0 || args.switch_level > 3 {
        eprintln!("invalid -L{}: subtree depth must be 1, 2 or 3", args.switch_level);
        std::process::exit(1);
    }
    if args.opt_level > 3 {
        eprintln!("invalid -O{}: optimization level must be 0..3", args.opt_level);
        std::process::exit(1);
    }
    tracing::debug!(opt_level = args.opt_level, "optimization level requested (no-op)");

    let tree = match dtjit_treeio::read_tree(&args.input) {
        Ok(tree) => tree,
        Err(err) => {
            eprintln!("failed to read {}: {err}", args.input.display());
            std::process::exit(1);
        }
    };
    tracing::info!(
        depth = tree.depth(),
        nodes = tree.node_count(),
        "loaded decision tree"
    );

    let generator = generator::by_switch_level(args.switch_level);
    // No function-boundary nesting from the CLI: each compiled evaluator
    // covers exactly one subtree-switch's worth of levels.
    let function_depth = generator.subtree_levels();
    let program = generator.emit_program(&tree, function_depth);

    for switch in &program {
        if let Err(err) = dtjit_codegen::verify_switch(switch) {
            eprintln!("emitted program failed verification: {err}");
            std::process::exit(1);
        }
    }
    tracing::debug!(evaluators = program.len(), "emitted and verified program");

    let bytes = if args.text_output {
        dtjit_codegen::text::render_program(&program).into_bytes()
    } else {
        match bincode::serialize(&program) {
            Ok(bytes) => bytes,
            Err(err) => {
                eprintln!("failed to encode output: {err}");
                std::process::exit(1);
            }
        }
    };

    let result = match &args.output {
        Some(path) => std::fs::write(path, &bytes),
        None => std::io::stdout().write_all(&bytes),
    };
    if let Err(err) = result {
        eprintln!("failed to write output: {err}");
        std::process::exit(1);
    }
}
