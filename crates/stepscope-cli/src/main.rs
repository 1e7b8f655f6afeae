// crates/stepscope-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use stepscope_core::{
    io::{read_trace_auto, write_trace_auto},
    Replay, StepKind, Trace,
};
use stepscope_kmp::{prefix, search, PrefixTrace, SearchTrace};
use stepscope_scc::{
    decompose_graph, generator::random_graph, kosaraju::components_of, Graph, GraphSpec, NodeId,
    SccTrace,
};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "stepscope",
    about = "Step-by-step algorithm traces",
    long_about = "Step-by-step algorithm traces.\n\nRun an instrumented KMP or SCC tracer, print the result read from its final frame, and optionally dump every frame or save the trace for later replay.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Trace construction of the KMP failure table for a pattern
    Prefix {
        /// Pattern to build the table for (may be empty)
        #[arg(long, allow_hyphen_values = true)]
        pattern: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Trace a KMP search reporting every (overlapping) occurrence
    Search {
        /// Text to scan
        #[arg(long, allow_hyphen_values = true)]
        text: String,

        /// Pattern to look for; an empty pattern never matches
        #[arg(long, allow_hyphen_values = true)]
        pattern: String,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Trace a two-pass strongly-connected-components decomposition
    Scc {
        #[command(flatten)]
        input: GraphArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Replay a trace written earlier with --out
    Show {
        /// Trace file (JSON/CBOR/JSONL)
        #[arg(long)]
        trace: PathBuf,

        /// Which tracer produced the file
        #[arg(value_enum, long)]
        kind: KindOpt,

        /// Print only this frame (0-based) with its full state; omit to list every frame
        #[arg(long)]
        step: Option<usize>,
    },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Write the full trace here (format by extension: .json, .cbor, .jsonl, .ndjson)
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print every frame as `index [kind] note`
    #[arg(long, default_value_t = false)]
    frames: bool,
}

#[derive(Args, Debug)]
struct GraphArgs {
    /// Graph file with `nodes` and `edges` (.toml or .json)
    #[arg(long, conflicts_with_all = ["node", "edge", "random"])]
    graph: Option<PathBuf>,

    /// Node label; repeat once per node, in index order
    #[arg(long, conflicts_with = "random")]
    node: Vec<String>,

    /// Directed edge `FROM:TO` by node index; repeatable
    #[arg(long, value_parser = parse_edge, conflicts_with = "random")]
    edge: Vec<(NodeId, NodeId)>,

    /// Generate a random graph with this many nodes
    #[arg(long)]
    random: Option<usize>,

    /// Edge count for --random
    #[arg(long, default_value_t = 0, requires = "random")]
    edges: usize,

    /// Seed for --random
    #[arg(long, default_value_t = 0, requires = "random")]
    seed: u64,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug, ValueEnum)]
enum KindOpt {
    /// Failure-table trace
    Prefix,
    /// Search trace
    Search,
    /// SCC trace
    Scc,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Prefix { pattern, output } => run_prefix(&pattern, &output),
        Cmd::Search {
            text,
            pattern,
            output,
        } => run_search(&text, &pattern, &output),
        Cmd::Scc { input, output } => run_scc(&input, &output),
        Cmd::Show { trace, kind, step } => show(&trace, kind, step),
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Parse `FROM:TO` into a pair of node indices.
fn parse_edge(s: &str) -> Result<(NodeId, NodeId), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("edge `{s}` must look like FROM:TO"))?;
    let idx = |part: &str| {
        part.trim()
            .parse::<NodeId>()
            .map_err(|e| format!("edge `{s}`: `{part}` is not a node index ({e})"))
    };
    Ok((idx(from)?, idx(to)?))
}

fn load_graph(args: &GraphArgs) -> Result<Graph> {
    if let Some(path) = &args.graph {
        let spec = GraphSpec::read_auto(path)?;
        return spec
            .into_graph()
            .with_context(|| format!("invalid graph in {}", path.display()));
    }
    if let Some(nodes) = args.random {
        return Ok(random_graph(nodes, args.edges, args.seed));
    }
    Graph::new(args.node.iter().cloned(), args.edge.iter().copied()).context("invalid graph")
}

/// Dump frames and/or persist the trace as requested.
fn emit<K, S>(trace: &Trace<K, S>, output: &OutputArgs) -> Result<()>
where
    K: StepKind + Serialize,
    S: Serialize,
{
    if output.frames {
        for (i, frame) in trace.iter().enumerate() {
            println!("{i:>5} {frame}");
        }
    }
    if let Some(path) = &output.out {
        write_trace_auto(path, trace)
            .with_context(|| format!("writing trace to {}", path.display()))?;
        debug!(out=%path.display(), frames = trace.len(), "trace written");
        println!("Wrote {} frames → {}", trace.len(), path.display());
    }
    Ok(())
}

fn run_prefix(pattern: &str, output: &OutputArgs) -> Result<()> {
    info!(pattern_len = pattern.chars().count(), "tracing failure table");
    let trace = prefix::build(pattern);
    info!(frames = trace.len(), "trace complete");
    emit(&trace, output)?;
    print_prefix_summary(&trace);
    Ok(())
}

fn run_search(text: &str, pattern: &str, output: &OutputArgs) -> Result<()> {
    info!(
        text_len = text.chars().count(),
        pattern_len = pattern.chars().count(),
        "tracing search"
    );
    let trace = search::search(text, pattern);
    info!(frames = trace.len(), "trace complete");
    emit(&trace, output)?;
    print_search_summary(&trace);
    Ok(())
}

fn run_scc(input: &GraphArgs, output: &OutputArgs) -> Result<()> {
    let graph = load_graph(input)?;
    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "tracing scc decomposition"
    );
    let trace = decompose_graph(&graph);
    info!(frames = trace.len(), "trace complete");
    emit(&trace, output)?;
    print_scc_summary(&trace);
    Ok(())
}

fn print_prefix_summary(trace: &PrefixTrace) {
    println!("Failure table: {:?}", prefix::table_of(trace));
}

fn print_search_summary(trace: &SearchTrace) {
    let matches = search::matches_of(trace);
    println!("{} match(es) at {:?}", matches.len(), matches);
}

/// Component summary, named by the labels stored in the final frame.
fn scc_summary(trace: &SccTrace) -> Vec<String> {
    let last = &trace.last().state;
    let components = components_of(trace);
    std::iter::once(format!("{} component(s)", components.len()))
        .chain(
            components
                .iter()
                .enumerate()
                .map(|(i, comp)| format!("  #{i}: {}", last.show(comp))),
        )
        .collect()
}

fn print_scc_summary(trace: &SccTrace) {
    for line in scc_summary(trace) {
        println!("{line}");
    }
}

fn show(path: &Path, kind: KindOpt, step: Option<usize>) -> Result<()> {
    info!(trace=%path.display(), ?kind, ?step, "replaying trace");
    match kind {
        KindOpt::Prefix => {
            let trace: PrefixTrace = load(path)?;
            replay(&trace, step)?;
            if step.is_none() {
                print_prefix_summary(&trace);
            }
        }
        KindOpt::Search => {
            let trace: SearchTrace = load(path)?;
            replay(&trace, step)?;
            if step.is_none() {
                print_search_summary(&trace);
            }
        }
        KindOpt::Scc => {
            let trace: SccTrace = load(path)?;
            replay(&trace, step)?;
            if step.is_none() {
                print_scc_summary(&trace);
            }
        }
    }
    Ok(())
}

fn load<K, S>(path: &Path) -> Result<Trace<K, S>>
where
    K: DeserializeOwned,
    S: DeserializeOwned,
{
    read_trace_auto(path).with_context(|| format!("reading trace from {}", path.display()))
}

/// Print one frame with its state, or every frame's one-line form.
fn replay<K, S>(trace: &Trace<K, S>, step: Option<usize>) -> Result<()>
where
    K: StepKind,
    S: Serialize,
{
    let mut cursor = Replay::new(trace);
    match step {
        Some(i) => {
            let frame = cursor.seek(i)?;
            println!("{i}/{} {frame}", trace.len() - 1);
            let state = serde_json::to_string_pretty(&frame.state).context("render state")?;
            println!("{state}");
        }
        None => {
            println!("{:>5} {}", cursor.position(), cursor.current());
            while let Some(frame) = cursor.step_forward() {
                println!("{:>5} {frame}", cursor.position());
            }
        }
    }
    Ok(())
}
