use clap::Parser;
use convroute::prelude::*;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Find cost-ordered conversion plans between two file formats
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the format cache JSON file describing every handler
    catalog_path: Option<String>,
    /// MIME type of the input file
    from_mime: Option<String>,
    /// MIME type the file should be converted to
    to_mime: Option<String>,

    /// Handler currently holding the input file
    #[arg(long, default_value = "input")]
    from_handler: String,

    /// Handler that must produce the final output (ignored with --simple)
    #[arg(long)]
    to_handler: Option<String>,

    /// Accept plans ending with any handler
    #[arg(long)]
    simple: bool,

    /// Maximum number of plans to print
    #[arg(short = 'n', long, default_value_t = 5)]
    max_plans: usize,

    /// Optional path to a cost policy JSON file
    #[arg(long)]
    policy: Option<String>,

    /// Load a binary graph snapshot instead of building from the catalog
    #[arg(long, conflicts_with = "policy")]
    snapshot: Option<String>,

    /// Write the built graph to a binary snapshot
    #[arg(long)]
    save_snapshot: Option<String>,

    /// Print every node and edge of the graph
    #[arg(long)]
    print_graph: bool,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

/// Everything needed for one search run, whichever way it was collected.
struct Request {
    catalog_path: Option<String>,
    from_mime: String,
    to_mime: String,
    from_handler: String,
    to_handler: Option<String>,
    simple: bool,
    max_plans: usize,
    policy: Option<String>,
    snapshot: Option<String>,
    save_snapshot: Option<String>,
    print_graph: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let request = if cli.human {
        prompt_request()
    } else {
        request_from_args(cli)
    };
    run_search(request);
}

fn run_search(request: Request) {
    let total_start = Instant::now();

    // --- 1. Graph ---
    let load_start = Instant::now();
    let graph = match &request.snapshot {
        Some(path) => Graph::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load snapshot: {}", e))),
        None => build_graph(&request),
    };
    let load_duration = load_start.elapsed();

    println!(
        "Graph ready: {} formats, {} conversions ({:?})",
        graph.nodes().len(),
        graph.edges().len(),
        load_duration
    );

    if let Some(path) = &request.save_snapshot {
        graph
            .save(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to save snapshot: {}", e)));
        println!("Saved graph snapshot to '{}'", path);
    }

    if request.print_graph {
        println!("\n{}", graph);
    }

    // --- 2. Search ---
    let mut target = SearchTarget::format(&request.to_mime);
    if let Some(handler) = &request.to_handler {
        target = target.via(handler);
    }
    let origin = ConversionStep::new(
        &request.from_handler,
        FormatEntry::from_mime(&request.from_mime),
    );

    println!(
        "\nSearching {} -> {} (simple mode: {})...",
        request.from_mime, request.to_mime, request.simple
    );
    let search_start = Instant::now();
    let mut search = graph.search(origin, target, request.simple);
    let plans: Vec<ConversionPlan> = search.by_ref().take(request.max_plans).collect();
    let search_duration = search_start.elapsed();

    // --- 3. Results ---
    if plans.is_empty() {
        println!("  -> No conversion path available");
    }
    for (rank, plan) in plans.iter().enumerate() {
        println!(
            "  {}. [cost {}] {}",
            rank + 1,
            PlanFormatter::format_cost(plan.cost()),
            PlanFormatter::format_plan(plan)
        );
    }

    println!("\n--- Search Summary ---");
    println!("Plans Shown:          {}", plans.len());
    println!("Iterations:           {}", search.iterations());
    println!("Graph Loading:        {:?}", load_duration);
    println!("Search:               {:?}", search_duration);
    println!("Total Execution:      {:?}", total_start.elapsed());
}

fn build_graph(request: &Request) -> Graph {
    let catalog_path = request.catalog_path.as_deref().unwrap_or_else(|| {
        exit_with_error("A catalog path is required unless --snapshot is given.")
    });
    let catalog = Catalog::from_file(catalog_path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to load catalog: {}", e)));

    let policy = match &request.policy {
        Some(path) => CostPolicy::from_file(path)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to load cost policy: {}", e))),
        None => CostPolicy::default(),
    };

    Graph::builder(&catalog)
        .with_policy(policy)
        .build()
        .unwrap_or_else(|e| exit_with_error(&format!("Graph construction failed: {}", e)))
}

/// Collects a request from command line arguments.
fn request_from_args(cli: Cli) -> Request {
    let from_mime = cli.from_mime.unwrap_or_else(|| {
        exit_with_error("Source MIME type is required in non-interactive mode.");
    });
    let to_mime = cli.to_mime.unwrap_or_else(|| {
        exit_with_error("Target MIME type is required in non-interactive mode.");
    });

    Request {
        catalog_path: cli.catalog_path,
        from_mime,
        to_mime,
        from_handler: cli.from_handler,
        to_handler: cli.to_handler,
        simple: cli.simple,
        max_plans: cli.max_plans,
        policy: cli.policy,
        snapshot: cli.snapshot,
        save_snapshot: cli.save_snapshot,
        print_graph: cli.print_graph,
    }
}

/// Collects a request interactively, with prompts.
fn prompt_request() -> Request {
    println!("--- convroute Interactive Mode ---");

    let catalog_path = prompt_for_input("Enter format cache path", Some("cache.json"));
    let from_mime = prompt_for_input("Enter source MIME type", Some("image/png"));
    let to_mime = prompt_for_input("Enter target MIME type", Some("image/jpeg"));
    let to_handler = prompt_for_input("Enter required final handler (optional)", None);

    let max_plans = loop {
        let choice = prompt_for_input("How many plans should be listed", Some("5"));
        match choice.parse::<usize>() {
            Ok(n) if n > 0 => break n,
            _ => println!("Please enter a positive number."),
        }
    };

    Request {
        catalog_path: Some(catalog_path),
        from_mime,
        to_mime,
        from_handler: "input".to_string(),
        simple: to_handler.is_empty(),
        to_handler: (!to_handler.is_empty()).then_some(to_handler),
        max_plans,
        policy: None,
        snapshot: None,
        save_snapshot: None,
        print_graph: false,
    }
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout()
        .flush()
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to flush stdout: {}", e)));

    io::stdin()
        .read_line(&mut line)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read line: {}", e)));
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
