//! Walks through the graph API on a few small graphs and prints the results.
//!
//! Usage:
//!   cargo run --example graph_demo
//!   cargo run --example graph_demo -- --exceptions --timings
//!   cargo run --example graph_demo -- path/to/graph.txt

use std::{
    fmt::Debug,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use graphsets::{
    Graph, GraphError, VertexIndex,
    tracing_support::{LogLevel, dump_method_timings, init_tracing},
};

const SEPARATOR: &str = "--------------------";

/// Demonstrate vertex and edge mutation, structural predicates and the
/// independent and dominating set searches.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Extra adjacency-list files to load and summarize
    files: Vec<PathBuf>,

    /// Directory holding graph_example.txt, bipartite_graph.txt and bad_example.txt
    #[arg(long, default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/data"))]
    data_dir: PathBuf,

    /// Also replay failing calls and print the errors they produce
    #[arg(long)]
    exceptions: bool,

    /// Log each mutation
    #[arg(short, long)]
    verbose: bool,

    /// Log everything, including search progress
    #[arg(long)]
    debug: bool,

    /// Print time spent in each traced call at exit
    #[arg(long)]
    timings: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing(if args.debug {
        LogLevel::Debug
    } else if args.verbose {
        LogLevel::Info
    } else {
        LogLevel::Quiet
    });

    print_header("START OF A TEST");
    example_graph(&args);
    mutated_graph();
    reduced_complete_graph();
    bipartite_graph(&args);
    induced_bipartite_graph();
    for path in &args.files {
        summarize_file(path);
    }
    print_header("END OF THE TEST");

    if args.exceptions {
        println!();
        print_header("START OF AN EXCEPTION TEST");
        replay_errors(&args);
        print_header("END OF THE EXCEPTION TEST");
    }

    if args.timings {
        dump_method_timings();
    }
}

fn print_header(title: &str) {
    println!("{SEPARATOR} {title} {SEPARATOR}");
}

fn print_graph<T: Debug>(graph: &Graph<T>) {
    if graph.is_empty() {
        println!("Graph is empty");
    } else {
        println!("{graph}");
    }
    println!("{SEPARATOR}");
}

fn verdict(yes: bool) -> &'static str {
    if yes { "is" } else { "is not" }
}

fn load_or_exit(path: &Path) -> Graph<bool> {
    match Graph::from_file(path) {
        Ok(graph) => graph,
        Err(err) => {
            eprintln!("Failed to load '{}': {err}", path.display());
            process::exit(1);
        }
    }
}

fn example_graph(args: &Args) {
    let graph = load_or_exit(&args.data_dir.join("graph_example.txt"));
    print_graph(&graph);
    println!("MDS: {}", graph.find_mds());
    match graph.find_mcds() {
        Some(mcds) => println!("MCDS: {mcds}"),
        None => println!("MCDS: none, the graph is disconnected"),
    }
    println!("MIS: {}", graph.find_mis());
    println!();
}

fn mutated_graph() {
    let mut graph: Graph<String> = Graph::new();
    print_graph(&graph);
    let report = graph.add_new_vertices(1..=5);
    println!(
        "Vertices added: {:?}",
        report.succeeded().collect::<Vec<_>>()
    );
    print_graph(&graph);
    for (v, u) in [(1, 3), (3, 2), (3, 1)] {
        print_connect(&mut graph, v, u);
        print_graph(&graph);
    }
    println!();
}

fn print_connect<T>(graph: &mut Graph<T>, v: VertexIndex, u: VertexIndex) {
    match graph.connect_vertices(v, u) {
        Ok(true) => println!("Vertices {v} and {u} connected"),
        Ok(false) => println!("Vertices {v} and {u} were already connected"),
        Err(err) => println!("{err}"),
    }
}

fn reduced_complete_graph() {
    let mut graph: Graph<i32> = match Graph::complete(2, 7) {
        Ok(graph) => graph,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    print_graph(&graph);
    let report = graph.remove_vertices([2, 4]);
    println!(
        "Vertices removed: {:?}",
        report.succeeded().collect::<Vec<_>>()
    );
    print_graph(&graph);
    match graph.disconnect_vertices(3, 7) {
        Ok(disconnected) => println!(
            "Vertices 3 and 7 {} disconnected",
            if disconnected { "were" } else { "could not be" }
        ),
        Err(err) => println!("{err}"),
    }
    print_graph(&graph);
    for subset in [vec![3, 7], vec![6]] {
        match graph.is_cds(subset.iter().copied()) {
            Ok(cds) => println!("{subset:?} {} a connected dominating set", verdict(cds)),
            Err(err) => println!("{err}"),
        }
    }
    println!();
}

fn bipartite_graph(args: &Args) {
    let graph: Graph<f64> = match Graph::from_file(args.data_dir.join("bipartite_graph.txt")) {
        Ok(graph) => graph,
        Err(err) => {
            println!("{err}");
            return;
        }
    };
    print_graph(&graph);
    println!("Graph {} bipartite", verdict(graph.is_bipartite()));
    for subset in [[1, 3, 5, 7], [2, 4, 6, 8]] {
        if let Ok(independent) = graph.is_independent_set(subset) {
            println!("{subset:?} {} an independent set", verdict(independent));
        }
    }
    for subset in [[1, 2, 3, 4], [2, 4, 6, 8]] {
        if let Ok(connected) = graph.do_induce_connected_subgraph(subset) {
            println!("{subset:?} {} a connected subgraph", verdict(connected));
        }
    }
    println!();
}

fn induced_bipartite_graph() {
    let mut graph: Graph<char> = Graph::new();
    graph.add_new_vertices(1..=4);
    print_graph(&graph);
    for (v, u) in [(4, 1), (4, 2), (4, 3), (2, 3)] {
        print_connect(&mut graph, v, u);
        print_graph(&graph);
    }
    let everything = graph.vertices();
    for subset in [vec![1, 2, 4], everything.to_vec()] {
        if let Ok(bipartite) = graph.do_induce_bipartite_subgraph(subset.iter().copied()) {
            println!("{subset:?} {} a bipartite subgraph", verdict(bipartite));
        }
    }
}

fn summarize_file(path: &Path) {
    let graph = load_or_exit(path);
    println!();
    println!("{}:", path.display());
    print_graph(&graph);
    println!(
        "{} vertices, {} edges, {} connected, {} bipartite",
        graph.num_vertices(),
        graph.num_edges(),
        verdict(graph.is_connected()),
        verdict(graph.is_bipartite()),
    );
    println!("MIS: {}", graph.find_mis());
    println!("MDS: {}", graph.find_mds());
}

fn replay_errors(args: &Args) {
    let bad_paths = [
        PathBuf::from("/"),
        args.data_dir.clone(),
        args.data_dir.with_extension("txt"),
        args.data_dir.join("bad_example.txt"),
    ];
    for path in &bad_paths {
        if let Err(err) = Graph::<()>::from_file(path) {
            println!("{}: {err}", path.display());
        }
    }
    println!();

    let mut graph: Graph<&str> = Graph::new();
    for (index, data) in [(1, "Hello"), (2, "World")] {
        if let Err(err) = graph.add_new_vertex_with_data(index, data) {
            println!("{err}");
        }
    }
    let results: [Result<(), GraphError>; 2] = [
        graph.are_vertices_of_graph([1, -1, 2]).map(drop),
        graph.vertex_neighbourhood(0).map(drop),
    ];
    for err in results.into_iter().filter_map(Result::err) {
        println!("{err}");
    }
}
