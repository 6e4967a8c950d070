//! Manhattan Router CLI
//!
//! Usage:
//!   manhattan-router [OPTIONS] [SCENE]
//!
//! Options:
//!   -v, --verbose   Log routing decisions to stderr
//!   -e, --example   Show an annotated example scene
//!   -h, --help      Print help

use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use manhattan_router::Scene;

#[derive(Parser)]
#[command(name = "manhattan-router")]
#[command(about = "Orthogonal connection routing between shapes")]
struct Cli {
    /// Scene file (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Log routing decisions to stderr (RUST_LOG takes precedence)
    #[arg(short, long)]
    verbose: bool,

    /// Show an annotated example scene
    #[arg(short, long)]
    example: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "manhattan_router=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    if cli.example {
        print_example();
        return;
    }

    // If no scene file and stdin is a terminal (interactive), show intro help
    if cli.input.is_none() && io::stdin().is_terminal() {
        print_intro();
        return;
    }

    init_logging(cli.verbose);

    let scene = match &cli.input {
        Some(path) => match Scene::from_file(path) {
            Ok(scene) => scene,
            Err(e) => {
                eprintln!("Error loading scene '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            if let Err(e) = io::stdin().read_to_string(&mut buffer) {
                eprintln!("Error reading from stdin: {}", e);
                std::process::exit(1);
            }
            match Scene::from_str(&buffer) {
                Ok(scene) => scene,
                Err(e) => {
                    eprintln!("Error loading scene: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let router = scene.router();
    match scene.route(&router) {
        Ok(routed) => {
            for connection in routed {
                println!("{}", connection);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn print_intro() {
    println!(
        r#"Manhattan Router - Orthogonal connection routing between shapes

USAGE:
    manhattan-router [OPTIONS] [SCENE]
    cat scene.toml | manhattan-router

OPTIONS:
    -v, --verbose   Log routing decisions to stderr
    -e, --example   Show an annotated example scene
    -h, --help      Print help

Each connection in the scene is printed on one line:
    <source> -> <target>: x,y x,y ...

Run --example for the scene format."#
    );
}

fn print_example() {
    println!(
        r#"# Routing tolerances, all optional
[config]
min_segment_length = 20

# Shapes by id; kind is "rectangle" (default) or "circle"
[shapes.client]
x = 0
y = 0
width = 100
height = 50

[shapes.server]
x = 300
y = 100
width = 100
height = 50

# Routed from scratch, preferring a vertical start
[[connections]]
source = "client"
target = "server"
hints = {{ preferred_layouts = ["v:h"] }}

# Repaired: the server end moved, the old route is adjusted in place
[[connections]]
source = "client"
target = "server"
end = {{ x = 300, y = 125 }}
waypoints = [{{ x = 100, y = 25 }}, {{ x = 200, y = 25 }}, {{ x = 200, y = 105 }}, {{ x = 300, y = 105 }}]
hints = {{ connection_end = true }}

# Ends at a free point, as while drawing a new connection
[[connections]]
source = "client"
target_point = {{ x = 200, y = 300 }}"#
    );
}
