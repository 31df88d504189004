//! CLI tool for nusawave-viewer - inspects a configuration the way the browser does
//!
//! Usage:
//!   nusawave_cli <config.json>                   # Patched tree as JSON to stdout
//!   nusawave_cli <config.json> -o out.json       # Patched tree to file
//!   nusawave_cli <config.json> --at 100.0 3.0    # Region containing lon/lat
//!   nusawave_cli <config.json> --select java_sea # Default selection + image path
//!
//! Set `RUST_LOG=debug` for diagnostics.

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::env;
use std::fs;
use std::io::{self, Write};

use nusawave_viewer::cascade::Cascade;
use nusawave_viewer::config::ConfigStore;
use nusawave_viewer::options::MapPaths;
use nusawave_viewer::regions::RegionRegistry;
use nusawave_viewer::ViewerError;

const USAGE: &str =
    "Usage: nusawave_cli <config.json> [-o output.json | --at LON LAT | --select REGION]";

enum Command {
    Dump { output: Option<String> },
    At { lon: f64, lat: f64 },
    Select { region: String },
}

fn parse_args(args: &[String]) -> Option<(String, Command)> {
    let input = args.get(1)?.clone();
    let command = match args.get(2).map(String::as_str) {
        None => Command::Dump { output: None },
        Some("-o") => Command::Dump {
            output: Some(args.get(3)?.clone()),
        },
        Some("--at") => Command::At {
            lon: args.get(3)?.parse().ok()?,
            lat: args.get(4)?.parse().ok()?,
        },
        Some("--select") => Command::Select {
            region: args.get(3)?.clone(),
        },
        Some(_) => return None,
    };
    Some((input, command))
}

fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    pretty_env_logger::init();

    let args: Vec<String> = env::args().collect();
    let Some((input_path, command)) = parse_args(&args) else {
        eprintln!("{USAGE}");
        std::process::exit(1);
    };

    // Same policy as the browser: anything unreadable degrades to placeholders
    let registry = RegionRegistry::builtin();
    let text = fs::read_to_string(&input_path).map_err(ViewerError::from);
    let store = ConfigStore::resolve(text, &registry);

    match command {
        Command::Dump { output } => {
            let json = match store.to_json() {
                Ok(j) => j,
                Err(e) => {
                    eprintln!("Error serializing JSON: {}", e);
                    std::process::exit(1);
                }
            };
            match output {
                Some(path) => {
                    if let Err(e) = fs::write(&path, &json) {
                        eprintln!("Error writing {}: {}", path, e);
                        std::process::exit(1);
                    }
                    eprintln!("Written: {}", path);
                }
                None => {
                    io::stdout().write_all(json.as_bytes()).unwrap();
                    println!();
                }
            }
        }
        Command::At { lon, lat } => match registry.find_region_at(lon, lat) {
            Some(region) => println!("{}\t{}", region.id, region.display_name),
            None => {
                eprintln!("No region at lon={} lat={}", lon, lat);
                std::process::exit(2);
            }
        },
        Command::Select { region } => {
            let mut cascade = Cascade::new(store, registry, MapPaths::default());
            cascade.select_region(&region);
            if cascade.region().is_none() {
                eprintln!("Unknown region: {}", region);
                std::process::exit(2);
            }
            let sel = cascade.selection();
            println!("region:        {}", sel.region.unwrap_or_default());
            println!("forecast_type: {}", sel.forecast_type.unwrap_or_default());
            println!("parameter:     {}", sel.parameter.unwrap_or_default());
            println!("model:         {}", sel.model.unwrap_or_default());
            println!("timestamp:     {}", sel.timestamp.unwrap_or_default());
            println!("image:         {}", cascade.image_src());
        }
    }
}
