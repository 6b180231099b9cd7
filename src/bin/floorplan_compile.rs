//! Floor plan compilation utility
//!
//! Compiles one image per storey into a Minecraft function file.
//!
//! Usage:
//!     floorplan-compile [OPTIONS] <IMAGE>...
//!
//! Options:
//!     -c, --config <FILE>         JSON build configuration
//!     -o, --output <FILE>         Output file (default: stdout)
//!     --floor-height <N>          Blocks per storey
//!     --door-height <N>           Height of the wall gap above doors
//!     --ceiling                   Roof a single storey
//!     --tolerance <N>             Per-channel colour tolerance (0-255)
//!     -h, --help                  Show this help message

use std::env;
use std::path::PathBuf;
use std::time::Instant;

use floorplan_compiler::{BuildConfig, StructureCompiler};

fn print_help() {
    eprintln!("floorplan-compile - Floor plan to structure compiler");
    eprintln!();
    eprintln!("Usage: floorplan-compile [OPTIONS] <IMAGE>...");
    eprintln!();
    eprintln!("Images are stacked in the order given, bottom storey first.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("    -c, --config <FILE>         JSON build configuration");
    eprintln!("    -o, --output <FILE>         Output file (default: stdout)");
    eprintln!("    --floor-height <N>          Blocks per storey (default: 4)");
    eprintln!("    --door-height <N>           Height of the wall gap above doors (default: 2)");
    eprintln!("    --ceiling                   Roof a single storey");
    eprintln!("    --tolerance <N>             Per-channel colour tolerance (default: 20)");
    eprintln!("    -h, --help                  Show this help message");
    eprintln!();
    eprintln!("Example:");
    eprintln!("    floorplan-compile -o building.mcfunction ground.png first.png");
}

#[derive(Debug, Default)]
struct Args {
    images: Vec<PathBuf>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    floor_height: Option<u32>,
    door_height: Option<u32>,
    ceiling: bool,
    tolerance: Option<u8>,
}

fn value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("Missing value for {}", flag))
}

fn parse_args() -> Result<Args, String> {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut parsed = Args::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            flag @ ("-c" | "--config") => {
                i += 1;
                parsed.config = Some(PathBuf::from(value(&args, i, flag)?));
            }
            flag @ ("-o" | "--output") => {
                i += 1;
                parsed.output = Some(PathBuf::from(value(&args, i, flag)?));
            }
            flag @ "--floor-height" => {
                i += 1;
                let v = value(&args, i, flag)?;
                parsed.floor_height =
                    Some(v.parse().map_err(|_| format!("Invalid floor height: {}", v))?);
            }
            flag @ "--door-height" => {
                i += 1;
                let v = value(&args, i, flag)?;
                parsed.door_height =
                    Some(v.parse().map_err(|_| format!("Invalid door height: {}", v))?);
            }
            flag @ "--tolerance" => {
                i += 1;
                let v = value(&args, i, flag)?;
                parsed.tolerance =
                    Some(v.parse().map_err(|_| format!("Invalid tolerance: {}", v))?);
            }
            "--ceiling" => parsed.ceiling = true,
            arg if arg.starts_with('-') => {
                return Err(format!("Unknown option: {}", arg));
            }
            path => parsed.images.push(PathBuf::from(path)),
        }
        i += 1;
    }

    if parsed.images.is_empty() {
        return Err("Missing floor images".to_string());
    }
    Ok(parsed)
}

fn build_config(args: &Args) -> floorplan_compiler::Result<BuildConfig> {
    let mut config = match &args.config {
        Some(path) => BuildConfig::from_json_file(path)?,
        None => BuildConfig::default(),
    };
    if let Some(h) = args.floor_height {
        config.floor_height = h;
    }
    if let Some(h) = args.door_height {
        config.door_height = h;
    }
    if let Some(t) = args.tolerance {
        config.tolerance = t;
    }
    config.generate_ceiling |= args.ceiling;
    Ok(config)
}

fn run(args: &Args) -> floorplan_compiler::Result<()> {
    let compiler = StructureCompiler::new(build_config(args)?)?;

    let start = Instant::now();
    let images = args
        .images
        .iter()
        .map(std::fs::read)
        .collect::<Result<Vec<_>, _>>()?;
    let blueprint = compiler.compile_images(&images)?;

    for floor in &blueprint.floors {
        log::info!(
            "Floor {} ({}): {} instructions, {} ceiling blocks",
            floor.index,
            args.images[floor.index].display(),
            floor.instructions.len(),
            floor.ceiling_blocks
        );
    }

    match &args.output {
        Some(path) => {
            blueprint.write_mcfunction(path)?;
            log::info!(
                "Wrote {} instructions to {} in {:.2}s",
                blueprint.len(),
                path.display(),
                start.elapsed().as_secs_f64()
            );
        }
        None => print!("{}", blueprint.to_mcfunction()),
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
