use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::{Path, PathBuf};
use wireroute_common::db::parser::wires;
use wireroute_common::db::writer;
use wireroute_common::util::config::{Config, RouteMode};
use wireroute_common::util::{check, generator, logger, visualization};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, value_name = "FILE", default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Route a wire file and write costs, routes and heatmap.
    Route(RouteArgs),
    /// Write a random wire file.
    Generate {
        #[arg(long, default_value_t = 1024)]
        dim_x: u32,
        #[arg(long, default_value_t = 1024)]
        dim_y: u32,
        #[arg(long, default_value_t = 1000)]
        wires: usize,
        #[arg(long, default_value_t = 64)]
        max_span: u32,
        #[arg(long, default_value = "inputs/random.txt")]
        output: String,
    },
}

/// Flags that override the `[routing]` and `[input]` tables.
#[derive(ClapArgs, Default)]
struct RouteArgs {
    /// Wire file.
    #[arg(short = 'f', long = "file")]
    input: Option<String>,
    #[arg(short = 'n', long)]
    workers: Option<usize>,
    #[arg(short = 'p', long)]
    prob: Option<f64>,
    #[arg(short = 'i', long)]
    iters: Option<usize>,
    #[arg(long)]
    mode: Option<RouteMode>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long)]
    parallel_candidates: bool,
}

impl RouteArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.input.wire_file = input.clone();
        }
        if let Some(n) = self.workers {
            config.routing.num_workers = n;
        }
        if let Some(p) = self.prob {
            config.routing.sa_prob = p;
        }
        if let Some(i) = self.iters {
            config.routing.sa_iters = i;
        }
        if let Some(mode) = self.mode {
            config.routing.mode = mode;
        }
        if self.seed.is_some() {
            config.routing.seed = self.seed;
        }
        if self.parallel_candidates {
            config.routing.parallel_candidates = true;
        }
    }
}

fn main() -> anyhow::Result<()> {
    logger::init();
    let args = Args::parse();

    let mut config = load_config(&args.config)?;
    let command = args
        .command
        .unwrap_or_else(|| Commands::Route(RouteArgs::default()));

    match command {
        Commands::Generate {
            dim_x,
            dim_y,
            wires,
            max_span,
            output,
        } => {
            prepare_parent_dir(Path::new(&output))?;
            generator::generate_random_wires(&output, dim_x, dim_y, wires, max_span)?;
            log::info!("Generated: {}", output);
        }
        Commands::Route(route_args) => {
            route_args.apply(&mut config);
            if !Path::new(&config.input.wire_file).exists() {
                return Err(anyhow::anyhow!(
                    "Input wire file missing: {}",
                    config.input.wire_file
                ));
            }

            run_routing(&config)?;
        }
    }

    Ok(())
}

fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        log::warn!(
            "Configuration file {:?} not found. Using internal defaults.",
            path
        );
        return Ok(Config::default());
    }

    log::info!("Loading configuration from {:?}", path);
    let config_str = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;
    parse_config(&config_str)
}

fn parse_config(text: &str) -> anyhow::Result<Config> {
    toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))
}

fn prepare_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.exists()
        && !parent.as_os_str().is_empty()
    {
        log::info!("Creating output directory: {:?}", parent);
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

/// Output path for one artifact, tagged with the input name and worker count.
fn output_path(config: &Config, prefix: &str, ext: &str) -> PathBuf {
    let name = Path::new(&config.input.wire_file)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "wires".to_string());
    Path::new(&config.input.output_dir).join(format!(
        "{}_{}_{}.{}",
        prefix, name, config.routing.num_workers, ext
    ))
}

fn run_routing(config: &Config) -> anyhow::Result<()> {
    let db = wires::parse(&config.input.wire_file).map_err(|e| {
        log::error!("{}", e);
        anyhow::anyhow!(
            "Invalid wire file '{}': {}",
            config.input.wire_file,
            e
        )
    })?;

    let outcome = wireroute_router::route(&db, &config.routing).map_err(|e| {
        log::error!("Routing failed: {}", e);
        anyhow::anyhow!(e)
    })?;

    if let Err(e) = check::run(&db, &outcome.routes, &outcome.costs) {
        log::error!("{}", e);
        return Err(anyhow::anyhow!(e));
    }

    println!("{}", outcome.metrics);

    std::fs::create_dir_all(&config.input.output_dir)?;

    let cost_file = output_path(config, "cost", "txt");
    log::info!("Writing costs to {:?}", cost_file);
    writer::write_costs(&cost_file, db.dim_x, db.dim_y, &outcome.costs)?;

    let route_file = output_path(config, "output", "txt");
    log::info!("Writing routes to {:?}", route_file);
    writer::write_routes(&route_file, &db, &outcome.routes)?;

    if config.output.heatmap {
        let png = output_path(config, "congestion", "png");
        log::info!("Generating congestion heatmap {:?}", png);
        if let Err(e) = visualization::draw_congestion(
            &db,
            &outcome.costs,
            &outcome.routes,
            &png,
            config.output.heatmap_size,
        ) {
            log::warn!("Failed to write heatmap {:?}: {}", png, e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_fills_missing_fields_with_defaults() {
        let config = parse_config(
            r#"
            [routing]
            sa_prob = 0.25
            num_workers = 4
            mode = "distributed"

            [input]
            wire_file = "inputs/easy.txt"
            "#,
        )
        .unwrap();

        assert_eq!(config.routing.sa_prob, 0.25);
        assert_eq!(config.routing.num_workers, 4);
        assert_eq!(config.routing.mode, RouteMode::Distributed);
        assert_eq!(config.routing.sa_iters, 5);
        assert!(config.routing.seed.is_none());
        assert_eq!(config.input.output_dir, "output");
        assert!(config.output.heatmap);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(parse_config("[routing]\nmode = \"mpi\"\n").is_err());
    }

    #[test]
    fn flags_override_config() {
        let mut config = Config::default();
        let args = RouteArgs {
            input: Some("inputs/hard.txt".to_string()),
            workers: Some(8),
            prob: Some(0.5),
            iters: None,
            mode: Some(RouteMode::Distributed),
            seed: Some(3),
            parallel_candidates: false,
        };
        args.apply(&mut config);

        assert_eq!(config.input.wire_file, "inputs/hard.txt");
        assert_eq!(config.routing.num_workers, 8);
        assert_eq!(config.routing.sa_prob, 0.5);
        assert_eq!(config.routing.sa_iters, 5);
        assert_eq!(config.routing.mode, RouteMode::Distributed);
        assert_eq!(config.routing.seed, Some(3));
        assert!(!config.routing.parallel_candidates);
    }

    #[test]
    fn outputs_are_tagged_with_input_and_workers() {
        let mut config = Config::default();
        config.input.wire_file = "inputs/easy_4096.txt".to_string();
        config.input.output_dir = "out".to_string();
        config.routing.num_workers = 8;
        assert_eq!(
            output_path(&config, "cost", "txt"),
            Path::new("out").join("cost_easy_4096_8.txt")
        );
    }

    #[test]
    fn parses_route_flags() {
        let args = Args::try_parse_from([
            "wireroute", "route", "-f", "w.txt", "-n", "4", "-p", "0.2", "-i", "3", "--mode",
            "distributed",
        ])
        .unwrap();
        match args.command {
            Some(Commands::Route(r)) => {
                assert_eq!(r.input.as_deref(), Some("w.txt"));
                assert_eq!(r.workers, Some(4));
                assert_eq!(r.iters, Some(3));
                assert_eq!(r.mode, Some(RouteMode::Distributed));
            }
            _ => panic!("expected route subcommand"),
        }
    }
}
