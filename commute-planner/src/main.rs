use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commute_planner::config::{API_KEY_ENV, CommuteConfig};
use commute_planner::directions::{DirectionsClient, DirectionsConfig, RouteQueryClient};
use commute_planner::domain::SystemClock;
use commute_planner::location::{LocationResolver, ResolverConfig, platform_locator};
use commute_planner::pipeline::{Outcome, Pipeline};
use commute_planner::planner::PlannerConfig;
use commute_planner::report;
use commute_planner::trip::{OriginSource, TripRequest, select_trip};

/// Next transit departures between home, work, or any two places.
///
/// With no arguments, shows routes home (from work if one is saved,
/// otherwise from your detected location). `-w` shows routes to work.
/// Two arguments route between arbitrary places.
#[derive(Parser)]
#[command(name = "commute", version)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Verbosity level (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,

    /// Optional `[from] [to]` for arbitrary routing
    #[arg(value_name = "PLACE")]
    places: Vec<String>,

    /// Get routes to work (default: routes to home)
    #[arg(short, long)]
    work: bool,

    /// Your current location, instead of auto-detection
    #[arg(short, long)]
    from: Option<String>,

    /// You're currently at your home address
    #[arg(long)]
    at_home: bool,

    /// You're currently at your work address
    #[arg(long)]
    at_work: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Save your home/work addresses and API key
    Init {
        /// Home address
        #[arg(long)]
        home: String,

        /// Work address
        #[arg(long)]
        work: Option<String>,

        /// Google Maps API key
        #[arg(long)]
        api_key: Option<String>,
    },
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Init {
            home,
            work,
            api_key,
        }) => init(home, work, api_key),
        None => {
            let request = TripRequest {
                places: cli.places,
                to_work: cli.work,
                from: cli.from,
                at_home: cli.at_home,
                at_work: cli.at_work,
            };
            run(request).await
        }
    }
}

fn init(home: String, work: Option<String>, api_key: Option<String>) -> ExitCode {
    let mut config = match CommuteConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    config.home_address = home.trim().to_string();
    if let Some(work) = work {
        config.work_address = work.trim().to_string();
    }
    if let Some(key) = api_key {
        config.google_api_key = key.trim().to_string();
    }

    if !config.is_valid_with(std::env::var(API_KEY_ENV).ok()) {
        eprintln!("❌ A home address and API key are both required (use --api-key or {API_KEY_ENV}).");
        return ExitCode::FAILURE;
    }

    match config.save() {
        Ok(path) => {
            println!("✅ Configuration saved to {}", path.display());
            println!("Home: {}", config.home_address);
            if config.has_work() {
                println!("Work: {}", config.work_address);
            }
            println!("\nRun 'commute' to see routes home");
            if config.has_work() {
                println!("Run 'commute -w' to see routes to work");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error saving config: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(request: TripRequest) -> ExitCode {
    let config = match CommuteConfig::load() {
        Ok(config) => config.with_api_key_override(std::env::var(API_KEY_ENV).ok()),
        Err(e) => {
            eprintln!("Error loading config: {e}");
            return ExitCode::FAILURE;
        }
    };

    let trip = match select_trip(&request, &config) {
        Ok(trip) => trip,
        Err(e) => {
            eprintln!("❌ {e}");
            eprintln!("Example: commute \"U District Station\" \"Capitol Hill\"");
            return ExitCode::FAILURE;
        }
    };
    println!("{}", report::trip_intro(&trip));

    let directions = match DirectionsClient::new(DirectionsConfig::new(&config.google_api_key)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error creating directions client: {e}");
            return ExitCode::FAILURE;
        }
    };

    let resolver = match LocationResolver::standard(
        ResolverConfig::new().with_platform_locator(platform_locator()),
    ) {
        Ok(resolver) => resolver,
        Err(e) => {
            eprintln!("Error setting up location providers: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pipeline = Pipeline::new(
        resolver,
        directions.clone(),
        RouteQueryClient::new(directions),
        SystemClock,
        PlannerConfig::default(),
    );

    let plan = match pipeline.plan(trip.origin.clone(), &trip.destination).await {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("\n{}", report::render_error(&e));
            return ExitCode::FAILURE;
        }
    };

    if trip.origin_source == OriginSource::Detect {
        println!("📍 Detected location: {}", plan.origin);
    }
    print!("{}", report::render_outcome(&trip, &plan.outcome, &Local));

    match plan.outcome {
        Outcome::NoEligibleRoutes => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}
