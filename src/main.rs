//! firstlink - follow first links until Philosophy

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;

use firstlink::config::{self, Config};
use firstlink::{DirectoryProvider, DocumentProvider, HttpProvider, PageId, PathWalker, WalkResult};

#[derive(Parser)]
#[command(name = "firstlink")]
#[command(
    version,
    about = "Follow the first link of each page until the target, a loop, or a dead end",
    long_about = None
)]
#[command(after_help = "EXAMPLES:
    firstlink                                                  Start from the configured page
    firstlink Banana                                           Start from Banana
    firstlink --dir saved/ Tea                                 Walk saved pages offline")]
struct Cli {
    /// Page to start from, as a URL or a title (defaults to the configured
    /// start page)
    #[arg(value_name = "START")]
    start: Option<String>,

    /// Page that ends the walk successfully
    #[arg(short, long, value_name = "PAGE")]
    target: Option<String>,

    /// Read pages from saved .html files in this directory
    #[arg(short, long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Config file (defaults to the nearest firstlink.toml)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// CSS selector for the content blocks of a page
    #[arg(long, value_name = "CSS")]
    selector: Option<String>,

    /// Follow links to other sites
    #[arg(long)]
    allow_external: bool,

    /// Minimum delay between HTTP requests, in milliseconds
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Only print the final outcome
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let (provider, start, target) = match open_provider(&config) {
        Ok(setup) => setup,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    let quiet = cli.quiet || cli.json;

    let mut walker = PathWalker::new(provider);
    let result = walker.walk_with(&start, &target, |page| {
        if !quiet {
            println!("--> {page}");
        }
    });

    if cli.json {
        match serde_json::to_string_pretty(&result) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                return ExitCode::from(2);
            }
        }
    } else {
        report(&result);
    }

    if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn load_config(cli: &Cli) -> firstlink::Result<Config> {
    let cwd = std::env::current_dir()?;
    let (mut config, _path) = config::load(cli.config.as_deref(), &cwd)?;

    if let Some(start) = &cli.start {
        config.start = start.clone();
    }
    if let Some(target) = &cli.target {
        config.target = target.clone();
    }
    if let Some(dir) = &cli.dir {
        config.pages_dir = Some(dir.clone());
    }
    if let Some(selector) = &cli.selector {
        config.content_selector = selector.clone();
    }
    if cli.allow_external {
        config.internal_only = false;
    }
    if let Some(ms) = cli.interval_ms {
        config.request_interval_ms = ms;
    }
    Ok(config)
}

type Setup = (Box<dyn DocumentProvider>, PageId, PageId);

fn open_provider(config: &Config) -> firstlink::Result<Setup> {
    let options = config.html_options()?;
    let start = config.start_page()?;
    let target = config.target_page()?;

    if let Some(dir) = &config.pages_dir {
        return Ok((Box::new(DirectoryProvider::new(dir, options)), start, target));
    }

    let mut builder = HttpProvider::builder()
        .interval(Duration::from_millis(config.request_interval_ms))
        .timeout(Duration::from_secs(config.timeout_secs));
    if let Some(agent) = &config.user_agent {
        builder = builder.user_agent(agent);
    }
    Ok((Box::new(builder.build(options)?), start, target))
}

fn report(result: &WalkResult) {
    match result {
        WalkResult::Success { path } => {
            println!("Success: reached the target in {} steps", path.len() - 1);
        }
        WalkResult::LoopDetected { repeated, .. } => {
            println!("Failure: loop at {repeated}");
        }
        WalkResult::DeadEnd { path } => match path.last() {
            Some(page) => println!("Failure: dead end at {page}"),
            None => println!("Failure: no page to start from"),
        },
    }
}
