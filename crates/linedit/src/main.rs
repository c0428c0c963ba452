use anyhow::Result;
use linedit::{launch, App, Config};
use log::LevelFilter;
use std::{env, ffi::OsString, process};
use tokio::io::{self, BufReader};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never mix with the prompt
    let mut logger = env_logger::Builder::from_default_env();
    if env::var_os("RUST_LOG").is_none() {
        logger.filter_level(LevelFilter::Warn);
        logger.filter_module("linedit", LevelFilter::Info);
        logger.filter_module("linecore", LevelFilter::Info);
    }
    logger.init();

    let args: Vec<OsString> = env::args_os().collect();
    let path = match launch::resolve_path(&args) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let document = match launch::open_document(&path).await {
        Ok(document) => document,
        Err(e) => {
            log::error!("Failed to load file '{}': {}", path.display(), e);
            eprintln!("Error! {}", e);
            process::exit(1);
        }
    };

    let config = match Config::load().await {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Failed to load config, using defaults: {}", e);
            Config::default()
        }
    };

    let mut app = App::new(document, config);
    let mut stdout = io::stdout();
    if let Err(e) = app.run(BufReader::new(io::stdin()), &mut stdout).await {
        log::error!("Application error: {}", e);
        eprintln!("Error! {}", e);
        process::exit(1);
    }

    Ok(())
}
