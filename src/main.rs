// Rust API Config Builder - Main executable
// Author: Gabriel Demetrios Lafis

use std::fs::{self, File};
use std::io::{self, BufRead, Write};

use clap::{Arg, ArgMatches, Command};
use log::{error, info};
use serde_json::Value as JsonValue;

use rust_api_config_builder::{
    api::{AppState, Server, ServerConfig, SharedStore},
    block::{BlockId, BlockTree, RequestTable},
    data::TableExtractor,
    export::ConfigExtractor,
    http::RequestExecutor,
    storage::{FileStorage, MemoryStorage, PresetStore},
    utils::{init_logging, AppError, AppResult, Config},
};

fn build_cli() -> Command<'static> {
    Command::new("Rust API Config Builder")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Gabriel Demetrios Lafis")
        .about("Builds declarative API extraction configurations")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Sets a custom config file")
                .takes_value(true),
        )
        .subcommand(
            Command::new("server")
                .about("Run the API server")
                .arg(
                    Arg::new("host")
                        .short('H')
                        .long("host")
                        .value_name("HOST")
                        .help("Sets the server host")
                        .takes_value(true),
                )
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Sets the server port")
                        .takes_value(true),
                ),
        )
        .subcommand(
            Command::new("preview")
                .about("Print the configuration documents of a workspace file")
                .arg(Arg::new("workspace").value_name("FILE").required(true)),
        )
        .subcommand(
            Command::new("detect")
                .about("List the field paths of a sample JSON response")
                .arg(Arg::new("sample").value_name("FILE").required(true)),
        )
        .subcommand(
            Command::new("import")
                .about("Append CSV rows to a block's query params or headers in a workspace file")
                .arg(Arg::new("workspace").value_name("FILE").required(true))
                .arg(Arg::new("csv").value_name("CSV").required(true))
                .arg(
                    Arg::new("block")
                        .short('b')
                        .long("block")
                        .value_name("ID")
                        .help("Block to import into, e.g. 1 or block-1")
                        .takes_value(true)
                        .default_value("1"),
                )
                .arg(
                    Arg::new("table")
                        .short('t')
                        .long("table")
                        .value_name("TABLE")
                        .help("Target table")
                        .takes_value(true)
                        .possible_values(&["params", "headers"])
                        .default_value("params"),
                )
                .arg(
                    Arg::new("header")
                        .long("has-header")
                        .help("Skip the first CSV line"),
                ),
        )
        .subcommand(
            Command::new("presets")
                .about("Manage saved auth configurations")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("List saved auth configurations"))
                .subcommand(
                    Command::new("delete")
                        .about("Delete a saved auth configuration")
                        .arg(Arg::new("id").value_name("ID").required(true))
                        .arg(
                            Arg::new("yes")
                                .short('y')
                                .long("yes")
                                .help("Do not ask for confirmation"),
                        ),
                ),
        )
}

fn open_presets(config: &Config) -> AppResult<PresetStore<SharedStore>> {
    let store: SharedStore = match config.storage.type_.as_str() {
        "file" => {
            let path = config.storage.path.clone().unwrap_or_else(|| "./data".to_string());
            Box::new(FileStorage::new(path)?)
        }
        _ => Box::new(MemoryStorage::new()),
    };

    Ok(PresetStore::open(store)?)
}

fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
        Err(_) => false,
    }
}

async fn run_server(config: &Config, matches: &ArgMatches) -> AppResult<()> {
    // Override config with command line arguments
    let host = matches.value_of("host").unwrap_or(&config.server.host);
    let port = matches
        .value_of("port")
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let server_config = ServerConfig {
        host: host.to_string(),
        port,
        workers: config.server.workers.unwrap_or_else(num_cpus::get),
        enable_cors: config.server.enable_cors,
    };

    let state = AppState::new(
        open_presets(config)?,
        RequestExecutor::new(config.http.timeout_secs)?,
        config.detection.collector(),
    );

    Server::new(state, server_config).run().await?;
    Ok(())
}

fn run_preview(matches: &ArgMatches) -> AppResult<()> {
    let path = matches.value_of("workspace").unwrap_or_default();
    let tree = BlockTree::load_workspace(path)?;
    let configs = ConfigExtractor::extract_tree(&tree);

    let text = serde_json::to_string_pretty(&configs)
        .map_err(|e| AppError::Other(e.to_string()))?;
    println!("{}", text);
    Ok(())
}

fn run_detect(config: &Config, matches: &ArgMatches) -> AppResult<()> {
    let path = matches.value_of("sample").unwrap_or_default();
    let text = fs::read_to_string(path)?;
    let sample: JsonValue = serde_json::from_str(&text)
        .map_err(|e| AppError::Other(format!("Sample is not valid JSON: {}", e)))?;

    for field in config.detection.collector().collect_sorted(&sample) {
        println!("{}", field);
    }
    Ok(())
}

fn run_import(matches: &ArgMatches) -> AppResult<()> {
    let workspace = matches.value_of("workspace").unwrap_or_default();
    let csv_path = matches.value_of("csv").unwrap_or_default();

    let id = matches.value_of("block")
        .map(|v| v.trim().trim_start_matches("block-"))
        .and_then(|v| v.parse::<u64>().ok())
        .map(BlockId)
        .ok_or_else(|| AppError::Other("Block ID must be a number".to_string()))?;
    let table = matches.value_of("table")
        .and_then(RequestTable::parse)
        .ok_or_else(|| AppError::Other("Table must be params or headers".to_string()))?;

    let rows = TableExtractor::rows_from_csv(File::open(csv_path)?, matches.is_present("header"))?;

    let mut tree = BlockTree::load_workspace(workspace)?;
    let block = tree.find_mut(id)
        .ok_or_else(|| AppError::Other(format!("No {} in {}", id, workspace)))?;
    let added = block.append_rows(table, rows);
    tree.save_workspace(workspace)?;

    info!("Imported {} rows into the {} of {}", added, table, id);
    Ok(())
}

fn run_presets(config: &Config, matches: &ArgMatches) -> AppResult<()> {
    let mut presets = open_presets(config)?;

    match matches.subcommand() {
        Some(("list", _)) => {
            if presets.list().is_empty() {
                println!("No saved auth configurations.");
            }
            for (id, label) in presets.dropdown_options() {
                println!("{}\t{}", id, label);
            }
        }
        Some(("delete", sub)) => {
            let id = sub.value_of("id")
                .and_then(|id| id.parse::<i64>().ok())
                .ok_or_else(|| AppError::Other("ID must be a number".to_string()))?;
            let assume_yes = sub.is_present("yes");

            let deleted = presets.delete(id, |preset| {
                assume_yes || confirm(&format!("Delete auth configuration \"{}\"?", preset.name))
            })?;

            if deleted {
                info!("Deleted auth configuration {}", id);
            } else {
                println!("Nothing deleted.");
            }
        }
        _ => {}
    }
    Ok(())
}

#[actix_web::main]
async fn main() -> AppResult<()> {
    let matches = build_cli().get_matches();

    // Load configuration
    let config = if let Some(config_path) = matches.value_of("config") {
        match Config::from_file(config_path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Error loading config file: {}", err);
                Config::default()
            }
        }
    } else {
        Config::default()
    };

    // Initialize logging
    if let Err(err) = init_logging(config.log_level_filter()) {
        eprintln!("Error initializing logger: {}", err);
    }

    let result = match matches.subcommand() {
        Some(("server", sub)) => run_server(&config, sub).await,
        Some(("preview", sub)) => run_preview(sub),
        Some(("detect", sub)) => run_detect(&config, sub),
        Some(("import", sub)) => run_import(sub),
        Some(("presets", sub)) => run_presets(&config, sub),
        _ => {
            println!("No subcommand specified. Use --help for usage information.");
            Ok(())
        }
    };

    if let Err(ref err) = result {
        error!("{}", err);
    }

    result
}
