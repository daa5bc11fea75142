use debtpool_runner::{DebtPoolConfig, Simulation};

fn print_help() {
    eprintln!(
        r#"DebtPool - collateralized debt ledger simulation

USAGE:
    debtpool [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --help              Print this help message

ENVIRONMENT VARIABLES:
    DEBTPOOL_SCAN_INTERVAL_MS   Liquidation scan interval (default: 5000)
    DEBTPOOL_DURATION_MS        Simulation duration (default: 10000)
    RUST_LOG                    Log level filter (default: info)

EXAMPLES:
    # Run with defaults
    debtpool

    # Run with config file
    debtpool --config debtpool.json

    # Scan every 500ms for one minute
    DEBTPOOL_SCAN_INTERVAL_MS=500 DEBTPOOL_DURATION_MS=60000 debtpool
"#
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => {
            log::info!("Loading configuration from: {}", path);
            DebtPoolConfig::from_file(&path)?
        }
        None => {
            log::info!("Using default configuration");
            DebtPoolConfig::default()
        }
    };
    config.apply_env()?;
    config.validate()?;

    log::info!("Collateral enabled: {:?}", config.ledger.enabled_collateral);
    log::info!("Seed positions: {}", config.positions.len());
    log::info!("Scan interval: {}ms", config.monitor.scan_interval_ms);

    let report = Simulation::new(config)?.run().await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
