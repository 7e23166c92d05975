//! Power Bill Store command line
//!
//! Native front end over the JSON file backend. On the web the store is
//! driven through the `web` module bindings instead.

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::io::{self, Read};
    use std::path::PathBuf;

    use clap::{Parser, Subcommand};
    use power_bill_store::consts::STORAGE_KEY;
    use power_bill_store::platform::FileBackend;
    use power_bill_store::{PlannerInputs, StorageStore, StoreConfig, StoreError};

    #[derive(Debug, thiserror::Error)]
    pub enum CliError {
        #[error("failed to read input: {0}")]
        Input(#[from] io::Error),
        #[error("input is not valid JSON: {0}")]
        InvalidJson(#[from] serde_json::Error),
        #[error("input must be a JSON object")]
        NotAnObject,
        #[error("no saved data")]
        NoSavedData,
        #[error(transparent)]
        Store(#[from] StoreError),
    }

    #[derive(Parser, Debug)]
    #[command(name = "power-bill-store", about = "Inspect and edit the power bill planner's saved data")]
    pub struct Cli {
        /// Directory holding the storage file
        #[arg(long, env = "POWER_BILL_DATA_DIR", default_value = ".")]
        data_dir: PathBuf,

        /// Key the record is stored under
        #[arg(long, env = "POWER_BILL_STORE_KEY", default_value = STORAGE_KEY)]
        key: String,

        #[command(subcommand)]
        command: Command,
    }

    #[derive(Subcommand, Debug)]
    enum Command {
        /// Save a JSON object (argument, or `-` for stdin)
        Save {
            #[arg(default_value = "-")]
            input: String,
        },
        /// Print the saved object
        Load,
        /// Delete the saved object
        Clear,
        /// Show whether data is saved and when
        Status,
    }

    pub fn run(cli: Cli) -> Result<(), CliError> {
        let backend = FileBackend::in_dir(&cli.data_dir);
        log::debug!("Using storage file {}", backend.path().display());
        let store = StorageStore::with_config(backend, StoreConfig::with_key(cli.key));

        match cli.command {
            Command::Save { input } => {
                let text = if input == "-" {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    buf
                } else {
                    input
                };
                let serde_json::Value::Object(data) = serde_json::from_str::<serde_json::Value>(&text)? else {
                    return Err(CliError::NotAnObject);
                };
                let timestamp = store.try_save(&data)?;
                println!("Saved at {}", timestamp);
            }
            Command::Load => {
                let data = store.try_load()?.ok_or(CliError::NoSavedData)?;
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            Command::Clear => {
                store.try_clear()?;
                println!("Cleared");
            }
            Command::Status => {
                if !store.has_saved_data() {
                    println!("No saved data");
                    return Ok(());
                }
                match store.try_last_saved_time()? {
                    Some(ts) => println!("Last saved: {}", ts),
                    None => println!("Saved data has no timestamp"),
                }
                let inputs = match store.try_load_as::<PlannerInputs>() {
                    Ok(inputs) => inputs,
                    Err(StoreError::Convert(e)) => {
                        log::debug!("Saved data is not planner-shaped: {}", e);
                        None
                    }
                    Err(e) => return Err(e.into()),
                };
                if let Some(inputs) = inputs {
                    println!("Appliances: {}", inputs.appliances.len());
                    println!("Estimated usage: {:.1} kWh/month", inputs.monthly_kwh());
                    if let Some(cost) = inputs.estimated_cost() {
                        println!("Estimated cost: {:.2}", cost);
                    }
                    if let Some(left) = inputs.budget_remaining() {
                        println!("Budget remaining: {:.2}", left);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    let cli = cli::Cli::parse();
    if let Err(e) = cli::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::start, this is just to satisfy the compiler
}
