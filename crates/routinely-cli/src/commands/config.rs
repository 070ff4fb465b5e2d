use clap::Subcommand;
use routinely_core::storage::Config;

use super::CliResult;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a config value by key
    Get { key: String },
    /// Set a config value
    Set { key: String, value: String },
    /// List all config values
    List,
}

pub fn run(action: ConfigAction) -> CliResult {
    let mut cfg = Config::load()?;

    match action {
        ConfigAction::Get { key } => match cfg.get(&key) {
            Some(value) => println!("{value}"),
            None => return Err(format!("unknown key: {key}").into()),
        },
        ConfigAction::Set { key, value } => {
            cfg.set(&key, &value)?;
            cfg.save()?;
            println!("{key} = {value}");
        }
        ConfigAction::List => {
            for (key, value) in cfg.entries() {
                println!("{key} = {value}");
            }
        }
    }
    Ok(())
}
