use std::env;

use sitecheck_core::config::API_KEY_VAR;

use crate::cli::KeyCommands;
use crate::commands::common::{describe_key_source, KeySource};
use crate::error::CliError;
use crate::secret_store::{mask_api_key, ApiKeyStore};

pub fn run_key(command: KeyCommands) -> Result<(), CliError> {
    let store = ApiKeyStore::default();
    match command {
        KeyCommands::Set { key } => {
            store.save(&key)?;
            println!("Kunci API {} disimpan di keychain", mask_api_key(key.trim()));
        }
        KeyCommands::Status => {
            match describe_key_source(|name| env::var(name).ok(), &store)? {
                KeySource::Environment(masked) => {
                    println!("Memakai kunci API {masked} dari {API_KEY_VAR}");
                }
                KeySource::Keychain(masked) => println!("Memakai kunci API {masked} dari keychain"),
                KeySource::Missing => {
                    println!("Kunci API belum diatur. Atur {API_KEY_VAR} atau jalankan `sitecheck key set`.");
                }
            }
        }
        KeyCommands::Clear => {
            store.clear()?;
            println!("Kunci API tersimpan dihapus");
        }
    }
    Ok(())
}
