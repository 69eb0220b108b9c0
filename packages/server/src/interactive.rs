//! Interactive mode for the server.
//!
//! Prompts for the dataset path, bind address and port before starting the
//! server.

use dialoguer::{Confirm, Input};
use hotspot_map_store::hotspots_file_from_env;

use crate::{DEFAULT_BIND_ADDR, DEFAULT_PORT};

/// Runs the server in interactive mode, prompting for configuration.
///
/// Sets `HOTSPOTS_FILE`, `BIND_ADDR` and `PORT` from the answers and
/// delegates to [`super::run_server`].
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run() -> std::io::Result<()> {
    println!("Hotspot Map Server");
    println!();

    let default_file = hotspots_file_from_env().display().to_string();
    let hotspots_file: String = Input::new()
        .with_prompt("Hotspots CSV")
        .default(default_file.clone())
        .interact_text()
        .unwrap_or(default_file);

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(DEFAULT_BIND_ADDR.to_string())
        .interact_text()
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(DEFAULT_PORT)
        .interact_text()
        .unwrap_or(DEFAULT_PORT);

    // SAFETY: No other threads exist yet; the server reads these once
    // during startup.
    unsafe {
        std::env::set_var("HOTSPOTS_FILE", &hotspots_file);
        std::env::set_var("BIND_ADDR", &bind_addr);
        std::env::set_var("PORT", port.to_string());
    }

    if !Confirm::new()
        .with_prompt(format!("Serve {hotspots_file} on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server().await
}
