#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Hotspot map API server binary.
//!
//! Runs the interactive prompt when started with `--interactive` (or `-i`),
//! otherwise reads its configuration from the environment.

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if std::env::args()
        .skip(1)
        .any(|arg| arg == "--interactive" || arg == "-i")
    {
        hotspot_map_server::interactive::run().await
    } else {
        hotspot_map_server::run_server().await
    }
}
