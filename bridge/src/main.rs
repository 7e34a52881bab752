//! edupay wallet bridge.
//!
//! Runs the wallet session for a course site and exposes it over HTTP, so page
//! components on another origin can read the connected wallet and request payments.
//!
//! Endpoints:
//! - `GET /providers` – Wallet picker entries, with installation status
//! - `GET /wallet` – The connected wallet, or `null`
//! - `GET /state` – Connection state
//! - `POST /connect` – Connect a wallet by brand name
//! - `POST /disconnect` – Disconnect the current wallet
//! - `POST /pay` – Pay a course price with the connected wallet
//! - `GET /explorer` – Block explorer link for the connected wallet
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `HOST`, `PORT` control binding address
//! - `CONFIG` selects the configuration file
//! - `OTEL_*` variables enable trace export

mod config;
mod handlers;
mod run;
mod sig_down;
#[cfg(feature = "telemetry")]
mod telemetry;

use std::process;

use crate::run::run;

#[tokio::main]
async fn main() {
    let result = run().await;
    if let Err(e) = result {
        println!("{e}");
        process::exit(1)
    }
}
