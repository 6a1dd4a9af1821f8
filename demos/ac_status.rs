// SPDX-License-Identifier: MPL-2.0

//! Demo program: list the account's air conditioners, or run one operation.
//!
//! Credentials come from `MIRAIE_LOGIN_ID` and `MIRAIE_PASSWORD`, either in
//! the environment or in a `.env` file in the working directory. Logs go to
//! stderr; set `RUST_LOG=miraie_lib=debug` for request-level detail.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example ac_status
//! cargo run --example ac_status -- <device|all> <operation> [value]
//! ```
//!
//! # Example
//!
//! ```bash
//! cargo run --example ac_status -- "Living Room" set_temperature 24
//! cargo run --example ac_status -- all turnOff
//! ```

use std::env;

use miraie_lib::{DeviceManager, OperationKind, Outcomes, Selector};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("miraie_lib=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() == 2 || args.len() > 4 {
        eprintln!("Usage: {} [<device|all> <operation> [value]]", args[0]);
        eprintln!();
        eprintln!("Operations:");
        for kind in OperationKind::ALL {
            eprintln!("  {kind}");
        }
        std::process::exit(1);
    }

    // A missing .env file is fine: the variables may already be exported.
    dotenvy::dotenv().ok();
    let manager = DeviceManager::initialize_from_env().await?;

    if args.len() == 1 {
        for summary in manager.list_devices()? {
            let features = manager
                .registry()
                .get(&summary.name)
                .map(|device| device.capabilities().feature_names().join(", "))
                .unwrap_or_default();
            println!("{summary} [{features}]");
        }
        for outcome in manager.get_status(Selector::All).await? {
            println!("  {outcome}");
        }
        manager.logout().await;
        return Ok(());
    }

    let selector = Selector::parse(Some(&args[1]));
    let operation: OperationKind = args[2].parse()?;
    let value = args.get(3).map(String::as_str);

    let outcomes = manager.execute(selector, operation, value).await?;
    for outcome in &outcomes {
        println!("{outcome}");
    }
    println!(
        "{} succeeded, {} failed",
        outcomes.succeeded(),
        outcomes.failed()
    );

    manager.logout().await;
    Ok(())
}
