// SPDX-License-Identifier: MPL-2.0

//! Receiver status example.
//!
//! Logs in to Hive and prints every attribute the receiver reports.
//!
//! # Usage
//!
//! ```bash
//! cargo run --example receiver_status -- <username> <password> [endpoint]
//! ```

use std::env;

use hive_lib::{Attribute, ConfigOverride, Session};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: {} <username> <password> [endpoint]", args[0]);
        std::process::exit(1);
    }

    let session = Session::init(ConfigOverride {
        endpoint: args.get(3).cloned(),
        ..ConfigOverride::credentials(&args[1], &args[2])
    })?;

    for attribute in Attribute::ALL {
        let label = attribute.to_string();
        match session.attribute(attribute).await {
            Ok(value) => println!("{label:<40} {value}"),
            Err(e) => {
                eprintln!("{label:<40} failed: {e}");
                session.invalidate();
            }
        }
    }

    Ok(())
}
