//! Model listing functionality
//!
//! This module handles the non-interactive `models` subcommand: fetch the
//! catalog once and print it to stdout.

use std::error::Error;

use crate::api::{Backend, HttpBackend};

pub async fn list_models(server_url: &str) -> Result<(), Box<dyn Error>> {
    let backend = HttpBackend::new(server_url);

    println!("Available models from {server_url}");
    println!("\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}\u{2501}");
    println!();

    let models = backend
        .fetch_models()
        .await
        .map_err(|e| -> Box<dyn Error> { e })?;

    if models.is_empty() {
        println!("No models found for this backend.");
        return Ok(());
    }

    println!("Found {} models:", models.len());
    println!();

    for model in models {
        println!("  \u{2022} {}", model.id);
        println!("    Name: {}", model.name);
        println!("    Provider: {}", model.provider);
        println!();
    }

    Ok(())
}
