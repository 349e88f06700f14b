//! Advanced usage example for parse-address.
//!
//! This example demonstrates:
//! - Custom configuration, including environment overrides
//! - Forcing a single decomposer
//! - Batch parsing and timing
//! - JSON output
//!
//! Run with: cargo run --example advanced_usage --features serde

use std::time::Instant;

use parse_address::{AddressParser, Error, ParseMode, ParserConfig};

fn main() -> Result<(), Error> {
    println!("parse-address Advanced Usage Example");
    println!("====================================\n");

    // Example 1: Custom configuration
    println!("1. Custom Configuration");
    println!("----------------------");

    let config = ParserConfig::builder()
        .max_input_len(1_000)
        .max_working_len(200)
        .build();
    let parser = AddressParser::with_config(config)?;
    println!("Parser bounds: {:?}", parser.config());

    match parser.parse(&"x".repeat(1_001)) {
        Ok(_) => println!("Unexpected success"),
        Err(e) => println!("Oversized input rejected: {} ({})", e, e.kind()),
    }

    let env_config = ParserConfig::from_env()?;
    println!("Bounds from environment: {:?}\n", env_config);

    // Example 2: Forced modes
    println!("2. Forced Modes");
    println!("--------------");

    let input = "Mission St and Valencia St";
    for name in ["auto", "standard", "intersection", "po_box"] {
        if let Some(mode) = ParseMode::from_name(name) {
            let result = parser.parse_with_mode(input, mode)?;
            println!("{:>12}: {}", mode.as_str(), result.type_name());
        }
    }
    println!();

    // Example 3: Batch parsing
    println!("3. Batch Parsing");
    println!("---------------");

    let addresses = [
        "123 Main Street, New York, NY 10001",
        "456 Oak Avenue, Los Angeles, CA 90210",
        "789 Pine Road, Chicago, IL 60601",
        "Broadway @ W 42nd St, New York, NY",
        "P.O. Box 42, Springfield, IL 62701-0042",
        "",
    ];

    let start = Instant::now();
    let results = parser.parse_batch(&addresses);
    println!("Parsed {} inputs in {:?}", results.len(), start.elapsed());

    let failures = results.iter().filter(|r| r.is_err()).count();
    println!("Rejected inputs: {failures}\n");

    // Example 4: JSON output
    println!("4. JSON Output");
    println!("-------------");

    for (address, result) in addresses.iter().zip(results) {
        match result {
            Ok(parsed) => match serde_json::to_string(&parsed) {
                Ok(json) => println!("{address:?}\n  {json}"),
                Err(e) => println!("{address:?}\n  serialization failed: {e}"),
            },
            Err(e) => println!("{address:?}\n  error: {e}"),
        }
    }

    println!("\nAdvanced usage example completed!");
    Ok(())
}
