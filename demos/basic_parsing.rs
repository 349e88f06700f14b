//! Basic address parsing example
//!
//! This example demonstrates how to classify a few location strings
//! and print their component parts.
//!
//! Run with: cargo run --example basic_parsing

use parse_address::{AddressParser, ParseResult};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("parse-address Basic Parsing Example");
    println!("===================================");

    let addresses = vec![
        "1005 N Gravenstein Hwy Sebastopol CA 95472",
        "789 Oak Avenue, Portland, OR 97201-1234",
        "123 Main St Apt 4B San Francisco CA 94105",
        "5th Ave & Main",
        "PO Box 5678 New York NY 10001",
        "",
    ];

    let parser = AddressParser::new();

    println!("\nParsing addresses:");
    println!("-----------------");

    for address in addresses {
        println!("\nInput: {:?}", address);

        match parser.parse(address) {
            Ok(ParseResult::Address(parsed)) | Ok(ParseResult::PoBox(parsed)) => {
                let mut components: Vec<_> = parsed.components().into_iter().collect();
                components.sort();
                for (name, value) in components {
                    println!("  {name}: {value}");
                }
            }
            Ok(ParseResult::Intersection(parsed)) => {
                println!("  Street 1: {} {}", parsed.street1, parsed.type1);
                println!("  Street 2: {} {}", parsed.street2, parsed.type2);
                if !parsed.city.is_empty() {
                    println!("  City: {}", parsed.city);
                }
            }
            Ok(ParseResult::None) => println!("  (not an address)"),
            Err(e) => println!("  Error [{}]: {}", e.kind(), e),
        }
    }

    println!("\nExample completed successfully!");
    Ok(())
}
