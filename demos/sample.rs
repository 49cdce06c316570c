//! Parse a commented WSON document, inspect it, and write it back out.
//!
//! Run with: cargo run --example sample

use serde::Deserialize;
use serde_wson::{from_str, parse, serialize, Value, Version};
use std::error::Error;

const DOCUMENT: &str = r#"{
    // Response envelope
    status = "success",
    code: 200,
    message = "Data retrieved successfully",

    user = {
        id = 123,
        name = "John Doe",
        email = "john.doe@example.com",
        roles = ["admin", "editor"],   # primary roles first
        created_at = 2024-10-09 12:30:00
    },

    /* Open and finished work,
       newest last */
    tasks = [
        { id = 1, title = "Task 1", completed = false },
        { id = 2, title = "Task 2", completed = true }
    ],

    metadata = {
        version = 1.0.0,
        release_date = 2024-10-09
    }
}"#;

#[derive(Debug, Deserialize)]
struct Metadata {
    version: Version,
    release_date: chrono::NaiveDate,
}

#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    code: u16,
    metadata: Metadata,
}

fn main() -> Result<(), Box<dyn Error>> {
    let map = parse(DOCUMENT)?;

    println!("Parsed entries:");
    for (key, value) in &map {
        println!("  {:<10} {:<8} {}", key, value.type_name(), value);
    }

    if let Some(Value::Array(tasks)) = map.get("tasks") {
        let done = tasks
            .iter()
            .filter(|task| task.get("completed") == Some(&Value::Bool(true)))
            .count();
        println!("\n{} of {} tasks completed", done, tasks.len());
    }

    let envelope: Envelope = from_str(DOCUMENT)?;
    println!(
        "\n{} ({}) at version {} released {}",
        envelope.status, envelope.code, envelope.metadata.version, envelope.metadata.release_date
    );

    let canonical = serialize(&map)?;
    println!("\nCanonical form:\n{}", canonical);

    assert_eq!(parse(&canonical)?, map);
    println!("\n✓ Round-trip successful");

    Ok(())
}
