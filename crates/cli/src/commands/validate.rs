use std::process;

use tafweed_repository::DELEGATIONS_KEY;
use tafweed_storage::{FileStore, KeyValueStore};

use crate::{report_error, Context, OutputFormat};

static DELEGATIONS_SCHEMA_STR: &str = include_str!("../../../../schema/delegations-schema.json");

pub(crate) fn cmd_validate(ctx: &Context) {
    let (output, quiet) = (ctx.output, ctx.quiet);

    let schema: serde_json::Value = match serde_json::from_str(DELEGATIONS_SCHEMA_STR) {
        Ok(s) => s,
        Err(e) => {
            let msg = format!("internal error: failed to parse embedded schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };
    let validator = match jsonschema::validator_for(&schema) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("internal error: failed to compile schema: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let store = FileStore::new(&ctx.data_dir);
    let blob = match store.get(DELEGATIONS_KEY) {
        Ok(Some(b)) => b,
        Ok(None) => {
            let msg = format!("error: no stored collection in '{}'", ctx.data_dir.display());
            report_error(&msg, output, quiet);
            process::exit(1);
        }
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };
    let doc: serde_json::Value = match serde_json::from_str(&blob) {
        Ok(v) => v,
        Err(e) => {
            let msg = format!("error parsing stored collection: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    let errors: Vec<String> = validator
        .iter_errors(&doc)
        .map(|e| format!("{}", e))
        .collect();

    if errors.is_empty() {
        if !quiet {
            match output {
                OutputFormat::Text => println!("valid"),
                OutputFormat::Json => println!("{{\"valid\": true}}"),
            }
        }
    } else {
        match output {
            OutputFormat::Text => {
                if !quiet {
                    eprintln!("invalid collection");
                    for err in &errors {
                        eprintln!("  - {}", err);
                    }
                }
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                eprintln!(
                    "{}",
                    serde_json::to_string_pretty(&json).unwrap_or_default()
                );
            }
        }
        process::exit(1);
    }
}
