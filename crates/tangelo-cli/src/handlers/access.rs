//! Access command handler

use crate::cli::AccessArgs;
use crate::error::{Error, Result};
use crate::logging::timing::Timer;
use crate::output::{format_value_compact, OutputWriter};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tangelo_core::Tangelo;
use tracing::{debug, info, instrument};

/// Handle the access command
#[instrument(skip(tangelo, output), fields(spec = %args.spec))]
pub fn handle_access(args: AccessArgs, tangelo: &Tangelo, output: &mut OutputWriter) -> Result<()> {
    let _timer = Timer::new("access_command");

    let spec: Value = serde_json::from_str(&args.spec)
        .map_err(|e| Error::invalid_args(format!("accessor spec is not valid JSON: {}", e)))?;
    let accessor = tangelo.accessor(Some(&spec))?;
    debug!(kind = ?accessor.kind(), "Compiled accessor");

    let records = match &args.records {
        Some(path) => read_records_file(path)?,
        None => read_records_stdin()?,
    };

    let values = apply(&accessor, &records)?;
    info!(records = values.len(), "Applied accessor");

    output.result(&values, |_| {
        values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{}: {}", i, format_value_compact(v)))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

/// Evaluate the accessor on each record with its position; misses become null
fn apply(accessor: &tangelo_core::Accessor, records: &Value) -> Result<Vec<Value>> {
    let evaluate = |record: &Value, index: usize| -> Result<Value> {
        Ok(accessor.call(record, Some(index))?.unwrap_or(Value::Null))
    };

    match records {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, record)| evaluate(record, i))
            .collect(),
        single => Ok(vec![evaluate(single, 0)?]),
    }
}

fn read_records_file(path: &Path) -> Result<Value> {
    if !path.exists() {
        return Err(Error::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|_| Error::InvalidFormat {
        path: path.to_path_buf(),
        expected: "JSON".to_string(),
    })
}

fn read_records_stdin() -> Result<Value> {
    let mut content = String::new();
    io::stdin().read_to_string(&mut content)?;
    Ok(serde_json::from_str(&content)?)
}
