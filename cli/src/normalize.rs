use crate::error::{Result, ResultExt};
use crate::ui;
use dmvic_client::{normalize, RawUpstreamResponse};
use serde_json::Value;
use std::fs;

pub fn execute(file: &str, status: u16) -> Result<()> {
    let result = normalize(&read_response(file, status)?);
    ui::print_result(&result)?;
    Ok(())
}

/// Empty files read as a bodiless response
fn read_response(file: &str, status: u16) -> Result<RawUpstreamResponse> {
    let content = fs::read_to_string(file).with_context(|| format!("Reading {file}"))?;
    let body = if content.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&content).with_context(|| format!("Parsing {file}"))?
    };
    Ok(RawUpstreamResponse::new(status, body))
}
