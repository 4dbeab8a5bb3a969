use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use dmvic_client::{ApiCall, DefaultDispatcher, DmvicConfig, Method};
use serde_json::Value;
use std::fs;
use tokio::runtime::Runtime;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CallArgs {
    pub config_path: String,
    pub method: String,
    pub path: String,
    pub body: Option<String>,
    pub public: bool,
}

pub fn execute(args: CallArgs) -> Result<()> {
    let rt = Runtime::new()
        .map_err(|e| CliError::Other(format!("Failed to create async runtime: {}", e)))?;

    rt.block_on(execute_async(args))
}

async fn execute_async(args: CallArgs) -> Result<()> {
    let call = build_call(&args)?;
    let config = DmvicConfig::load_with_validation(&args.config_path)?;
    debug!(config = %args.config_path, base_url = %config.base_url, "Loaded configuration");
    let dispatcher = DefaultDispatcher::from_config(&config)?;

    let result = dispatcher.dispatch(&call).await?;
    ui::print_result(&result)?;

    if result.is_success() {
        Ok(())
    } else {
        Err(CliError::UpstreamFailure {
            code: result
                .first_error_code()
                .map(|code| code.to_string())
                .unwrap_or_else(|| format!("HTTP {}", result.http_status_code())),
        })
    }
}

fn build_call(args: &CallArgs) -> Result<ApiCall> {
    let method = Method::from_bytes(args.method.to_uppercase().as_bytes())
        .map_err(|_| CliError::Other(format!("Invalid HTTP method '{}'", args.method)))?;

    let body = match &args.body {
        Some(file) => {
            let content = fs::read_to_string(file).with_context(|| format!("Reading {file}"))?;
            Some(serde_json::from_str::<Value>(&content).with_context(|| format!("Parsing {file}"))?)
        }
        None => None,
    };

    Ok(ApiCall {
        method,
        path: args.path.clone(),
        body,
        protected: !args.public,
    })
}
