use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dmvic")]
#[command(
    author,
    version,
    about = "Operator tool for the DMVIC motor insurance API"
)]
pub struct Cli {
    /// Configuration file path
    #[clap(short, long, global = true, default_value = "dmvic.toml")]
    pub config: String,

    /// Enable verbose output with additional information
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a default dmvic.toml
    Init {
        /// Overwrite an existing configuration without asking
        #[clap(long, default_value_t = false)]
        force: bool,
    },

    /// Classify an upstream error message
    Classify {
        /// Error text as returned by the upstream
        message: String,
    },

    /// Normalize a saved upstream response body
    Normalize {
        /// JSON file holding the raw response body
        file: String,

        /// HTTP status the body was returned with
        #[clap(short, long, default_value_t = 200)]
        status: u16,
    },

    /// Send one call through the full pipeline
    Call {
        /// HTTP method (GET, POST, ...)
        method: String,

        /// Endpoint path, e.g. /api/V5/Integration/ValidateInsurance
        path: String,

        /// JSON file used as the request body
        #[clap(short, long)]
        body: Option<String>,

        /// Send without a bearer token
        #[clap(long, default_value_t = false)]
        public: bool,
    },
}
