use crate::error::{DmvicError, Result};
use std::fs;
use std::path::Path;

/// Generate the default dmvic.toml template
pub fn generate_default_config_template() -> String {
    r#"# DMVIC client configuration

# Base URL of the DMVIC API (UAT shown)
base_url = "https://uat-api.dmvic.com"

# Client identity issued by DMVIC, sent as the ClientID header
client_id = "REPLACE-WITH-CLIENT-ID"

# Coverage gap advisories: "strict" leaves them for manual confirmation,
# "bypass" confirms the held issuance automatically
coverage_gap_policy = "strict"

# Request timeout in seconds
timeout_seconds = 30

# Token lifetime used when the login response has no usable expiry
token_ttl_seconds = 3600

# Login credentials. DMVIC_USERNAME / DMVIC_PASSWORD override these.
[auth]
username = "agent@example.co.ke"
# password = ""

# Extra headers applied to every request (optional)
# [headers]
# "X-Channel" = "broker-portal"

# Endpoints the client calls on its own behalf (defaults shown)
# [endpoints]
# login = "/api/V1/Account/Login"
# confirm_issuance = "/api/V5/IntermediaryIntegration/ConfirmCertificateIssuance"
"#
    .to_string()
}

/// Write the template unless the file exists. Returns whether it was written.
pub fn ensure_config_file_exists<P: AsRef<Path>>(config_path: P, overwrite: bool) -> Result<bool> {
    let path = config_path.as_ref();
    if path.exists() && !overwrite {
        return Ok(false);
    }

    fs::write(path, generate_default_config_template()).map_err(DmvicError::Io)?;
    Ok(true)
}
