use colored::Colorize;
use dmvic_client::NormalizedResult;

/// Print a success message
pub fn success_message(message: &str) {
    println!("{} {}", "✅".green(), message.green());
}

/// Print a warning message
pub fn warning_message(message: &str) {
    println!("{} {}", "⚠️ ".yellow(), message.yellow());
}

/// Print a section header to separate logical sections of output
pub fn section_header(title: &str) {
    println!("\n{}", format!("==== {} ====", title).cyan().bold());
}

/// Print a simple informational message
pub fn info_message(message: &str) {
    println!("{} {}", "ℹ️ ".blue(), message.blue());
}

/// One-line verdict followed by the sparse JSON rendering
pub fn print_result(result: &NormalizedResult) -> serde_json::Result<()> {
    if result.is_success() {
        success_message(&format!("Success (HTTP {})", result.http_status_code()));
    } else {
        for error in result.errors() {
            warning_message(&format!("{}: {}", error.sdk_error_code, error.error_text));
        }
    }
    if result.token_refreshed() == Some(true) {
        info_message("Token was refreshed during this call");
    }

    println!("{}", serde_json::to_string_pretty(&result.to_json())?);
    Ok(())
}
