use crate::error::Result;
use crate::ui;
use dialoguer::{theme::ColorfulTheme, Confirm};
use dmvic_client::config::ensure_config_file_exists;
use std::path::Path;

pub fn execute(config_path: &str, force: bool) -> Result<()> {
    let path = Path::new(config_path);
    ui::section_header("DMVIC Configuration Setup");

    let overwrite = if path.exists() && !force {
        ui::warning_message(&format!("{} already exists", path.display()));
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Overwrite it with the default template?")
            .default(false)
            .interact()?
    } else {
        force
    };

    if ensure_config_file_exists(path, overwrite)? {
        ui::success_message(&format!("Wrote {}", path.display()));
        ui::info_message("Set client_id and credentials, or export DMVIC_USERNAME / DMVIC_PASSWORD");
    } else {
        ui::info_message("Kept the existing configuration");
    }
    Ok(())
}
