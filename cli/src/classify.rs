use crate::error::Result;
use crate::ui;
use colored::Colorize;
use dmvic_client::{ErrorClassifier, SdkErrorCode};

pub fn execute(message: &str, verbose: bool) -> Result<()> {
    let classifier = ErrorClassifier::shared();
    let code = classifier.classify(message);

    if code == SdkErrorCode::Unrecognized {
        ui::warning_message("No pattern matched this message");
    }
    println!("{}", code.as_str().bold());

    if verbose {
        let matches = classifier.matching_codes(message);
        ui::info_message(&format!("{} pattern(s) matched", matches.len()));
    }
    Ok(())
}
