use anyhow::Result;
use log::info;

use pic50::descriptors::FingerprintScheme;

use super::Settings;

/// Validate a stored model pair
pub fn run(settings: &Settings, name: &str, scheme: Option<FingerprintScheme>) -> Result<()> {
    use pic50::validator::validate_model;

    let store = settings.layout.model_store();
    info!("Validating model '{name}' in {}", store.dir().display());

    match validate_model(&store, name, scheme) {
        Ok(report) => {
            print!("{}", report.format_colored());

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
