use crate::cli::args::CliArgs;
use crate::output::OutputFormat;
use crate::records::NameDisplay;
use crate::utils;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(count) = args.count {
        if count > utils::MAX_RESULT_COUNT {
            return Err(format!(
                "invalid --count {count}, expected 0-{}",
                utils::MAX_RESULT_COUNT
            ));
        }
    }
    if let Some(raw) = args.nat.as_deref() {
        utils::parse_nat_csv(raw).map_err(|e| format!("invalid --nat '{raw}': {e}"))?;
    }
    if let Some(raw) = args.name_display.as_deref() {
        if NameDisplay::parse(raw).is_none() {
            return Err(format!(
                "invalid --name-display '{raw}', expected first, last, or full"
            ));
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json, csv, or html"
            ));
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid --timeout, expected positive integer".to_string());
        }
    }
    if let Some(debounce_ms) = args.debounce_ms {
        if debounce_ms > 60_000 {
            return Err("invalid --debounce-ms, expected at most 60000".to_string());
        }
    }
    Ok(())
}
