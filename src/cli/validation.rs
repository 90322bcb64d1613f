use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(results) = args.results {
        if results == 0 || results > 5000 {
            return Err("invalid results, expected 1-5000".to_string());
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    if let Some(raw) = args.nationalities.as_deref() {
        crate::utils::parse_nationalities_csv(raw)
            .map_err(|e| format!("invalid --nationalities '{raw}': {e}"))?;
    }
    if let Some(raw) = args.endpoint.as_deref() {
        reqwest::Url::parse(raw).map_err(|e| format!("invalid --endpoint '{raw}': {e}"))?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json or html"
            ));
        }
    }
    for raw in args.command.iter() {
        crate::cli::commands::parse_command(raw)
            .map_err(|e| format!("invalid --command '{raw}': {e}"))?;
    }
    Ok(())
}
