use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.domain.as_deref() {
        crate::utils::parse_domain_range(raw)
            .map_err(|e| format!("invalid --domain '{raw}': {e}"))?;
    }
    if let Some(raw) = args.max_cells.as_deref() {
        crate::utils::parse_max_cells(raw)
            .map_err(|e| format!("invalid --max-cells '{raw}': {e}"))?;
    }
    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json, xml or html"
            ));
        }
    }
    let bounds = [&args.h_start, &args.h_end, &args.v_start, &args.v_end];
    if args.interactive && bounds.iter().any(|b| b.is_some()) {
        return Err("table bounds cannot be combined with --interactive".to_string());
    }
    Ok(())
}
