use crate::cli::OutputFormat;
use crate::handlers;

/// Print the procedure tree, one path per line or as JSON
pub fn handle(output_format: OutputFormat) -> anyhow::Result<()> {
    let shape = handlers::app_router()?.shape();

    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&shape)?);
        }
        OutputFormat::Text => {
            for procedure in &shape {
                println!("{:<9} {:<9} {}", procedure.kind, procedure.auth, procedure.path);
            }
            println!("{} procedures", shape.len());
        }
    }
    Ok(())
}
