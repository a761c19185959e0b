use serde_json::{json, Value};

use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&success_body(message, data))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

fn success_body(message: &str, data: Option<Value>) -> Value {
    let mut response = json!({
        "success": true,
        "message": message
    });

    if let (Some(Value::Object(extra)), Some(body)) = (data, response.as_object_mut()) {
        body.extend(extra);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_fields_are_merged_into_the_body() {
        let body = success_body("done", Some(json!({"token": "abc"})));
        assert_eq!(body, json!({"success": true, "message": "done", "token": "abc"}));
    }

    #[test]
    fn non_object_data_is_ignored() {
        let body = success_body("done", Some(json!([1, 2])));
        assert_eq!(body, json!({"success": true, "message": "done"}));
    }
}
