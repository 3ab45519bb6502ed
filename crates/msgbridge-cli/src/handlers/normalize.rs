//! Normalize command handler.
//!
//! Prints the flattened prompt a request body would be sent to the backend
//! as. Useful for checking role labels without running a backend.

use std::io::Read;
use std::path::Path;

use msgbridge_core::{IncomingRequest, PromptRequest, normalize};

use crate::error::CliError;

/// Parse a Messages-API request body and flatten it.
pub fn prompt_from_json(body: &str) -> Result<PromptRequest, CliError> {
    let request: IncomingRequest =
        serde_json::from_str(body).map_err(|e| CliError::InvalidInput(e.to_string()))?;
    Ok(normalize(&request))
}

/// Execute the normalize command.
pub fn execute(file: Option<&Path>) -> Result<(), CliError> {
    let body = match file {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?,
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let prompt = prompt_from_json(&body)?;
    print!("{}", prompt.prompt);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_from_json() {
        let prompt = prompt_from_json(
            r#"{"model":"m","messages":[{"role":"user","content":"Hi"},{"role":"assistant","content":"Hello"}]}"#,
        )
        .unwrap();
        assert_eq!(prompt.prompt, "User: Hi\nModel: Hello\n");
    }

    #[test]
    fn test_invalid_json_is_data_error() {
        let err = prompt_from_json("{not json").unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
        assert_eq!(err.exit_code(), 65);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = execute(Some(Path::new("/nonexistent/msgbridge/request.json"))).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
