//! CLI error envelope and exit code mapping.

use ::rebrand::error::Hint;
use ::rebrand::{Error, ErrorCode};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CliResponse {
    pub success: bool,
    pub error: CliError,
}

#[derive(Debug, Serialize)]
pub struct CliError {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hints: Option<Vec<Hint>>,
}

impl CliResponse {
    pub fn from_error(err: &Error) -> Self {
        Self {
            success: false,
            error: CliError {
                code: err.code.as_str().to_string(),
                message: err.message.clone(),
                details: err.details.clone(),
                hints: if err.hints.is_empty() {
                    None
                } else {
                    Some(err.hints.clone())
                },
            },
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| {
            format!(
                "{{\"success\": false, \"error\": {{\"message\": {:?}}}}}",
                self.error.message
            )
        })
    }
}

/// Report `err` on stderr and return the process exit code for it.
pub fn print_error(err: &Error) -> i32 {
    eprintln!("{}", CliResponse::from_error(err).to_json());
    exit_code_for_error(err.code)
}

pub fn exit_code_for_error(code: ErrorCode) -> i32 {
    match code {
        ErrorCode::ConfigInvalidJson | ErrorCode::ConfigInvalidValue => 2,

        ErrorCode::RenameCollision | ErrorCode::RenameFailed => 30,

        ErrorCode::WalkListFailed | ErrorCode::InternalIoError => 1,
    }
}
