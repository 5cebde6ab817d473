//! Job request validation.
//!
//! Validation runs before a job record exists, so a rejected request leaves
//! no trace in the store.

use clihub_core::error::AppError;
use clihub_core::result::AppResult;

use crate::catalog;
use crate::model::JobRequest;

/// Check a request against the command catalog.
pub fn validate(request: &JobRequest) -> AppResult<()> {
    let name = request.command.trim();
    if name.is_empty() {
        return Err(AppError::validation("command must not be empty"));
    }

    let spec = catalog::find(name)
        .ok_or_else(|| AppError::validation(format!("command '{name}' is not allowed")))?;

    for (i, arg) in spec.args.iter().enumerate() {
        if !arg.required {
            continue;
        }
        let missing = request
            .args
            .get(i)
            .map_or(true, |value| value.trim().is_empty());
        if missing {
            return Err(AppError::validation(format!(
                "command '{name}' requires a {} argument",
                arg.name
            )));
        }
    }

    Ok(())
}
