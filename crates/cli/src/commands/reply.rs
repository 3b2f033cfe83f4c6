use crate::commands::{bootstrap_failure, prepare, CommandResult};
use menubot_bot::bootstrap_with_config;
use menubot_core::errors::{ApplicationError, InterfaceError};

/// Runs one full conversation turn for `from` and prints the bot's reply.
pub fn run(from: &str, message: &str) -> CommandResult {
    let (config, runtime) = match prepare("reply") {
        Ok(prepared) => prepared,
        Err(failure) => return failure,
    };

    let result = runtime.block_on(async {
        let app = bootstrap_with_config(config).await.map_err(|error| bootstrap_failure(&error))?;
        let reply = app.responder.respond(from, message).await;
        app.db_pool.close().await;
        reply.map_err(|error| application_failure(error, from))
    });

    match result {
        Ok(reply) => CommandResult::success("reply", reply),
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("reply", error_class, message, exit_code)
        }
    }
}

pub(crate) fn application_failure(
    error: ApplicationError,
    correlation_id: &str,
) -> (&'static str, String, u8) {
    let detail = error.to_string();
    match error.into_interface(correlation_id) {
        InterfaceError::BadRequest { .. } => ("bad_request", detail, 7),
        InterfaceError::ServiceUnavailable { .. } => ("service_unavailable", detail, 8),
        InterfaceError::Internal { .. } => ("internal", detail, 9),
    }
}
