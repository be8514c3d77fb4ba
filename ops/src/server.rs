//! Application-server launch
//!
//! The operations binary prepares the environment and then hands off to the
//! external application server. The command is configured as a template in
//! which `{addr}` is replaced by the bind address; the binary waits on the
//! child and reports its exit status as its own.

use crate::error::{OpsError, OpsResult};
use std::process::ExitStatus;
use tokio::process::Command;
use tracing::info;

/// Render the command template into a program and argument list
///
/// The template is whitespace-split; there is no shell quoting. `{addr}` is
/// substituted with `host:port` wherever it appears.
pub fn render_command(template: &str, host: &str, port: u16) -> OpsResult<(String, Vec<String>)> {
    let rendered = template.replace("{addr}", &format!("{host}:{port}"));
    let mut parts = rendered.split_whitespace().map(String::from);
    let program = parts
        .next()
        .ok_or_else(|| OpsError::Config("server command is empty".to_string()))?;
    Ok((program, parts.collect()))
}

/// Spawn the application server and wait for it to exit
pub async fn run_app_server(template: &str, host: &str, port: u16) -> OpsResult<ExitStatus> {
    let (program, args) = render_command(template, host, port)?;

    info!(command = %program, args = ?args, "Launching application server");

    let status = Command::new(&program)
        .args(&args)
        .status()
        .await
        .map_err(|source| OpsError::ServerSpawn {
            command: program.clone(),
            source,
        })?;

    info!(code = status.code(), "Application server exited");
    Ok(status)
}
