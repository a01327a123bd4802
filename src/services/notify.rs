//! Session completion notification sinks

use futures::future::BoxFuture;
use tokio::{io::AsyncWriteExt, process::Command};
use tracing::{debug, info, warn};

use crate::state::SessionKind;

/// Something that can announce the end of a session.
///
/// Playback is best effort; the engine logs a failure and carries on.
pub trait Notifier: Send + Sync {
    fn notify(&self, finished: SessionKind) -> BoxFuture<'_, Result<(), String>>;
}

/// Ring the terminal bell
#[derive(Debug, Default, Clone)]
pub struct TerminalBell;

impl Notifier for TerminalBell {
    fn notify(&self, finished: SessionKind) -> BoxFuture<'_, Result<(), String>> {
        Box::pin(async move {
            let mut stdout = tokio::io::stdout();
            stdout
                .write_all(b"\x07")
                .await
                .map_err(|e| format!("Failed to ring terminal bell: {}", e))?;
            stdout
                .flush()
                .await
                .map_err(|e| format!("Failed to flush stdout: {}", e))?;
            debug!("Rang terminal bell for finished {:?} session", finished);
            Ok(())
        })
    }
}

/// Run an external command, e.g. a sound player
#[derive(Debug, Clone)]
pub struct CommandNotifier {
    program: String,
    args: Vec<String>,
}

impl CommandNotifier {
    /// Parse a shell-like command line such as `paplay "/usr/share/sounds/done.oga"`
    pub fn parse(command_line: &str) -> Result<Self, String> {
        let mut words = shlex::split(command_line)
            .ok_or_else(|| format!("Invalid quoting in sound command: {}", command_line))?;
        if words.is_empty() {
            return Err("Sound command is empty".to_string());
        }
        let program = words.remove(0);
        Ok(Self { program, args: words })
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Notifier for CommandNotifier {
    fn notify(&self, finished: SessionKind) -> BoxFuture<'_, Result<(), String>> {
        Box::pin(async move {
            debug!("Running sound command {} for finished {:?} session", self.program, finished);

            let output = Command::new(&self.program)
                .args(&self.args)
                .output()
                .await
                .map_err(|e| format!("Failed to execute {}: {}", self.program, e))?;

            if !output.status.success() {
                let stderr = String::from_utf8_lossy(&output.stderr);
                return Err(format!("{} failed: {}", self.program, stderr.trim()));
            }

            info!("Completion sound played via {}", self.program);
            Ok(())
        })
    }
}

/// Swallow notifications
#[derive(Debug, Default, Clone)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn notify(&self, _finished: SessionKind) -> BoxFuture<'_, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }
}

/// Try `primary`, falling back to `secondary` if it fails
pub struct FallbackNotifier {
    primary: Box<dyn Notifier>,
    secondary: Box<dyn Notifier>,
}

impl FallbackNotifier {
    pub fn new(primary: Box<dyn Notifier>, secondary: Box<dyn Notifier>) -> Self {
        Self { primary, secondary }
    }
}

impl Notifier for FallbackNotifier {
    fn notify(&self, finished: SessionKind) -> BoxFuture<'_, Result<(), String>> {
        Box::pin(async move {
            match self.primary.notify(finished).await {
                Ok(()) => Ok(()),
                Err(e) => {
                    warn!("Primary notifier failed: {}, falling back", e);
                    self.secondary.notify(finished).await
                }
            }
        })
    }
}
