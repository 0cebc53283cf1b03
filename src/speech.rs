use tokio::process::Command;

use crate::error::{AgeError, AgeResult};

pub trait Speaker {
    fn speak(&self, text: &str) -> impl Future<Output = AgeResult<()>> + Send;
}

/// Hands the text to a host text-to-speech program as its last argument.
#[derive(Debug, Clone)]
pub struct CommandSpeaker {
    program: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }
}

impl Speaker for CommandSpeaker {
    async fn speak(&self, text: &str) -> AgeResult<()> {
        tracing::debug!(program = %self.program, "speaking result");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(text)
            .kill_on_drop(true)
            .status()
            .await
            .map_err(|e| AgeError::speech(format!("failed to run '{}': {e}", self.program)))?;

        if !status.success() {
            return Err(AgeError::speech(format!(
                "'{}' exited with {status}",
                self.program
            )));
        }

        Ok(())
    }
}
