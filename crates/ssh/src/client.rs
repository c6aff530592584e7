use crate::error::SshError;
use crate::target::Target;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use tracing::{debug, warn};

/// Exit status of a remote script as reported by the `ssh` client.
///
/// `ssh` forwards the remote exit code, or exits 255 when it fails itself.
/// `code` is `None` when the client was terminated by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoteStatus {
    code: Option<i32>,
}

impl RemoteStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn code(&self) -> Option<i32> {
        self.code
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for RemoteStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// Something that can run a shell script on a deployment target.
pub trait RemoteShell {
    /// Runs `script` with `sh` on `target` and waits for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error only for local failures. Remote failures are
    /// reported through the returned status.
    fn run(&self, target: &Target, script: &str) -> Result<RemoteStatus, SshError>;
}

/// Runs remote scripts through the system `ssh` client.
///
/// The script is fed to `sh -s` on the remote side through stdin, so it
/// needs no quoting for the local shell or for `ssh` itself.
#[derive(Debug, Clone)]
pub struct SshClient {
    program: PathBuf,
    options: Vec<String>,
}

impl SshClient {
    /// Binary name looked up on `PATH`.
    pub const BIN: &'static str = "ssh";

    /// Locates the `ssh` client on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `SshError::NotFound` if no `ssh` binary is on `PATH`.
    pub fn detect() -> Result<Self, SshError> {
        let program = which::which(Self::BIN)?;
        Ok(Self::with_program(program))
    }

    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            options: Vec::new(),
        }
    }

    /// Adds an `-o key=value` option to every invocation.
    #[must_use]
    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    fn command(&self, target: &Target) -> Command {
        let mut cmd = Command::new(&self.program);
        for option in &self.options {
            cmd.arg("-o").arg(option);
        }
        cmd.arg(target.to_string()).args(["sh", "-s"]);
        cmd
    }
}

fn feed_script(child: &mut Child, script: &str) -> Result<(), SshError> {
    let Some(mut stdin) = child.stdin.take() else {
        return Ok(());
    };

    match stdin.write_all(script.as_bytes()) {
        // ssh went away before reading the script, its exit status says why
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            warn!("ssh closed its input before the script was sent");
            Ok(())
        }
        other => other.map_err(SshError::from),
    }
}

impl RemoteShell for SshClient {
    fn run(&self, target: &Target, script: &str) -> Result<RemoteStatus, SshError> {
        let mut cmd = self.command(target);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        debug!(command = ?cmd, "Running remote script");

        let mut child = cmd.spawn()?;
        let fed = feed_script(&mut child, script);
        let status = child.wait()?;
        fed?;

        debug!(destination = %target, ?status, "ssh exited");
        Ok(status.into())
    }
}
