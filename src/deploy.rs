use crate::plan::{Mode, Plan};
use ssh::{RemoteShell, RemoteStatus, SshError, Target};
use tracing::{debug, info, warn};

/// Runs deploy and teardown plans against one target.
#[derive(Debug)]
pub struct Deployer<S> {
    shell: S,
    target: Target,
    plan: Plan,
}

impl<S: RemoteShell> Deployer<S> {
    pub fn new(shell: S, target: Target, plan: Plan) -> Self {
        Self {
            shell,
            target,
            plan,
        }
    }

    /// Kills the bot session if there is one.
    ///
    /// Always reports success once `ssh` has run; a failing remote side is
    /// only logged.
    pub fn teardown(&self) -> Result<RemoteStatus, SshError> {
        let session = &self.plan.layout.session;
        info!(destination = %self.target, session = %session, "Tearing down");

        let status = self.run(Mode::Teardown)?;
        if status.success() {
            info!(session = %session, "Session stopped");
        } else {
            warn!(code = ?status.code(), "Teardown did not complete cleanly, ignoring");
        }

        Ok(RemoteStatus::from_code(0))
    }

    /// Updates the checkout and restarts the bot session.
    ///
    /// The returned status is the exit status of the remote script.
    pub fn deploy(&self) -> Result<RemoteStatus, SshError> {
        info!(
            destination = %self.target,
            session = %self.plan.layout.session,
            update = ?self.plan.update,
            restart = ?self.plan.restart,
            "Deploying"
        );

        let status = self.run(Mode::Deploy)?;
        if status.success() {
            info!("Deployment finished");
        } else {
            warn!(code = ?status.code(), "Deployment failed");
        }

        Ok(status)
    }

    fn run(&self, mode: Mode) -> Result<RemoteStatus, SshError> {
        let script = self.plan.script(mode);
        debug!(steps = ?script.steps().collect::<Vec<_>>(), "Remote plan");
        self.shell.run(&self.target, &script.to_string())
    }
}
