use clap::ValueEnum;
use multiplexer::{Multiplexer, quote};
use std::fmt;
use std::time::Duration;

/// Fixed locations of the bot on the remote host.
#[derive(Debug, Clone)]
pub struct RemoteLayout {
    /// Checkout of the bot repository, `~/` is relative to the remote home.
    pub workdir: String,
    /// Name of the detached multiplexer session.
    pub session: String,
    /// Virtualenv activation script, relative to `workdir`.
    pub venv_activate: String,
    /// Command line that starts the bot.
    pub program: String,
}

impl Default for RemoteLayout {
    fn default() -> Self {
        Self {
            workdir: "~/sdm-ogame/thoth".to_string(),
            session: "thoth_bot".to_string(),
            venv_activate: "venv/bin/activate".to_string(),
            program: "python thoth.py".to_string(),
        }
    }
}

/// How the remote checkout is brought up to date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum UpdateStrategy {
    /// `git pull --rebase`
    #[default]
    Rebase,
    /// plain `git pull`
    Merge,
}

impl UpdateStrategy {
    fn command(self) -> &'static str {
        match self {
            Self::Rebase => "git pull --rebase",
            Self::Merge => "git pull",
        }
    }
}

/// What happens when the bot process exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RestartPolicy {
    /// Run once per deployment.
    #[default]
    Once,
    /// Restart forever, sleeping `delay` between runs.
    Loop { delay: Duration },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Deploy,
    Teardown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    UpdateSource,
    KillSession,
    StartSession,
}

/// A remote `sh` script, one line per step.
#[derive(Debug, Clone)]
pub struct RemoteScript {
    steps: Vec<(Step, String)>,
}

impl RemoteScript {
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        self.steps.iter().map(|(step, _)| *step)
    }
}

impl fmt::Display for RemoteScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, line) in &self.steps {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// Renders a path for the remote shell, keeping `~/` expandable.
fn remote_path(path: &str) -> String {
    match path.strip_prefix("~/") {
        Some(rest) => format!("\"$HOME\"/{}", quote(rest)),
        None if path == "~" => "\"$HOME\"".to_string(),
        None => quote(path),
    }
}

#[derive(Debug, Clone, Default)]
pub struct Plan {
    pub layout: RemoteLayout,
    pub update: UpdateStrategy,
    pub restart: RestartPolicy,
    pub multiplexer: Multiplexer,
}

impl Plan {
    /// Command run inside the session.
    fn session_command(&self) -> String {
        let run = match self.restart {
            RestartPolicy::Once => self.layout.program.clone(),
            RestartPolicy::Loop { delay } => format!(
                "while true; do {}; sleep {}; done",
                self.layout.program,
                delay.as_secs()
            ),
        };

        format!(
            "cd {} && . {} && {run}",
            remote_path(&self.layout.workdir),
            quote(&self.layout.venv_activate)
        )
    }

    pub fn script(&self, mode: Mode) -> RemoteScript {
        let kill = (
            Step::KillSession,
            self.multiplexer.kill_session(&self.layout.session),
        );

        let steps = match mode {
            Mode::Teardown => vec![kill],
            Mode::Deploy => vec![
                (
                    Step::UpdateSource,
                    format!(
                        "cd {} && {}",
                        remote_path(&self.layout.workdir),
                        self.update.command()
                    ),
                ),
                kill,
                (
                    Step::StartSession,
                    self.multiplexer
                        .new_session(&self.layout.session, &self.session_command()),
                ),
            ],
        };

        RemoteScript { steps }
    }
}
