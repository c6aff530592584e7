//! Terminal multiplexer commands for managing a named detached session on
//! the remote host.
//!
//! Every function here returns a line of POSIX `sh`; nothing is executed
//! locally.

mod quote;

use clap::ValueEnum;

pub use quote::quote;

/// A terminal multiplexer available on the remote host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Multiplexer {
    #[default]
    Tmux,
    Screen,
}

impl Multiplexer {
    pub fn bin(self) -> &'static str {
        match self {
            Self::Tmux => "tmux",
            Self::Screen => "screen",
        }
    }

    /// Arguments that terminate session `{name}`.
    fn kill_args(self) -> &'static [&'static str] {
        match self {
            Self::Tmux => &["kill-session", "-t", "{name}"],
            Self::Screen => &["-S", "{name}", "-X", "quit"],
        }
    }

    /// Arguments that start session `{name}` detached, running `{cmd}` with `sh`.
    fn new_args(self) -> &'static [&'static str] {
        match self {
            Self::Tmux => &["new-session", "-d", "-s", "{name}", "{cmd}"],
            Self::Screen => &["-dmS", "{name}", "sh", "-c", "{cmd}"],
        }
    }

    fn render(self, args: &[&str], name: &str, cmd: &str) -> String {
        let mut line = self.bin().to_string();
        for arg in args {
            line.push(' ');
            match *arg {
                "{name}" => line.push_str(&quote(name)),
                "{cmd}" => line.push_str(&quote(cmd)),
                other => line.push_str(other),
            }
        }
        line
    }

    /// Shell line that terminates the named session.
    ///
    /// A missing session is not an error: the line always exits 0.
    pub fn kill_session(self, name: &str) -> String {
        format!(
            "{} >/dev/null 2>&1 || true",
            self.render(self.kill_args(), name, "")
        )
    }

    /// Shell line that starts a detached session running `command`.
    pub fn new_session(self, name: &str, command: &str) -> String {
        self.render(self.new_args(), name, command)
    }
}
