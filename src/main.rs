mod deploy;
mod plan;

use anyhow::Context;
use clap::Parser;
use deploy::Deployer;
use multiplexer::Multiplexer;
use plan::{Mode, Plan, RestartPolicy, UpdateStrategy};
use ssh::{RemoteStatus, SshClient};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const VERSION: &str = concat!(
    env!("THOTH_DEPLOY_VERSION"),
    " ",
    env!("THOTH_DEPLOY_BUILD_HASH")
);

/// Deploy the Thoth bot into a detached session on the host named by
/// `deploy_location` in the keyring.
#[derive(Parser)]
#[command(name = "thoth-deploy", version = VERSION)]
struct Arguments {
    /// Stop the bot session instead of deploying
    #[arg(long)]
    teardown: bool,

    /// Path to keyring.json
    #[arg(long, default_value = keyring::DEFAULT_PATH)]
    keyring: PathBuf,

    /// How to update the remote checkout
    #[arg(long, value_enum, default_value_t, conflicts_with = "teardown")]
    update: UpdateStrategy,

    /// Restart the bot whenever it exits
    #[arg(long, conflicts_with = "teardown")]
    restart_loop: bool,

    /// Seconds to wait between restarts
    #[arg(long, value_name = "SECS", default_value_t = 5, requires = "restart_loop")]
    restart_delay: u64,

    /// Terminal multiplexer on the remote host
    #[arg(long, value_enum, default_value_t)]
    multiplexer: Multiplexer,

    /// Extra `ssh -o` option, e.g. `BatchMode=yes` (repeatable)
    #[arg(short = 'o', long = "ssh-option", value_name = "KEY=VALUE")]
    ssh_options: Vec<String>,

    /// Print the remote script instead of running it
    #[arg(long)]
    dry_run: bool,
}

impl Arguments {
    fn mode(&self) -> Mode {
        if self.teardown {
            Mode::Teardown
        } else {
            Mode::Deploy
        }
    }

    fn plan(&self) -> Plan {
        let restart = if self.restart_loop {
            RestartPolicy::Loop {
                delay: Duration::from_secs(self.restart_delay),
            }
        } else {
            RestartPolicy::Once
        };

        Plan {
            update: self.update,
            restart,
            multiplexer: self.multiplexer,
            ..Plan::default()
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: &Arguments) -> anyhow::Result<RemoteStatus> {
    let keyring = keyring::load_from_path(&args.keyring)?;
    let target = keyring.target()?;

    match ssh::lookup(&target) {
        Ok(endpoint) => debug!(destination = %target, %endpoint, "Resolved deployment target"),
        Err(e) => warn!("{e}"),
    }

    let plan = args.plan();

    if args.dry_run {
        let options: String = args
            .ssh_options
            .iter()
            .flat_map(|option| ["-o ", option.as_str(), " "])
            .collect();
        println!("# ssh {options}{target} sh -s");
        print!("{}", plan.script(args.mode()));
        return Ok(RemoteStatus::from_code(0));
    }

    let shell = args.ssh_options.iter().fold(
        SshClient::detect().context("cannot connect to the deployment target")?,
        |client, option| client.option(option.as_str()),
    );
    let deployer = Deployer::new(shell, target, plan);

    let status = match args.mode() {
        Mode::Teardown => deployer.teardown()?,
        Mode::Deploy => deployer.deploy()?,
    };
    Ok(status)
}

/// Maps a remote status onto this process's exit code.
fn exit_code(status: RemoteStatus) -> ExitCode {
    match status.code().and_then(|code| u8::try_from(code).ok()) {
        Some(code) => ExitCode::from(code),
        None => ExitCode::FAILURE,
    }
}

fn main() -> ExitCode {
    let args = Arguments::parse();
    init_logging();

    match run(&args) {
        Ok(status) => exit_code(status),
        // teardown exits 0 even when it never reached the host
        Err(e) if args.mode() == Mode::Teardown => {
            warn!("Teardown skipped: {e:#}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
