use std::{
    io::{
        self,
        Write as _,
    },
    num::NonZeroU16,
    process,
};

use anyhow::Context as _;
use clap::Parser as _;
use clap_verbosity_flag::{
    Verbosity,
    WarnLevel,
};
use consolewidth::Console as _;
use yansi::Paint as _;

#[derive(clap::Parser, Debug)]
#[command(name = "consolewidth", version, about)]
struct Cli {
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,

    /// The stream whose terminal is queried.
    #[arg(short, long, value_enum, default_value_t = Stream::Stderr)]
    stream: Stream,

    /// The width to print when it cannot be determined. Without it, an
    /// undeterminable width prints 0 and exits with a failure status.
    #[arg(short, long)]
    fallback: Option<NonZeroU16>,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Stream {
    Stderr,
    Stdout,
    Stdin,
}

impl Stream {
    fn columns(self) -> consolewidth::Result<NonZeroU16> {
        match self {
            Stream::Stderr => consolewidth::console_width(),
            Stream::Stdout => io::stdout().columns(),
            Stream::Stdin => io::stdin().columns(),
        }
    }
}

fn actual_main() -> anyhow::Result<process::ExitCode> {
    let cli = Cli::parse();

    yansi::whenever(yansi::Condition::TTY_AND_COLOR);

    // Trying to imitate clap to get a consistent experience.
    env_logger::Builder::new()
        .filter_level(cli.verbosity.log_level_filter())
        .format(|buffer, record| {
            let level = match record.level() {
                log::Level::Error => "error:".red().bold(),
                log::Level::Warn => "warn:".yellow().bold(),
                log::Level::Info => "info:".green().bold(),
                log::Level::Debug => "debug:".blue().bold(),
                log::Level::Trace => "trace:".cyan().bold(),
            };

            writeln!(buffer, "{level} {arguments}", arguments = record.args())
        })
        .init();

    log::debug!("querying the terminal behind {stream:?}", stream = cli.stream);

    let (width, code) = match (cli.stream.columns(), cli.fallback) {
        (Ok(width), _) => (width.get(), process::ExitCode::SUCCESS),

        (Err(error), Some(fallback)) => {
            log::warn!("could not determine terminal width: {error}");
            log::info!("falling back to {fallback} columns");

            (fallback.get(), process::ExitCode::SUCCESS)
        },

        (Err(error), None) => {
            log::warn!("could not determine terminal width: {error}");

            (0, process::ExitCode::FAILURE)
        },
    };

    writeln!(io::stdout(), "{width}").context("failed to write width to stdout")?;

    Ok(code)
}

fn main() -> process::ExitCode {
    match actual_main() {
        Ok(code) => code,

        Err(error) => {
            log::error!("{error:#}");
            process::ExitCode::FAILURE
        },
    }
}
