use clap::ArgAction;

mod catalog;
mod chat;
mod compile;
mod complete;
mod terminal;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        self.command.run()
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Compile an installation requirements report
    ///
    /// Reads the questionnaire answers as JSON and writes the report as HTML,
    /// Markdown or JSON.
    Compile(compile::Command),

    /// List the modules, services and databases that can be selected
    Catalog(catalog::Command),

    /// Ask the installation assistant a question
    Chat(chat::Command),

    /// Generate shell completion scripts
    Complete(complete::Command),
}

impl Command {
    fn run(self) -> anyhow::Result<()> {
        match self {
            Self::Compile(command) => command.run()?,
            Self::Catalog(command) => command.run(),
            Self::Chat(command) => command.run()?,
            Self::Complete(command) => command.run(),
        }
        Ok(())
    }
}
