use clap::Parser;

/// Bridge SDL game controllers and joysticks into a normalized,
/// change-only event stream.
#[derive(Parser)]
#[command(version, about, long_about = None)]
pub(crate) struct Cli {
    /// Turn debugging information on
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Tick interval of the poll loop, in milliseconds
    #[arg(long, default_value_t = 10)]
    pub tick_ms: u64,
}
