use clap::Parser;
use miette::Result;
use mto::cli::commands;
use mto::cli::{Cli, Commands};

fn main() -> Result<()> {
    // Reset SIGPIPE so piping into `head` ends quietly instead of panicking.
    #[cfg(unix)]
    {
        unsafe {
            libc::signal(libc::SIGPIPE, libc::SIG_DFL);
        }
    }
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .tab_width(4)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    let global = cli.global;
    mto::logging::init(global.verbose, global.quiet);

    match cli.command {
        Commands::Estimate(args) => commands::estimate::run(args, &global),
        Commands::Classify(args) => commands::classify::run(args, &global),
        Commands::Dims(args) => commands::dims::run(args, &global),
        Commands::Config(cmd) => commands::config::run(cmd, &global),
        Commands::Completions(args) => commands::completions::run(args),
    }
}
