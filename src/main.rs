use chatvec::cli::Cli;
use chatvec::logging;
use chatvec::terminal::TerminalStyle;
use clap::Parser;

fn main() {
    // Load .env file if it exists (ignore errors if missing)
    dotenvy::dotenv().ok();

    let style = TerminalStyle::detect();

    if let Err(e) = logging::init_from_env() {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    let cli = Cli::parse();
    let tag = cli.command.tag();

    if let Err(error) = cli.run(style) {
        logging::log_error(&error, tag);
        eprintln!("{} {} {}", style.tag(tag), style.failure(), error);
        for cause in error.chain().skip(1) {
            eprintln!("  caused by: {cause}");
        }
        std::process::exit(1);
    }
}
