use clap::Parser;
use recipebook_cli::{execute, Cli};
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::from_default_env()
        .add_directive("recipebook_cli=info".parse().expect("valid directive literal"))
        .add_directive("recipebook_core=info".parse().expect("valid directive literal"))
}

fn main() {
    let cli = Cli::parse();

    if cli.log_json {
        tracing_subscriber::fmt()
            .json()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter())
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(env_filter())
            .init();
    }

    let stdout = std::io::stdout();
    if let Err(e) = execute(&cli, &mut stdout.lock()) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
