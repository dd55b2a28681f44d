use std::path::PathBuf;

use clap::builder::FalseyValueParser;
use clap::Parser;
use oapi_dto_generator::{Config, Mode, Pipeline, SpecSource};
use tracing::{info, Level};

#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// URL or path of the OpenApi spec
    #[arg(env = "API_SPEC_URL")]
    source: String,
    /// Output directory
    #[arg(long, env = "DEST", default_value = "./dto-spec")]
    dest: PathBuf,
    /// Generate read-mode types (server responses) instead of write-mode types
    #[arg(long, env = "READ_MODE", value_parser = FalseyValueParser::new())]
    read_mode: bool,
    /// Name types `<Name>Dto` without the Read/Write suffix
    #[arg(long, env = "DTO_UNQUALIFIED", value_parser = FalseyValueParser::new())]
    unqualified: bool,
    /// Print declarations instead of writing files
    #[arg(long)]
    dry_run: bool,
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> Config {
        let mode = if self.read_mode { Mode::Read } else { Mode::Write };
        Config {
            dest: self.dest.clone(),
            qualify: !self.unqualified,
            dry_run: self.dry_run,
            ..Config::new(SpecSource::parse(&self.source), mode)
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = cli.config();
    info!("Generating {} mode DTOs from {}", config.mode, config.source);

    let declarations = Pipeline::new(config).run().await?;
    info!("Generated {} declarations", declarations.len());

    Ok(())
}
