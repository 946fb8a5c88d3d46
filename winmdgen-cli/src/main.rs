mod app;
mod output;
mod report;

use anyhow::Context;
use clap::Parser;
use winmdgen::{generate, GeneratorConfig};

use crate::{
    app::{Cli, GenerateOptions},
    output::print_output,
    report::GenerateOutput,
};

fn config(options: &GenerateOptions) -> GeneratorConfig {
    let mut config = GeneratorConfig::new(options.class.as_str())
        .with_skip_factory(options.skip_factory)
        .with_skip_statics(options.skip_statics);

    for path in &options.winmd {
        config = config.with_container_path(path.as_path());
    }
    for filter in &options.method_filters {
        config = config.with_method_filter(filter.clone());
    }
    if let Some(prefix) = &options.import_prefix {
        config = config.with_import_prefix(prefix.as_str());
    }

    config
}

fn main() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })
    .context("failed to set Ctrl+C handler")?;

    let cli = Cli::parse();

    // winmdgen info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("winmdgen", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    let options = &cli.generate;
    let data = generate(&config(options))
        .with_context(|| format!("failed to generate {}", options.class))?;

    let output = GenerateOutput::new(&options.class, &data);
    print_output(&output, &cli.global, |output| {
        for line in output.text() {
            println!("{line}");
        }
    })
}
