use std::path::PathBuf;

use clap::Parser;
use winmdgen::generator::MethodFilter;

/// winmdgen - resolve a Windows Runtime class into a binding IR
#[derive(Debug, Parser)]
#[command(name = "winmdgen", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(flatten)]
    pub generate: GenerateOptions,
}

/// Options controlling the output.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// What to generate and where to look for it.
#[derive(Debug, Parser)]
pub struct GenerateOptions {
    /// Namespace-qualified runtime class, e.g. Windows.Storage.Streams.Buffer.
    #[arg(short, long, value_name = "NAME")]
    pub class: String,

    /// Metadata file or directory of .winmd files, searched in order.
    #[arg(short, long = "winmd", value_name = "PATH", required = true)]
    pub winmd: Vec<PathBuf>,

    /// Do not generate the activation factory interface.
    #[arg(long)]
    pub skip_factory: bool,

    /// Do not generate the statics interface.
    #[arg(long)]
    pub skip_statics: bool,

    /// Keep (Name) or drop (!Name) a method; the first filter naming a method decides.
    #[arg(short = 'm', long = "method-filter", value_name = "FILTER")]
    pub method_filters: Vec<MethodFilter>,

    /// Module prefix of generated import paths.
    #[arg(long, value_name = "PREFIX")]
    pub import_prefix: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_arguments() {
        let cli = Cli::try_parse_from([
            "winmdgen",
            "--class",
            "Windows.Storage.Streams.Buffer",
            "--winmd",
            "a.winmd",
            "--winmd",
            "metadata",
            "--skip-statics",
            "-m",
            "!Close",
            "-m",
            "Create",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.generate.class, "Windows.Storage.Streams.Buffer");
        assert_eq!(
            cli.generate.winmd,
            vec![PathBuf::from("a.winmd"), PathBuf::from("metadata")]
        );
        assert!(cli.generate.skip_statics);
        assert!(!cli.generate.skip_factory);
        assert_eq!(
            cli.generate.method_filters,
            vec![MethodFilter::exclude("Close"), MethodFilter::include("Create")]
        );
        assert!(cli.global.json);
        assert!(cli.generate.import_prefix.is_none());
    }

    #[test]
    fn rejects_bad_arguments() {
        assert!(Cli::try_parse_from(["winmdgen", "--class", "Windows.Foundation.Uri"]).is_err());
        assert!(Cli::try_parse_from([
            "winmdgen",
            "--class",
            "Windows.Foundation.Uri",
            "--winmd",
            "a.winmd",
            "-m",
            "!",
        ])
        .is_err());
    }
}
