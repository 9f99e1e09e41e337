//! Command-line interface for treemerge

use crate::core::types::ExtensionSet;
use crate::merge::{merge, MergeOptions, MergeSummary};
use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

/// Merge contents of multiple files into a single file
#[derive(Parser, Debug)]
#[command(
    name = "treemerge",
    version,
    about = "Merge contents of multiple files into a single file.",
    long_about = "Recursively walks a directory and concatenates every file with one of the given extensions into a single output file, skipping paths excluded by .gitignore rules."
)]
pub struct Cli {
    /// Starting directory path
    pub directory: PathBuf,

    /// Output file path
    pub output: PathBuf,

    /// List of file extensions to include (e.g., .txt .md .py)
    #[arg(long, num_args = 1.., required = true)]
    pub extensions: Vec<String>,

    /// Path to a .gitignore file (ignored if it does not exist)
    #[arg(long, env = "TREEMERGE_GITIGNORE", default_value = ".gitignore")]
    pub gitignore: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Print a JSON summary instead of the success message
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert parsed arguments into merge options
    pub fn to_options(&self) -> crate::core::Result<MergeOptions> {
        let extensions = ExtensionSet::new(&self.extensions)?;
        Ok(MergeOptions::new(&self.directory, &self.output, extensions)
            .with_ignore_file(&self.gitignore))
    }
}

/// Run the merge and translate the outcome into console output and an exit code
pub fn run(cli: &Cli) -> ExitCode {
    match execute(cli) {
        Ok(summary) => {
            if let Err(e) = report(cli, &summary) {
                eprintln!("An error occurred: {}", e);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        },
        Err(e) if e.is_invalid_root() => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        },
        Err(e) => {
            eprintln!("An error occurred: {}", e);
            ExitCode::FAILURE
        },
    }
}

fn execute(cli: &Cli) -> crate::core::Result<MergeSummary> {
    let options = cli.to_options()?;
    merge(&options)
}

fn report(cli: &Cli, summary: &MergeSummary) -> Result<()> {
    if cli.json {
        println!("{}", serde_json::to_string_pretty(summary)?);
    } else if !cli.quiet {
        println!(
            "{} Successfully merged files into {}",
            "✓".green(),
            cli.output.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::MergeError;

    #[test]
    fn test_parses_positional_and_extensions() {
        let cli = Cli::try_parse_from([
            "treemerge",
            "src",
            "out.txt",
            "--extensions",
            "rs",
            ".TOML",
        ])
        .unwrap();

        assert_eq!(cli.directory, PathBuf::from("src"));
        assert_eq!(cli.output, PathBuf::from("out.txt"));
        assert_eq!(cli.extensions, vec!["rs", ".TOML"]);

        let options = cli.to_options().unwrap();
        assert_eq!(options.extensions.iter().collect::<Vec<_>>(), vec![".rs", ".toml"]);
    }

    #[test]
    fn test_extensions_are_required() {
        assert!(Cli::try_parse_from(["treemerge", "src", "out.txt"]).is_err());
    }

    #[test]
    fn test_empty_extension_is_rejected() {
        let cli = Cli::try_parse_from(["treemerge", "src", "out.txt", "--extensions", "."])
            .unwrap();
        assert!(matches!(
            cli.to_options(),
            Err(MergeError::InvalidExtension { .. })
        ));
    }
}
