//! CLI argument parsing.
//!
//! Flags only override the generator config; all defaults live in
//! `GeneratorConfig::default` so file-based and flag-based runs agree.
use crate::config::ConfigOverrides;
use crate::fileno::Category;
use crate::verify::VerifyOptions;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Root CLI entrypoint.
#[derive(Parser, Debug)]
#[command(
    name = "fileno",
    version,
    about = "Generate deterministic file-number sequences as CSV",
    after_help = "Examples:\n  fileno generate\n  fileno generate --years 1981,1982 --numbers-per-year 3 --stdout\n  fileno generate --category RES --category COM --max-per-category 500\n  fileno sample --numbers 5\n  fileno verify --input FileNos_1981_2025.csv --json",
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct RootArgs {
    /// Emit debug logs on stderr (FILENO_LOG takes precedence)
    #[arg(long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Generate(GenerateArgs),
    Sample(SampleArgs),
    Verify(VerifyArgs),
}

/// Generate command inputs.
#[derive(Parser, Debug)]
#[command(about = "Write the full file-number table")]
pub struct GenerateArgs {
    /// JSON config file; flags override its values
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Identifier prefix, e.g. CON-AG-RC; repeat to emit several categories in order
    #[arg(long = "category", value_name = "PREFIX")]
    pub categories: Vec<Category>,

    /// Emit every known category
    #[arg(long, conflicts_with = "categories")]
    pub all_categories: bool,

    /// First year of the range
    #[arg(long, value_name = "YEAR")]
    pub start_year: Option<u32>,

    /// Last year of the range (inclusive)
    #[arg(long, value_name = "YEAR")]
    pub end_year: Option<u32>,

    /// Explicit comma-separated year list, emitted in the given order
    #[arg(
        long,
        value_name = "YEARS",
        value_delimiter = ',',
        conflicts_with_all = ["start_year", "end_year"]
    )]
    pub years: Option<Vec<u32>>,

    /// Numbers generated per year, starting at 1
    #[arg(long, value_name = "N")]
    pub numbers_per_year: Option<u32>,

    /// Stop each category after N records
    #[arg(long, value_name = "N")]
    pub max_per_category: Option<usize>,

    /// Records per import group reported in the summary (0 disables)
    #[arg(long, value_name = "N")]
    pub records_per_group: Option<u32>,

    /// Output path (default: FileNos_<first>_<last>.csv)
    #[arg(long, value_name = "PATH", conflicts_with = "stdout")]
    pub out: Option<PathBuf>,

    /// Write the table to stdout instead of a file
    #[arg(long)]
    pub stdout: bool,

    /// Print the run summary as JSON
    #[arg(long, conflicts_with = "stdout")]
    pub json: bool,
}

impl GenerateArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        let categories = if self.all_categories {
            Some(Category::ALL.to_vec())
        } else if self.categories.is_empty() {
            None
        } else {
            Some(self.categories.clone())
        };
        ConfigOverrides {
            categories,
            start_year: self.start_year,
            end_year: self.end_year,
            years: self.years.clone(),
            numbers_per_year: self.numbers_per_year,
            max_per_category: self.max_per_category,
            records_per_group: self.records_per_group,
            output: self.out.clone(),
        }
    }
}

/// Sample command inputs.
#[derive(Parser, Debug)]
#[command(about = "Print a sample table and full-file statistics")]
pub struct SampleArgs {
    /// Numbers shown per sample year
    #[arg(long, value_name = "N", default_value_t = 10)]
    pub numbers: u32,
}

/// Verify command inputs.
#[derive(Parser, Debug)]
#[command(about = "Check a generated table for structural problems")]
pub struct VerifyArgs {
    /// Table to verify
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,

    /// Cap the table was generated with; allows a short last year per category
    #[arg(long, value_name = "N")]
    pub max_per_category: Option<usize>,

    /// Emit machine-readable JSON output
    #[arg(long)]
    pub json: bool,
}

impl VerifyArgs {
    pub fn options(&self) -> VerifyOptions {
        VerifyOptions {
            max_per_category: self.max_per_category,
        }
    }
}
