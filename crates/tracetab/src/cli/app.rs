use clap::{Parser, Subcommand};

use super::commands::{
    check::CheckArgs, details::DetailsArgs, schema::SchemaArgs, table::TableArgs,
};

#[derive(Debug, Parser)]
#[command(
    name = "tracetab",
    version,
    about = "Adaptive tables for telemetry query results"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate a query and apply the fetch limit rewrite.
    Check(CheckArgs),
    /// Flatten a result set and print the ranked table view.
    Table(TableArgs),
    /// Print the detail fields for one row of a result set.
    Details(DetailsArgs),
    /// Print the JSON schema of the result-set input contract.
    Schema(SchemaArgs),
}
