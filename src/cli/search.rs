use clap::Parser;
use intake::{report::search_results, Assistant};
use tracing::instrument;

use super::{
    catalog::{print_items, print_json},
    OutputFormat,
};

#[derive(Debug, Parser)]
#[command(about = "Search the catalog by keyword")]
pub struct Search {
    /// Search terms, e.g. `developer laptop for video editing`
    #[arg(required = true)]
    query: Vec<String>,

    /// Maximum number of results (defaults to the configured search limit)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

impl Search {
    #[instrument(level = "debug", skip(assistant))]
    pub fn run(self, assistant: &Assistant) -> anyhow::Result<()> {
        let query = self.query.join(" ");
        let items = assistant.search(&query, self.limit);
        match self.output {
            OutputFormat::Pretty => print_items(&items),
            OutputFormat::Json => print_json(&items)?,
            OutputFormat::Report => println!("{}", search_results(&query, &items)),
        }
        Ok(())
    }
}
