use clap::Parser;
use intake::{
    report::{catalog_overview, format_price},
    Assistant, ItemSummary,
};
use tracing::instrument;

use super::{terminal::Colorize, OutputFormat};

#[derive(Debug, Parser)]
#[command(about = "List every laptop in the catalog")]
pub struct Catalog {
    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

impl Catalog {
    #[instrument(level = "debug", skip_all)]
    pub fn run(self, assistant: &Assistant) -> anyhow::Result<()> {
        let items = assistant.catalog_options(None);
        match self.output {
            OutputFormat::Pretty => print_items(&items),
            OutputFormat::Json => print_json(&items)?,
            OutputFormat::Report => println!("{}", catalog_overview(&items)),
        }
        Ok(())
    }
}

/// Prints item summaries as a numbered list.
pub(super) fn print_items(items: &[ItemSummary]) {
    if items.is_empty() {
        println!("{}", "No laptops found matching your criteria.".warning());
        return;
    }

    for (index, item) in items.iter().enumerate() {
        println!(
            "{}. {} {}  {}",
            index + 1,
            item.manufacturer.info(),
            item.model.info(),
            format_price(item.price).success()
        );
        println!(
            "   {}",
            format!(
                "{} | {} | {} | {}",
                item.category, item.processor, item.memory, item.storage
            )
            .dim()
        );
        if let Some(description) = &item.description {
            println!("   {description}");
        }
    }
}

pub(super) fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
