use clap::Parser;
use intake::{Assistant, PerformanceNeeds, Requirements};
use tracing::instrument;

use super::{
    catalog::{print_items, print_json},
    OutputFormat,
};

#[derive(Debug, Parser)]
#[command(about = "Recommend laptops for a set of requirements")]
pub struct Recommend {
    /// Workload the laptop is needed for, e.g. `video editing`
    #[arg(long)]
    use_case: Option<String>,

    /// Maximum price
    #[arg(long)]
    budget: Option<u32>,

    /// Catalog category (basic, standard, premium, developer)
    #[arg(long)]
    category: Option<String>,

    /// Minimum performance tier (low, medium, high)
    #[arg(long, value_parser = parse_performance)]
    performance: Option<PerformanceNeeds>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "pretty")]
    output: OutputFormat,
}

fn parse_performance(s: &str) -> Result<PerformanceNeeds, String> {
    s.parse().map_err(|e| format!("{e}"))
}

impl Recommend {
    #[instrument(level = "debug", skip(assistant))]
    pub fn run(self, assistant: &Assistant) -> anyhow::Result<()> {
        let requirements = Requirements {
            use_case: self.use_case,
            budget: self.budget,
            category: self.category,
            performance_needs: self.performance,
        };

        match self.output {
            OutputFormat::Pretty => print_items(&assistant.recommend(&requirements)),
            OutputFormat::Json => print_json(&assistant.recommend(&requirements))?,
            OutputFormat::Report => println!("{}", assistant.recommend_report(&requirements)),
        }
        Ok(())
    }
}
