use anyhow::Context as _;
use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use intake::{
    report::{format_price, order_history},
    Assistant, RequestType, SessionKey, StartRequest, SubmitOrder,
};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, Parser)]
#[command(about = "Walk through a laptop request interactively")]
pub struct Order {
    /// Session the request is recorded under
    #[arg(long, default_value = "cli")]
    session: SessionKey,
}

impl Order {
    #[instrument(level = "debug", skip(assistant))]
    pub fn run(self, assistant: &Assistant) -> anyhow::Result<()> {
        let theme = ColorfulTheme::default();

        let labels: Vec<&str> = RequestType::ALL.into_iter().map(RequestType::label).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("Request type")
            .items(labels.as_slice())
            .default(0)
            .interact()?;
        let request_type = RequestType::ALL[choice];

        let justification: String = Input::with_theme(&theme)
            .with_prompt("Business justification")
            .validate_with(|input: &String| {
                if input.trim().is_empty() {
                    Err("a justification is required")
                } else {
                    Ok(())
                }
            })
            .interact_text()?;

        let query: String = Input::with_theme(&theme)
            .with_prompt("Narrow the options with a search (optional)")
            .allow_empty(true)
            .interact_text()?;

        let request = StartRequest::new(request_type.label(), &justification)?
            .with_query(Some(query));
        let confirmation = assistant.start_request(&self.session, request)?;
        println!(
            "{} {} request accepted, {} laptops offered",
            "✓".success(),
            confirmation.request_type,
            confirmation.offered
        );

        let state = assistant.session_state(&self.session)?;
        let pending = state
            .pending()
            .context("request was accepted but no order is pending")?;
        if pending.available_items().is_empty() {
            println!("{}", "No laptops matched that search.".warning());
            return Ok(());
        }

        let options: Vec<String> = pending
            .available_items()
            .iter()
            .map(|item| format!("{} ({})", item.display_name(), format_price(item.price)))
            .collect();
        let choice = Select::with_theme(&theme)
            .with_prompt("Laptop")
            .items(options.as_slice())
            .default(0)
            .interact()?;
        let selection = pending.available_items()[choice].display_name();

        let name: String = Input::with_theme(&theme)
            .with_prompt("Employee name")
            .interact_text()?;
        let department: String = Input::with_theme(&theme)
            .with_prompt("Department")
            .interact_text()?;

        let order = assistant.submit_order(
            &self.session,
            SubmitOrder::new(&name, &department, &selection),
        )?;

        println!();
        println!("{}", "Order submitted".info());
        println!("{}", order_history(std::slice::from_ref(&order)));
        println!("{}", order.delivery_estimate.dim());

        Ok(())
    }
}
