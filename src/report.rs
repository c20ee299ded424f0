//! Markdown renderings of catalog, recommendation and order data.
//!
//! These are the texts handed back to the conversational front-end when it
//! wants prose rather than structured data.

use crate::domain::{ItemRecord, ItemSummary, Order};

/// Shown when a recommendation request matches nothing.
pub const NO_RECOMMENDATIONS: &str =
    "No laptops found matching your criteria. Please consider adjusting your requirements.";

/// Shown when a search matches nothing.
pub const NO_SEARCH_RESULTS: &str = "No laptops found matching your criteria. Please try a \
                                     different search or ask about our available options.";

/// Shown when a session has no submitted orders.
pub const NO_ORDERS: &str = "You have no completed orders yet.";

/// Formats a whole-unit price with thousands separators, e.g. `$1,299`.
#[must_use]
pub fn format_price(price: u32) -> String {
    let digits = price.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}")
}

/// Lists every catalog option with its headline specifications.
#[must_use]
pub fn catalog_overview(items: &[ItemSummary]) -> String {
    let mut out = String::from("## Available Laptop Options\n\n");
    for (index, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "**{}. {} {}** - {}\n",
            index + 1,
            item.manufacturer,
            item.model,
            format_price(item.price)
        ));
        out.push_str(&format!("- Category: {}\n", item.category));
        out.push_str(&format!("- Processor: {}\n", item.processor));
        out.push_str(&format!("- RAM: {}\n", item.memory));
        out.push_str(&format!("- Storage: {}\n", item.storage));
        if let Some(description) = &item.description {
            out.push_str(&format!("- Description: {description}\n"));
        }
        out.push('\n');
    }
    out.push_str(
        "To get personalized recommendations, tell me about your needs (e.g. 'I need a laptop \
         for video editing' or 'Budget under $1500').",
    );
    out
}

/// Renders search results under a heading naming the query.
#[must_use]
pub fn search_results(query: &str, items: &[ItemSummary]) -> String {
    if items.is_empty() {
        return NO_SEARCH_RESULTS.to_string();
    }

    let mut out = format!("## Search Results for: \"{query}\"\n\n");
    for (index, item) in items.iter().enumerate() {
        out.push_str(&format!(
            "### {}. {} {} - {}\n",
            index + 1,
            item.manufacturer,
            item.model,
            format_price(item.price)
        ));
        out.push_str(&format!("**Category:** {}\n", item.category));
        out.push_str(&format!(
            "**Specs:** {} | {} | {}\n",
            item.processor, item.memory, item.storage
        ));
        if let Some(description) = &item.description {
            out.push_str(&format!("**Description:** {description}\n"));
        }
        out.push('\n');
    }
    out
}

/// Renders the top `limit` recommendations as a report.
#[must_use]
pub fn recommendation_report(items: &[&ItemRecord], limit: usize) -> String {
    if items.is_empty() {
        return NO_RECOMMENDATIONS.to_string();
    }

    let mut out = String::from("## Laptop Recommendations\n\n");
    for (index, item) in items.iter().take(limit).enumerate() {
        let features: Vec<&str> = item
            .selling_points
            .iter()
            .take(3)
            .map(String::as_str)
            .collect();

        out.push_str(&format!(
            "### {}. {} - {}\n",
            index + 1,
            item.display_name(),
            format_price(item.price)
        ));
        out.push_str(&format!(
            "**Category:** {} | **Performance:** {}/10\n\n",
            item.category, item.performance_score
        ));
        out.push_str(&format!("**Description:** {}\n\n", item.description));
        out.push_str(&format!("**Best For:** {}\n\n", item.target_audience));
        out.push_str(&format!("**Key Features:** {}\n\n", features.join(", ")));
        out.push_str(&format!("**Specifications:** {}\n\n", item.specifications));
        out.push_str("---\n\n");
    }
    out
}

/// Summarises a session's submitted orders, oldest first.
///
/// Blank employee fields are shown as `Unknown`.
#[must_use]
pub fn order_history(orders: &[Order]) -> String {
    if orders.is_empty() {
        return NO_ORDERS.to_string();
    }

    let mut out = format!("Your Laptop Orders ({} total):\n\n", orders.len());
    for (index, order) in orders.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", index + 1, order.id));
        out.push_str(&format!("   Employee: {}\n", or_unknown(&order.employee.name)));
        out.push_str(&format!(
            "   Department: {}\n",
            or_unknown(&order.employee.department)
        ));
        out.push_str(&format!("   Request Type: {}\n", order.request_type));
        out.push_str(&format!("   Laptop: {}\n", order.selected_item));
        out.push_str(&format!("   Cost: {}\n", format_price(order.total_cost)));
        out.push_str(&format!(
            "   Order Date: {}\n",
            order.order_date.format("%Y-%m-%d")
        ));
        out.push_str(&format!("   Status: {}\n\n", order.status));
    }
    out
}

fn or_unknown(value: &str) -> &str {
    if value.trim().is_empty() {
        "Unknown"
    } else {
        value
    }
}
