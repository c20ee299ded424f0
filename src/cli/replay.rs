use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::Parser;
use intake::{Action, Assistant, Event, SessionKey};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

#[derive(Debug, Parser)]
#[command(about = "Replay JSON-lines actions against a fresh assistant")]
pub struct Replay {
    /// File of JSON-lines actions (reads stdin when omitted)
    file: Option<PathBuf>,
}

/// One line of replay input: an action plus the session it belongs to.
#[derive(Debug, Deserialize)]
struct Envelope {
    session: String,
    #[serde(flatten)]
    action: Action,
}

impl Replay {
    #[instrument(level = "debug", skip(assistant))]
    pub fn run(self, assistant: &Assistant) -> anyhow::Result<()> {
        let reader: Box<dyn BufRead> = match &self.file {
            Some(path) => Box::new(BufReader::new(
                File::open(path)
                    .with_context(|| format!("Failed to open {}", path.display()))?,
            )),
            None => Box::new(BufReader::new(io::stdin())),
        };

        for line in reader.lines() {
            let line = line.context("Failed to read replay input")?;
            if line.trim().is_empty() {
                continue;
            }
            println!("{}", replay_line(assistant, &line));
        }
        Ok(())
    }
}

/// Handles one input line, reporting failures in-band.
fn replay_line(assistant: &Assistant, line: &str) -> serde_json::Value {
    match dispatch(assistant, line) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::debug!("Replay line failed: {e:#}");
            json!({ "error": e.to_string() })
        }
    }
}

fn dispatch(assistant: &Assistant, line: &str) -> anyhow::Result<serde_json::Value> {
    let envelope: Envelope = serde_json::from_str(line)?;
    let session = SessionKey::new(envelope.session)?;
    let event = Event::try_from(envelope.action)?;
    let outcome = assistant.handle(&session, event)?;
    Ok(serde_json::to_value(outcome)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replays_a_full_conversation() {
        let assistant = Assistant::default();

        let started = replay_line(
            &assistant,
            r#"{"session":"a","action":"start_request","request_type":"Hardware Replacement","justification":"laptop crashes"}"#,
        );
        assert_eq!(started["outcome"], "request_started");
        assert_eq!(started["offered"], 5);

        let submitted = replay_line(
            &assistant,
            r#"{"session":"a","action":"submit_order","employee_name":"Jane Doe","department":"Engineering","selected_laptop":"Dell Latitude 3420"}"#,
        );
        assert_eq!(submitted["outcome"], "order_submitted");
        assert_eq!(submitted["totalCost"], 899);

        let orders = replay_line(&assistant, r#"{"session":"a","action":"list_orders"}"#);
        assert_eq!(orders["orders"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn failures_are_reported_in_band() {
        let assistant = Assistant::default();

        let result = replay_line(
            &assistant,
            r#"{"session":"b","action":"submit_order","employee_name":"Bob","department":"Sales","selected_laptop":"HP"}"#,
        );
        assert_eq!(
            result["error"],
            "No active laptop order found. Please start a new laptop order request first."
        );

        assert!(replay_line(&assistant, "not json")["error"].is_string());
        assert!(replay_line(&assistant, r#"{"session":" ","action":"list_orders"}"#)["error"].is_string());
    }

    #[test]
    fn query_limit_passes_through() {
        let assistant = Assistant::default();

        let result = replay_line(
            &assistant,
            r#"{"session":"c","action":"query","query":"business laptop","limit":2}"#,
        );

        assert_eq!(result["outcome"], "items");
        assert_eq!(result["items"].as_array().map(Vec::len), Some(2));
    }
}
