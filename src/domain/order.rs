//! Orders and the vocabulary used to describe them.
//!
//! An intake order exists in two shapes. A [`PendingOrder`] is the single
//! in-flight order a session is composing; it has no identifier, employee or
//! cost yet. An [`Order`] is the frozen record produced on submission, where
//! those fields are always present.

use std::{fmt, str::FromStr, sync::Arc};

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ItemRecord;

/// Why the laptop is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    /// Equipment for a new starter.
    NewEmployeeSetup,
    /// Replacement of broken or lost hardware.
    HardwareReplacement,
    /// Upgrade of an existing machine.
    UpgradeRequest,
}

impl RequestType {
    /// All request types.
    pub const ALL: [Self; 3] = [
        Self::NewEmployeeSetup,
        Self::HardwareReplacement,
        Self::UpgradeRequest,
    ];

    /// Human-readable label, e.g. `New Employee Setup`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewEmployeeSetup => "New Employee Setup",
            Self::HardwareReplacement => "Hardware Replacement",
            Self::UpgradeRequest => "Upgrade Request",
        }
    }

    const fn key(self) -> &'static str {
        match self {
            Self::NewEmployeeSetup => "newemployeesetup",
            Self::HardwareReplacement => "hardwarereplacement",
            Self::UpgradeRequest => "upgraderequest",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a string does not name a [`RequestType`].
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown request type '{0}'")]
pub struct UnknownRequestType(pub String);

impl FromStr for RequestType {
    type Err = UnknownRequestType;

    /// Accepts the variant name or the label in any case, ignoring spaces,
    /// underscores and hyphens.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|request_type| request_type.key() == key)
            .ok_or_else(|| UnknownRequestType(s.to_string()))
    }
}

/// Lifecycle status of an order.
///
/// Intake only ever produces `Pending` and `Submitted`. The remaining values
/// are reserved for downstream approval and fulfilment and are carried as
/// display data only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Being composed by the user.
    Pending,
    /// Handed over for approval.
    Submitted,
    /// Approved downstream.
    Approved,
    /// Denied downstream.
    Denied,
    /// Ordered from the supplier.
    Ordered,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pending => "pending",
            Self::Submitted => "submitted",
            Self::Approved => "approved",
            Self::Denied => "denied",
            Self::Ordered => "ordered",
        })
    }
}

/// Unique identifier assigned to an order when it is submitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    /// Generate a fresh identifier of the form `{prefix}-{uuid}`.
    #[must_use]
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{prefix}-{}", Uuid::new_v4().simple()))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The person an order is placed for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Full name.
    pub name: String,
    /// Department the employee belongs to.
    pub department: String,
}

/// The single order a session is composing.
///
/// The catalog items offered to the user are captured when the request is
/// started and never change afterwards, whatever happens to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingOrder {
    pub(crate) request_type: RequestType,
    pub(crate) justification: NonEmptyString,
    pub(crate) available_items: Arc<[ItemRecord]>,
    pub(crate) delivery_estimate: String,
}

impl PendingOrder {
    /// Why the laptop is being requested.
    #[must_use]
    pub const fn request_type(&self) -> RequestType {
        self.request_type
    }

    /// The business justification given by the requester.
    #[must_use]
    pub fn justification(&self) -> &str {
        self.justification.as_str()
    }

    /// The catalog items offered when the request was started.
    #[must_use]
    pub fn available_items(&self) -> &[ItemRecord] {
        &self.available_items
    }

    /// Delivery policy text quoted to the requester.
    #[must_use]
    pub fn delivery_estimate(&self) -> &str {
        &self.delivery_estimate
    }

    /// No item has been chosen while an order is pending.
    #[must_use]
    pub const fn selected_item(&self) -> Option<&str> {
        None
    }

    /// Always [`OrderStatus::Pending`].
    #[must_use]
    pub const fn status(&self) -> OrderStatus {
        OrderStatus::Pending
    }
}

/// A submitted order.
///
/// Orders are immutable once they land in a session's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Identifier assigned at submission.
    pub id: OrderId,
    /// Who the order is for.
    pub employee: Employee,
    /// Why the laptop was requested.
    pub request_type: RequestType,
    /// The business justification given by the requester.
    pub business_justification: String,
    /// The options that were offered, as captured when the request started.
    pub available_items: Vec<ItemRecord>,
    /// The selection exactly as the user described it.
    pub selected_item: String,
    /// Delivery policy text quoted to the requester.
    pub delivery_estimate: String,
    /// Current status; `Submitted` when produced by intake.
    pub status: OrderStatus,
    /// When the order was submitted.
    pub order_date: DateTime<Utc>,
    /// Price of the matched catalog item, or 0 when nothing matched.
    pub total_cost: u32,
    /// Shipment tracking number, set downstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking_number: Option<String>,
    /// Amount actually charged, set downstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_amount: Option<u32>,
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case("New Employee Setup", RequestType::NewEmployeeSetup; "label")]
    #[test_case("HardwareReplacement", RequestType::HardwareReplacement; "variant name")]
    #[test_case("upgrade_request", RequestType::UpgradeRequest; "snake case")]
    #[test_case("hardware-replacement", RequestType::HardwareReplacement; "kebab case")]
    fn request_type_parses_loosely(input: &str, expected: RequestType) {
        assert_eq!(input.parse::<RequestType>().unwrap(), expected);
    }

    #[test_case(""; "empty")]
    #[test_case("Hardware"; "prefix only")]
    #[test_case("Emergency Request"; "unknown")]
    fn unknown_request_types_are_rejected(input: &str) {
        let error = input.parse::<RequestType>().unwrap_err();
        assert_eq!(error, UnknownRequestType(input.to_string()));
    }

    #[test]
    fn request_type_label_round_trips() {
        for request_type in RequestType::ALL {
            assert_eq!(request_type.label().parse::<RequestType>(), Ok(request_type));
        }
    }

    #[test]
    fn generated_ids_are_prefixed_and_unique() {
        let a = OrderId::generate("PO");
        let b = OrderId::generate("PO");

        assert!(a.as_str().starts_with("PO-"));
        assert_ne!(a, b);
    }

    #[test]
    fn reserved_status_values_serialize_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Approved).unwrap();
        assert_eq!(json, "\"approved\"");
    }
}
