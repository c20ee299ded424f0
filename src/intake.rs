//! The order intake state machine.
//!
//! A session moves from `Idle` to `RequestPending` when a request is started,
//! and back to `Idle` when the pending order is submitted, at which point the
//! order is frozen and appended to the session's history. Starting a request
//! while one is pending replaces it; there is no other way to abandon an
//! order.
//!
//! Events carry validated payloads. Anything that can be rejected without
//! looking at session state is rejected when the event is built, so
//! [`IntakeMachine::apply`] only fails on the state guard.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use non_empty_string::NonEmptyString;
use serde::Serialize;

use crate::{
    domain::{
        order::UnknownRequestType, requirements::UnknownPerformanceNeeds,
        session::EmptySessionKey, Config, Employee, ItemRecord, Order, OrderId, OrderStatus,
        PendingOrder, RequestType, SessionState,
    },
    engine,
    storage::StoreError,
};

/// Input that was rejected before it reached the state machine.
///
/// The caller is expected to ask the user again.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The request type is not one of the known values.
    #[error(transparent)]
    UnknownRequestType(#[from] UnknownRequestType),
    /// The business justification was blank.
    #[error("business justification must not be empty")]
    EmptyJustification,
    /// The performance level is not low, medium or high.
    #[error(transparent)]
    UnknownPerformanceNeeds(#[from] UnknownPerformanceNeeds),
    /// The session key was blank.
    #[error(transparent)]
    EmptySessionKey(#[from] EmptySessionKey),
}

/// Errors returned by intake operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IntakeError {
    /// The event payload was malformed.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// An order was submitted while none was in flight.
    ///
    /// Resubmitting will keep failing until a new request is started.
    #[error("No active laptop order found. Please start a new laptop order request first.")]
    NoActiveOrder,
    /// Session state could not be read or written.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Payload of a request to start a new order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartRequest {
    request_type: RequestType,
    justification: NonEmptyString,
    query: Option<String>,
}

impl StartRequest {
    /// Validates a start-request payload.
    ///
    /// # Errors
    ///
    /// Fails if `request_type` names no [`RequestType`] or `justification` is
    /// blank.
    pub fn new(request_type: &str, justification: &str) -> Result<Self, ValidationError> {
        let request_type = request_type.parse::<RequestType>()?;
        let justification = justification.trim();
        let justification = NonEmptyString::new(justification.to_string())
            .map_err(|_| ValidationError::EmptyJustification)?;

        Ok(Self {
            request_type,
            justification,
            query: None,
        })
    }

    /// Narrows the offered items to the results of a catalog search.
    ///
    /// A blank query offers the whole catalog.
    #[must_use]
    pub fn with_query(mut self, query: Option<String>) -> Self {
        self.query = query.filter(|q| !q.trim().is_empty());
        self
    }

    /// The validated request type.
    #[must_use]
    pub const fn request_type(&self) -> RequestType {
        self.request_type
    }

    /// The validated business justification.
    #[must_use]
    pub fn justification(&self) -> &str {
        self.justification.as_str()
    }
}

/// Payload of an order submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOrder {
    employee: Employee,
    selection: String,
}

impl SubmitOrder {
    /// Builds a submission payload.
    ///
    /// `selection` is free text naming the chosen laptop, e.g.
    /// `"Dell Latitude 3420"`. Nothing here is rejected: a selection that
    /// names no offered item, blank ones included, is submitted at a cost of
    /// zero.
    #[must_use]
    pub fn new(employee_name: &str, department: &str, selection: &str) -> Self {
        Self {
            employee: Employee {
                name: employee_name.to_string(),
                department: department.to_string(),
            },
            selection: selection.to_string(),
        }
    }

    /// Who the order is for.
    #[must_use]
    pub const fn employee(&self) -> &Employee {
        &self.employee
    }

    /// The selection as the user described it.
    #[must_use]
    pub fn selection(&self) -> &str {
        &self.selection
    }
}


/// An event that drives the intake state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntakeEvent {
    /// Start a new request, replacing any pending one.
    StartRequest(StartRequest),
    /// Submit the pending order.
    SubmitOrder(SubmitOrder),
}

/// Acknowledgement of an accepted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestConfirmation {
    /// The accepted request type.
    pub request_type: RequestType,
    /// The accepted business justification.
    pub justification: String,
    /// Number of catalog items offered for selection.
    pub offered: usize,
    /// Whether a previously pending order was discarded.
    pub replaced_pending: bool,
}

/// The result of an accepted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The session now has a pending order.
    Started(RequestConfirmation),
    /// The pending order was submitted and the session is idle again.
    Submitted(Order),
}

/// Applies intake events to session state.
#[derive(Debug, Clone)]
pub struct IntakeMachine {
    delivery_estimate: String,
    order_id_prefix: String,
    snapshot_limit: usize,
}

impl Default for IntakeMachine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl IntakeMachine {
    /// Creates a machine using the policies in `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            delivery_estimate: config.delivery_estimate().to_string(),
            order_id_prefix: config.order_id_prefix().to_string(),
            snapshot_limit: config.search_limit(),
        }
    }

    /// Applies `event` to `session`.
    ///
    /// `catalog` is the catalog as it stands now; a started request keeps its
    /// own snapshot of it.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::NoActiveOrder`] when submitting from `Idle`. The
    /// session is left untouched on error.
    pub fn apply(
        &self,
        session: &mut SessionState,
        event: IntakeEvent,
        catalog: &Arc<[ItemRecord]>,
    ) -> Result<Transition, IntakeError> {
        self.apply_at(session, event, catalog, Utc::now())
    }

    pub(crate) fn apply_at(
        &self,
        session: &mut SessionState,
        event: IntakeEvent,
        catalog: &Arc<[ItemRecord]>,
        now: DateTime<Utc>,
    ) -> Result<Transition, IntakeError> {
        match event {
            IntakeEvent::StartRequest(request) => {
                Ok(Transition::Started(self.start(session, request, catalog)))
            }
            IntakeEvent::SubmitOrder(submission) => self
                .submit_at(session, submission, now)
                .map(Transition::Submitted),
        }
    }

    /// Starts a new request, replacing any pending one.
    pub fn start(
        &self,
        session: &mut SessionState,
        request: StartRequest,
        catalog: &Arc<[ItemRecord]>,
    ) -> RequestConfirmation {
        let available_items = self.snapshot(catalog, request.query.as_deref());
        let offered = available_items.len();

        let confirmation_justification = request.justification.to_string();
        let pending = PendingOrder {
            request_type: request.request_type,
            justification: request.justification,
            available_items,
            delivery_estimate: self.delivery_estimate.clone(),
        };

        let replaced = session.begin(pending);
        if let Some(previous) = &replaced {
            tracing::warn!(
                "Discarding pending {} request in favour of a new one",
                previous.request_type()
            );
        }
        tracing::info!(
            "Started {} request offering {offered} items",
            request.request_type
        );

        RequestConfirmation {
            request_type: request.request_type,
            justification: confirmation_justification,
            offered,
            replaced_pending: replaced.is_some(),
        }
    }

    /// The items offered by a new request.
    ///
    /// Without a query the catalog slice itself is shared; it is never
    /// mutated, so later catalog refreshes cannot reach it.
    fn snapshot(&self, catalog: &Arc<[ItemRecord]>, query: Option<&str>) -> Arc<[ItemRecord]> {
        match query {
            None => Arc::clone(catalog),
            Some(query) => engine::search(catalog, query, self.snapshot_limit)
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Submits the pending order.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::NoActiveOrder`] when `session` is idle, leaving
    /// it untouched.
    pub fn submit(
        &self,
        session: &mut SessionState,
        submission: SubmitOrder,
    ) -> Result<Order, IntakeError> {
        self.submit_at(session, submission, Utc::now())
    }

    fn submit_at(
        &self,
        session: &mut SessionState,
        submission: SubmitOrder,
        now: DateTime<Utc>,
    ) -> Result<Order, IntakeError> {
        let Some(pending) = session.pending() else {
            return Err(IntakeError::NoActiveOrder);
        };

        let matched = pending
            .available_items()
            .iter()
            .find(|item| item.is_named_by(&submission.selection));

        let total_cost = matched.map_or_else(
            || {
                tracing::warn!(
                    "Selection '{}' matches no offered item; recording a cost of 0",
                    submission.selection
                );
                0
            },
            |item| item.price,
        );

        let order = Order {
            id: OrderId::generate(&self.order_id_prefix),
            employee: submission.employee,
            request_type: pending.request_type(),
            business_justification: pending.justification().to_string(),
            available_items: pending.available_items().to_vec(),
            selected_item: submission.selection,
            delivery_estimate: pending.delivery_estimate().to_string(),
            status: OrderStatus::Submitted,
            order_date: now,
            total_cost,
            tracking_number: None,
            final_amount: None,
        };

        tracing::info!(
            "Submitted order {} for {} ({})",
            order.id,
            order.employee.name,
            order.employee.department
        );
        session.complete(order.clone());
        Ok(order)
    }
}
