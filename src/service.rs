//! The operations exposed to the intent router.
//!
//! [`Assistant`] ties a catalog, a session store and the intake state machine
//! together. Every session-scoped call names its session explicitly; the
//! engine functions never see session state.
//!
//! Routers that speak JSON can deserialize an [`Action`], convert it into a
//! validated [`Event`] and hand it to [`Assistant::handle`], which answers
//! with a serializable [`Outcome`].

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::{
    domain::{
        Config, ItemSummary, Order, PerformanceNeeds, Requirements, SessionKey, SessionState,
    },
    engine,
    intake::{
        IntakeError, IntakeMachine, RequestConfirmation, StartRequest, SubmitOrder,
        ValidationError,
    },
    report,
    storage::{CatalogStore, InMemorySessionStore, SessionStore, StaticCatalog, StoreError},
};

/// Text returned when the front-end is asked to show the request form.
pub const REQUEST_FORM_HINT: &str = "I'll help you request a new laptop! A form will appear \
                                     where you can provide your business justification and \
                                     select the type of request.";

/// The core facade.
#[derive(Debug)]
pub struct Assistant<C = StaticCatalog, S = InMemorySessionStore> {
    catalog: C,
    sessions: S,
    config: Config,
    machine: IntakeMachine,
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new(
            StaticCatalog::reference(),
            InMemorySessionStore::new(),
            Config::default(),
        )
    }
}

impl<C, S> Assistant<C, S>
where
    C: CatalogStore,
    S: SessionStore,
{
    /// Creates an assistant over the given collaborators.
    #[must_use]
    pub fn new(catalog: C, sessions: S, config: Config) -> Self {
        let machine = IntakeMachine::new(&config);
        Self {
            catalog,
            sessions,
            config,
            machine,
        }
    }

    /// The active configuration.
    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// The catalog store.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// The session store.
    #[must_use]
    pub const fn sessions(&self) -> &S {
        &self.sessions
    }

    /// Searches the catalog.
    ///
    /// `limit` defaults to the configured search limit.
    #[must_use]
    pub fn search(&self, query: &str, limit: Option<usize>) -> Vec<ItemSummary> {
        let limit = limit.unwrap_or_else(|| self.config.search_limit());
        let items = self.catalog.get_all();
        engine::search(&items, query, limit)
            .into_iter()
            .map(ItemSummary::from)
            .collect()
    }

    /// Every catalog option, or the search results for `query` if one is
    /// given.
    #[must_use]
    pub fn catalog_options(&self, query: Option<&str>) -> Vec<ItemSummary> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => self.search(query, None),
            None => self
                .catalog
                .get_all()
                .iter()
                .map(ItemSummary::from)
                .collect(),
        }
    }

    /// Recommends catalog items for the given requirements, best first.
    #[must_use]
    pub fn recommend(&self, requirements: &Requirements) -> Vec<ItemSummary> {
        let items = self.catalog.get_all();
        engine::recommend(&items, requirements)
            .into_iter()
            .map(ItemSummary::from)
            .collect()
    }

    /// Renders the top recommendations as a markdown report.
    #[must_use]
    pub fn recommend_report(&self, requirements: &Requirements) -> String {
        let items = self.catalog.get_all();
        let recommended = engine::recommend(&items, requirements);
        report::recommendation_report(&recommended, self.config.report_limit())
    }

    /// Starts a new request for `session`, replacing any pending one.
    ///
    /// # Errors
    ///
    /// Fails if the session store is unavailable.
    #[instrument(skip(self, session, request), fields(session = %session))]
    pub fn start_request(
        &self,
        session: &SessionKey,
        request: StartRequest,
    ) -> Result<RequestConfirmation, IntakeError> {
        let catalog = self.catalog.get_all();
        self.update(session, |state| Ok(self.machine.start(state, request, &catalog)))
    }

    /// Submits the pending order for `session`.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::NoActiveOrder`] if no request has been started,
    /// in which case nothing is written to the session store.
    #[instrument(skip(self, session, submission), fields(session = %session))]
    pub fn submit_order(
        &self,
        session: &SessionKey,
        submission: SubmitOrder,
    ) -> Result<Order, IntakeError> {
        self.update(session, |state| self.machine.submit(state, submission))
    }

    /// The orders `session` has submitted, oldest first.
    ///
    /// # Errors
    ///
    /// Fails if the session store is unavailable.
    pub fn list_orders(&self, session: &SessionKey) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .sessions
            .get(session)?
            .map(|state| state.completed)
            .unwrap_or_default())
    }

    /// Asks the front-end to show the request form on its next turn.
    ///
    /// # Errors
    ///
    /// Fails if the session store is unavailable.
    #[instrument(skip(self, session), fields(session = %session))]
    pub fn request_form(&self, session: &SessionKey) -> Result<&'static str, StoreError> {
        let mut state = self.session_state(session)?;
        state.show_request_form = true;
        self.sessions.set(session, state)?;
        tracing::debug!("Request form flagged");
        Ok(REQUEST_FORM_HINT)
    }

    /// Whether the request form should be shown, clearing the flag.
    ///
    /// # Errors
    ///
    /// Fails if the session store is unavailable.
    pub fn take_request_form_hint(&self, session: &SessionKey) -> Result<bool, StoreError> {
        let Some(mut state) = self.sessions.get(session)? else {
            return Ok(false);
        };
        if !state.show_request_form {
            return Ok(false);
        }
        state.show_request_form = false;
        self.sessions.set(session, state)?;
        Ok(true)
    }

    /// The state stored for `session`, or a fresh idle state.
    ///
    /// # Errors
    ///
    /// Fails if the session store is unavailable.
    pub fn session_state(&self, session: &SessionKey) -> Result<SessionState, StoreError> {
        Ok(self.sessions.get(session)?.unwrap_or_default())
    }

    /// Dispatches a validated event.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the event maps to.
    pub fn handle(&self, session: &SessionKey, event: Event) -> Result<Outcome, IntakeError> {
        let outcome = match event {
            Event::Query { query, limit } => Outcome::Items {
                items: self.search(&query, limit),
            },
            Event::Recommend {
                requirements,
                report: false,
            } => Outcome::Items {
                items: self.recommend(&requirements),
            },
            Event::Recommend {
                requirements,
                report: true,
            } => Outcome::Report {
                text: self.recommend_report(&requirements),
            },
            Event::StartRequest(request) => {
                Outcome::RequestStarted(self.start_request(session, request)?)
            }
            Event::SubmitOrder(submission) => {
                Outcome::OrderSubmitted(Box::new(self.submit_order(session, submission)?))
            }
            Event::ListOrders => Outcome::Orders {
                orders: self.list_orders(session)?,
            },
            Event::RequestForm => Outcome::RequestForm {
                hint: self.request_form(session)?.to_string(),
            },
        };
        Ok(outcome)
    }

    /// Runs `f` as a read-modify-write of the session's state. Nothing is
    /// written if `f` fails.
    fn update<T>(
        &self,
        session: &SessionKey,
        f: impl FnOnce(&mut SessionState) -> Result<T, IntakeError>,
    ) -> Result<T, IntakeError> {
        let mut state = self.session_state(session)?;
        let value = f(&mut state)?;
        self.sessions.set(session, state)?;
        Ok(value)
    }
}

/// A validated request from the intent router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Keyword search over the catalog.
    Query {
        /// Free-text query.
        query: String,
        /// Maximum number of results; the configured default when absent.
        limit: Option<usize>,
    },
    /// Constraint-driven recommendation.
    Recommend {
        /// The constraints.
        requirements: Requirements,
        /// Whether to answer with a rendered report instead of items.
        report: bool,
    },
    /// Start a new request.
    StartRequest(StartRequest),
    /// Submit the pending order.
    SubmitOrder(SubmitOrder),
    /// List the session's submitted orders.
    ListOrders,
    /// Ask for the request form to be shown.
    RequestForm,
}

/// An unvalidated request as it arrives over the wire.
///
/// ```json
/// { "action": "start_request", "request_type": "Hardware Replacement", "justification": "screen cracked" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// See [`Event::Query`].
    Query {
        /// Free-text query.
        query: String,
        /// Maximum number of results.
        #[serde(default)]
        limit: Option<usize>,
    },
    /// See [`Event::Recommend`].
    Recommend {
        /// Workload the machine is needed for.
        #[serde(default)]
        use_case: Option<String>,
        /// Maximum price.
        #[serde(default)]
        budget: Option<u32>,
        /// Catalog category.
        #[serde(default)]
        category: Option<String>,
        /// `low`, `medium` or `high`.
        #[serde(default)]
        performance_needs: Option<String>,
        /// Answer with a rendered report.
        #[serde(default)]
        report: bool,
    },
    /// See [`Event::StartRequest`].
    StartRequest {
        /// Request type, by variant or display name.
        request_type: String,
        /// Business justification.
        justification: String,
        /// Optional search narrowing the offered items.
        #[serde(default)]
        query: Option<String>,
    },
    /// See [`Event::SubmitOrder`].
    SubmitOrder {
        /// Who the laptop is for.
        employee_name: String,
        /// Their department.
        department: String,
        /// Free-text name of the chosen laptop.
        selected_laptop: String,
    },
    /// See [`Event::ListOrders`].
    ListOrders,
    /// See [`Event::RequestForm`].
    RequestForm,
}

impl TryFrom<Action> for Event {
    type Error = ValidationError;

    fn try_from(action: Action) -> Result<Self, Self::Error> {
        Ok(match action {
            Action::Query { query, limit } => Self::Query { query, limit },
            Action::Recommend {
                use_case,
                budget,
                category,
                performance_needs,
                report,
            } => {
                let performance_needs = performance_needs
                    .filter(|level| !level.trim().is_empty())
                    .map(|level| level.parse::<PerformanceNeeds>())
                    .transpose()?;
                Self::Recommend {
                    requirements: Requirements {
                        use_case,
                        budget,
                        category,
                        performance_needs,
                    },
                    report,
                }
            }
            Action::StartRequest {
                request_type,
                justification,
                query,
            } => Self::StartRequest(
                StartRequest::new(&request_type, &justification)?.with_query(query),
            ),
            Action::SubmitOrder {
                employee_name,
                department,
                selected_laptop,
            } => Self::SubmitOrder(SubmitOrder::new(
                &employee_name,
                &department,
                &selected_laptop,
            )),
            Action::ListOrders => Self::ListOrders,
            Action::RequestForm => Self::RequestForm,
        })
    }
}

/// The answer to an [`Event`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Catalog items, best first.
    Items {
        /// The items.
        items: Vec<ItemSummary>,
    },
    /// A rendered recommendation report.
    Report {
        /// Markdown text.
        text: String,
    },
    /// A request was accepted.
    RequestStarted(RequestConfirmation),
    /// An order was submitted.
    OrderSubmitted(Box<Order>),
    /// The session's submitted orders.
    Orders {
        /// Oldest first.
        orders: Vec<Order>,
    },
    /// The request form should be shown.
    RequestForm {
        /// Text to show alongside the form.
        hint: String,
    },
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;
    use crate::domain::{IntakeState, OrderStatus, RequestType};

    fn key(value: &str) -> SessionKey {
        SessionKey::new(value).unwrap()
    }

    fn replacement() -> StartRequest {
        StartRequest::new("HardwareReplacement", "laptop crashes").unwrap()
    }

    #[test]
    fn start_then_submit_records_one_order() {
        let assistant = Assistant::default();
        let alice = key("alice");

        let confirmation = assistant.start_request(&alice, replacement()).unwrap();
        assert_eq!(confirmation.request_type, RequestType::HardwareReplacement);
        assert_eq!(confirmation.justification, "laptop crashes");
        assert_eq!(confirmation.offered, 5);

        let order = assistant
            .submit_order(
                &alice,
                SubmitOrder::new("Jane Doe", "Engineering", "HP EliteBook 840 G8"),
            )
            .unwrap();

        assert_eq!(order.total_cost, 1299);
        assert_eq!(order.status, OrderStatus::Submitted);
        assert!(order.id.as_str().starts_with("PO-"));

        let state = assistant.session_state(&alice).unwrap();
        assert!(state.intake().is_idle());
        assert_eq!(state.completed_orders(), [order]);
    }

    #[test]
    fn unmatched_selection_submits_with_zero_cost() {
        let assistant = Assistant::default();
        let alice = key("alice");

        assistant.start_request(&alice, replacement()).unwrap();
        let order = assistant
            .submit_order(
                &alice,
                SubmitOrder::new("Jane Doe", "Engineering", "NonexistentBrand XYZ"),
            )
            .unwrap();

        assert_eq!(order.total_cost, 0);
        assert_eq!(order.status, OrderStatus::Submitted);
    }

    #[test]
    fn submit_on_fresh_session_fails_without_writing() {
        let assistant = Assistant::default();
        let bob = key("bob");

        let result = assistant.submit_order(
            &bob,
            SubmitOrder::new("Bob", "Sales", "Dell Latitude 3420"),
        );

        assert_eq!(result, Err(IntakeError::NoActiveOrder));
        assert_eq!(assistant.sessions().get(&bob), Ok(None));
    }

    #[test]
    fn restarting_discards_the_first_request() {
        let assistant = Assistant::default();
        let alice = key("alice");

        assistant.start_request(&alice, replacement()).unwrap();
        let second = assistant
            .start_request(
                &alice,
                StartRequest::new("Upgrade Request", "need more memory").unwrap(),
            )
            .unwrap();
        assert!(second.replaced_pending);

        let order = assistant
            .submit_order(
                &alice,
                SubmitOrder::new("Jane Doe", "Engineering", "Dell Latitude 3420"),
            )
            .unwrap();

        assert_eq!(order.request_type, RequestType::UpgradeRequest);
        assert_eq!(assistant.list_orders(&alice).unwrap().len(), 1);
    }

    #[test]
    fn sessions_do_not_share_state() {
        let assistant = Assistant::default();
        let alice = key("alice");
        let bob = key("bob");

        assistant.start_request(&alice, replacement()).unwrap();

        assert!(assistant.session_state(&bob).unwrap().intake().is_idle());
        assert_eq!(
            assistant.submit_order(&bob, SubmitOrder::new("Bob", "Sales", "HP")),
            Err(IntakeError::NoActiveOrder)
        );
        assert!(matches!(
            assistant.session_state(&alice).unwrap().intake(),
            IntakeState::RequestPending(_)
        ));
    }

    #[test]
    fn list_orders_does_not_create_state() {
        let assistant = Assistant::default();
        let carol = key("carol");

        assert!(assistant.list_orders(&carol).unwrap().is_empty());
        assert_eq!(assistant.sessions().is_empty(), Ok(true));
    }

    #[test]
    fn request_form_hint_is_taken_once() {
        let assistant = Assistant::default();
        let alice = key("alice");

        assert_eq!(assistant.request_form(&alice), Ok(REQUEST_FORM_HINT));
        assert!(assistant.session_state(&alice).unwrap().intake().is_idle());

        assert_eq!(assistant.take_request_form_hint(&alice), Ok(true));
        assert_eq!(assistant.take_request_form_hint(&alice), Ok(false));
    }

    #[test]
    fn request_form_leaves_pending_order_alone() {
        let assistant = Assistant::default();
        let alice = key("alice");

        assistant.start_request(&alice, replacement()).unwrap();
        assistant.request_form(&alice).unwrap();

        let state = assistant.session_state(&alice).unwrap();
        assert!(state.pending().is_some());
        assert!(state.shows_request_form());
    }

    #[test_case(None, 3)]
    #[test_case(Some(1), 1)]
    #[test_case(Some(10), 3)]
    fn search_limit_defaults_to_config(limit: Option<usize>, expected: usize) {
        let mut config = Config::default();
        config.set_search_limit(3);
        let assistant = Assistant::new(
            StaticCatalog::reference(),
            InMemorySessionStore::new(),
            config,
        );

        assert_eq!(assistant.search("laptop", limit).len(), expected);
    }

    #[test]
    fn catalog_options_without_query_lists_everything() {
        let assistant = Assistant::default();

        assert_eq!(assistant.catalog_options(None).len(), 5);
        assert_eq!(assistant.catalog_options(Some("  ")).len(), 5);

        let apple = assistant.catalog_options(Some("apple"));
        assert_eq!(apple.len(), 1);
        assert_eq!(apple[0].manufacturer, "Apple");
    }

    #[test]
    fn recommend_report_respects_report_limit() {
        let assistant = Assistant::default();

        let text = assistant.recommend_report(&Requirements::default());

        assert!(text.contains("### 1. Apple"));
        assert!(text.contains("### 3. HP"));
        assert!(!text.contains("### 4."));
    }

    #[test]
    fn actions_deserialize_and_validate() {
        let action: Action = serde_json::from_str(
            r#"{"action":"start_request","request_type":"new employee setup","justification":"joining Monday"}"#,
        )
        .unwrap();

        let event = Event::try_from(action).unwrap();

        assert_eq!(
            event,
            Event::StartRequest(StartRequest::new("NewEmployeeSetup", "joining Monday").unwrap())
        );
    }

    #[test_case(r#"{"action":"start_request","request_type":"rental","justification":"x"}"#)]
    #[test_case(r#"{"action":"start_request","request_type":"UpgradeRequest","justification":"  "}"#)]
    #[test_case(r#"{"action":"recommend","performance_needs":"extreme"}"#)]
    fn invalid_actions_are_rejected(json: &str) {
        let action: Action = serde_json::from_str(json).unwrap();
        assert!(Event::try_from(action).is_err());
    }

    #[test]
    fn handle_dispatches_every_event() {
        let assistant = Assistant::default();
        let alice = key("alice");

        let outcome = assistant
            .handle(
                &alice,
                Event::Query {
                    query: "developer".to_string(),
                    limit: Some(1),
                },
            )
            .unwrap();
        assert!(matches!(outcome, Outcome::Items { items } if items.len() == 1));

        let outcome = assistant
            .handle(
                &alice,
                Event::Recommend {
                    requirements: Requirements::default(),
                    report: true,
                },
            )
            .unwrap();
        assert!(matches!(outcome, Outcome::Report { .. }));

        assistant
            .handle(&alice, Event::StartRequest(replacement()))
            .unwrap();
        let outcome = assistant
            .handle(
                &alice,
                Event::SubmitOrder(SubmitOrder::new("Jane", "IT", "Dell Latitude 3420")),
            )
            .unwrap();
        assert!(matches!(outcome, Outcome::OrderSubmitted(order) if order.total_cost == 899));

        let outcome = assistant.handle(&alice, Event::ListOrders).unwrap();
        assert!(matches!(outcome, Outcome::Orders { orders } if orders.len() == 1));

        let outcome = assistant.handle(&alice, Event::RequestForm).unwrap();
        assert_eq!(
            outcome,
            Outcome::RequestForm {
                hint: REQUEST_FORM_HINT.to_string()
            }
        );
    }

    #[test]
    fn blank_submission_fields_are_accepted_at_zero_cost() {
        let assistant = Assistant::default();
        let alice = key("alice");
        let blank = r#"{"action":"submit_order","employee_name":"","department":"","selected_laptop":""}"#;

        let event = Event::try_from(serde_json::from_str::<Action>(blank).unwrap()).unwrap();
        assert_eq!(
            assistant.handle(&alice, event.clone()),
            Err(IntakeError::NoActiveOrder)
        );
        assert_eq!(assistant.sessions().get(&alice), Ok(None));

        assistant.start_request(&alice, replacement()).unwrap();
        let outcome = assistant.handle(&alice, event).unwrap();

        assert!(matches!(outcome, Outcome::OrderSubmitted(order) if order.total_cost == 0));
        assert!(assistant.session_state(&alice).unwrap().intake().is_idle());
    }

    #[test]
    fn outcomes_are_tagged() {
        let outcome = Outcome::Report {
            text: "none".to_string(),
        };

        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json, serde_json::json!({"outcome": "report", "text": "none"}));
    }
}
