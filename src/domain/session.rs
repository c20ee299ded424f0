use std::{fmt, str::FromStr};

use non_empty_string::NonEmptyString;

use crate::domain::{Order, PendingOrder};

/// Identifies one conversation.
///
/// Every core call is scoped to a key, so state never leaks between users.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionKey(NonEmptyString);

impl SessionKey {
    /// Creates a session key.
    ///
    /// # Errors
    ///
    /// Returns [`EmptySessionKey`] if the key is empty or only whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self, EmptySessionKey> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(EmptySessionKey);
        }
        NonEmptyString::new(key).map(Self).map_err(|_| EmptySessionKey)
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionKey {
    type Err = EmptySessionKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for SessionKey {
    type Error = EmptySessionKey;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Error returned when a session key is blank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("session key must not be empty")]
pub struct EmptySessionKey;

/// Where a session's in-flight order stands.
///
/// `Submitted` is not a resting state: a submitted order moves into the
/// session's history and the session returns to `Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IntakeState {
    /// No order is being composed.
    #[default]
    Idle,
    /// A request has been accepted and is waiting for a selection.
    RequestPending(PendingOrder),
}

impl IntakeState {
    /// The in-flight order, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingOrder> {
        match self {
            Self::Idle => None,
            Self::RequestPending(order) => Some(order),
        }
    }

    /// Whether no order is in flight.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

/// Everything the core remembers about one session.
///
/// Holds at most one in-flight order plus the history of submitted orders,
/// oldest first. Only the intake state machine changes the in-flight slot or
/// appends to the history.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) intake: IntakeState,
    pub(crate) completed: Vec<Order>,
    pub(crate) show_request_form: bool,
}

impl SessionState {
    /// The current intake state.
    #[must_use]
    pub const fn intake(&self) -> &IntakeState {
        &self.intake
    }

    /// The in-flight order, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&PendingOrder> {
        self.intake.pending()
    }

    /// Submitted orders in submission order.
    #[must_use]
    pub fn completed_orders(&self) -> &[Order] {
        &self.completed
    }

    /// Whether the front-end should offer the request form on its next turn.
    #[must_use]
    pub const fn shows_request_form(&self) -> bool {
        self.show_request_form
    }

    /// Puts a new in-flight order in place, returning the one it replaces.
    pub(crate) fn begin(&mut self, order: PendingOrder) -> Option<PendingOrder> {
        match std::mem::replace(&mut self.intake, IntakeState::RequestPending(order)) {
            IntakeState::Idle => None,
            IntakeState::RequestPending(previous) => Some(previous),
        }
    }

    /// Empties the in-flight slot and records the submitted order.
    pub(crate) fn complete(&mut self, order: Order) {
        self.intake = IntakeState::Idle;
        self.completed.push(order);
    }
}
