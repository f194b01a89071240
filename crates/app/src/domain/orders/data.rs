//! Order Data

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    domain::{
        carts::{Cart, CartKey},
        catalog::records::ProductId,
        customers::{data::GuestDetails, records::CustomerId},
        orders::records::{OrderItemRecord, OrderRecord},
    },
    sessions::{CustomerSession, SessionKey},
};

/// Who is asking: a logged-in customer, or the guest behind a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerIdentity {
    Registered(CustomerId),
    Guest(SessionKey),
}

impl CustomerIdentity {
    /// Identity implied by a session's profile snapshot.
    #[must_use]
    pub fn from_session(customer: &CustomerSession, session_key: &SessionKey) -> Self {
        match customer.id {
            Some(id) => Self::Registered(id),
            None => Self::Guest(session_key.clone()),
        }
    }
}

/// What to do with cart lines whose product has been deleted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingProductPolicy {
    /// Drop the line and place the rest of the order.
    #[default]
    Skip,

    /// Refuse the whole order.
    Reject,
}

/// What a failed confirmation delivery does to checkout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPolicy {
    /// Log the failure; the order stands with its confirmation pending.
    #[default]
    BestEffort,

    /// Report the failure to the caller.
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown policy `{0}`")]
pub struct UnknownPolicy(String);

impl FromStr for MissingProductPolicy {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "skip" => Ok(Self::Skip),
            "reject" => Ok(Self::Reject),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

impl FromStr for NotificationPolicy {
    type Err = UnknownPolicy;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "best-effort" | "best_effort" => Ok(Self::BestEffort),
            "required" => Ok(Self::Required),
            other => Err(UnknownPolicy(other.to_string())),
        }
    }
}

/// Checkout behaviour switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutPolicy {
    pub missing_products: MissingProductPolicy,
    pub notifications: NotificationPolicy,

    /// Address confirmations are sent from.
    pub sender: String,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            missing_products: MissingProductPolicy::default(),
            notifications: NotificationPolicy::default(),
            sender: crate::notifications::DEFAULT_SENDER.to_string(),
        }
    }
}

/// Everything checkout needs from the session and the submitted form.
#[derive(Debug, Clone)]
pub struct Checkout {
    pub cart: Cart,
    pub customer: CustomerSession,
    pub identity: CustomerIdentity,
    pub guest: GuestDetails,
}

/// Whether the confirmation message went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
    Sent,
    Pending,
}

/// Outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
    pub total: u64,

    /// Cart lines dropped because their product no longer exists.
    pub skipped: Vec<CartKey>,
    pub confirmation: ConfirmationStatus,
}

/// One order with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDetail {
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
    pub total: u64,
}

impl OrderDetail {
    #[must_use]
    pub fn new(order: OrderRecord, items: Vec<OrderItemRecord>) -> Self {
        let total = items
            .iter()
            .fold(0_u64, |total, item| total.saturating_add(item.line_total()));

        Self {
            order,
            items,
            total,
        }
    }
}

/// Order header ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NewOrder {
    pub customer_id: CustomerId,
    pub address: String,
    pub phone: String,
}

/// Order line ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: ProductId,
    pub title: String,
    pub quantity: u32,
    pub price: u64,
}
