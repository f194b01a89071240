//! Orders service.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        catalog::{records::ProductId, repository::PgCatalogRepository},
        customers::{
            CustomersService, CustomersServiceError, data::GuestDetails, records::CustomerRecord,
        },
        orders::{
            data::{
                Checkout, CheckoutPolicy, ConfirmationStatus, CustomerIdentity, NewOrder,
                NotificationPolicy, OrderDetail, PlacedOrder,
            },
            errors::OrdersServiceError,
            planner::{OrderPlan, plan_order},
            records::{OrderId, OrderItemRecord, OrderRecord},
            repositories::{PgOrderItemsRepository, PgOrdersRepository},
        },
    },
    notifications::{ConfirmationLine, Notifier, ORDER_CONFIRMATION_SUBJECT, OrderConfirmation},
    sessions::CustomerSession,
};

#[derive(Clone)]
pub struct PgOrdersService {
    db: Db,
    orders_repository: PgOrdersRepository,
    items_repository: PgOrderItemsRepository,
    catalog_repository: PgCatalogRepository,
    customers: Arc<dyn CustomersService>,
    notifier: Arc<dyn Notifier>,
    policy: CheckoutPolicy,
}

impl fmt::Debug for PgOrdersService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgOrdersService")
            .field("db", &self.db)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl PgOrdersService {
    #[must_use]
    pub fn new(
        db: Db,
        customers: Arc<dyn CustomersService>,
        notifier: Arc<dyn Notifier>,
        policy: CheckoutPolicy,
    ) -> Self {
        Self {
            db,
            orders_repository: PgOrdersRepository::new(),
            items_repository: PgOrderItemsRepository::new(),
            catalog_repository: PgCatalogRepository::new(),
            customers,
            notifier,
            policy,
        }
    }

    async fn resolve_checkout_customer(
        &self,
        identity: &CustomerIdentity,
        guest: &GuestDetails,
    ) -> Result<CustomerRecord, OrdersServiceError> {
        let customer = match identity {
            CustomerIdentity::Registered(id) => self.customers.get_customer(*id).await?,
            CustomerIdentity::Guest(session_key) => {
                self.customers
                    .find_or_create_guest(session_key, guest.clone())
                    .await?
            }
        };

        Ok(customer)
    }

    /// The customer an identity refers to, if it can be resolved without creating one.
    async fn resolve_existing_customer(
        &self,
        identity: &CustomerIdentity,
    ) -> Result<Option<CustomerRecord>, OrdersServiceError> {
        let customer = match identity {
            CustomerIdentity::Registered(id) => match self.customers.get_customer(*id).await {
                Ok(customer) => Some(customer),
                Err(CustomersServiceError::NotFound) => None,
                Err(error) => return Err(error.into()),
            },
            CustomerIdentity::Guest(session_key) => self.customers.find_guest(session_key).await?,
        };

        Ok(customer)
    }

    async fn persist_order(
        &self,
        checkout: &Checkout,
        customer: &CustomerRecord,
    ) -> Result<(OrderRecord, Vec<OrderItemRecord>, OrderPlan), OrdersServiceError> {
        let mut product_ids: Vec<ProductId> = checkout
            .cart
            .lines
            .values()
            .map(|line| line.product_id)
            .collect();

        product_ids.sort_unstable();
        product_ids.dedup();

        let mut tx = self.db.begin().await?;

        let products: FxHashMap<_, _> = self
            .catalog_repository
            .get_products_by_ids(&mut tx, &product_ids)
            .await?
            .into_iter()
            .map(|product| (product.id, product))
            .collect();

        let plan = plan_order(&checkout.cart, &products, self.policy.missing_products)?;

        let (address, phone) = contact_snapshot(&checkout.customer, &checkout.guest);

        let order = self
            .orders_repository
            .create_order(
                &mut tx,
                NewOrder {
                    customer_id: customer.id,
                    address,
                    phone,
                },
            )
            .await?;

        let mut items = Vec::with_capacity(plan.items.len());

        for item in &plan.items {
            items.push(
                self.items_repository
                    .create_order_item(&mut tx, order.id, item)
                    .await?,
            );
        }

        for (product, quantity) in &plan.sales {
            self.catalog_repository
                .increment_amount_sold(&mut tx, *product, *quantity)
                .await?;
        }

        tx.commit().await?;

        Ok((order, items, plan))
    }

    async fn send_confirmation(
        &self,
        confirmation: &OrderConfirmation,
    ) -> Result<ConfirmationStatus, OrdersServiceError> {
        match self.notifier.send_order_confirmation(confirmation).await {
            Ok(()) => Ok(ConfirmationStatus::Sent),
            Err(error) => match self.policy.notifications {
                NotificationPolicy::BestEffort => {
                    warn!(
                        order_id = %confirmation.order_id,
                        error = %error,
                        "order confirmation not delivered"
                    );

                    Ok(ConfirmationStatus::Pending)
                }
                NotificationPolicy::Required => Err(OrdersServiceError::Notification(error)),
            },
        }
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn place_order(&self, checkout: Checkout) -> Result<PlacedOrder, OrdersServiceError> {
        if checkout.cart.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        let customer = self
            .resolve_checkout_customer(&checkout.identity, &checkout.guest)
            .await?;

        let (order, items, plan) = self.persist_order(&checkout, &customer).await?;

        if !plan.skipped.is_empty() {
            warn!(
                order_id = %order.id,
                skipped = ?plan.skipped,
                "cart lines skipped because their products no longer exist"
            );
        }

        info!(
            order_id = %order.id,
            customer_id = %customer.id,
            items = items.len(),
            total = plan.total,
            "placed order"
        );

        let confirmation = OrderConfirmation {
            order_id: order.id,
            subject: ORDER_CONFIRMATION_SUBJECT.to_string(),
            sender: self.policy.sender.clone(),
            recipient: recipient(&checkout, &customer),
            customer_name: customer.first_name.clone(),
            lines: plan
                .items
                .iter()
                .map(|item| ConfirmationLine {
                    title: item.title.clone(),
                    quantity: item.quantity,
                    price: item.price,
                })
                .collect(),
            total: plan.total,
        };

        let confirmation = self.send_confirmation(&confirmation).await?;

        Ok(PlacedOrder {
            order,
            items,
            total: plan.total,
            skipped: plan.skipped,
            confirmation,
        })
    }

    async fn list_orders(
        &self,
        identity: &CustomerIdentity,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let Some(customer) = self.resolve_existing_customer(identity).await? else {
            return Ok(Vec::new());
        };

        let mut tx = self.db.begin().await?;

        let orders = self
            .orders_repository
            .list_orders_for_customer(&mut tx, customer.id)
            .await?;

        tx.commit().await?;

        Ok(orders)
    }

    async fn order_detail(
        &self,
        order: OrderId,
        identity: &CustomerIdentity,
    ) -> Result<OrderDetail, OrdersServiceError> {
        let customer = self
            .resolve_existing_customer(identity)
            .await?
            .ok_or(OrdersServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let order = self
            .orders_repository
            .get_order_for_customer(&mut tx, order, customer.id)
            .await?;

        let items = self.items_repository.list_order_items(&mut tx, order.id).await?;

        tx.commit().await?;

        Ok(OrderDetail::new(order, items))
    }
}

/// Address and phone recorded on the order: the session profile first, then
/// whatever the checkout form supplied.
fn contact_snapshot(customer: &CustomerSession, guest: &GuestDetails) -> (String, String) {
    let pick = |session: &Option<String>, form: &Option<String>| {
        session
            .as_deref()
            .filter(|value| !value.is_empty())
            .or_else(|| form.as_deref().filter(|value| !value.is_empty()))
            .unwrap_or_default()
            .to_string()
    };

    (
        pick(&customer.address, &guest.address),
        pick(&customer.phone, &guest.phone),
    )
}

/// Guests are written to at the address they typed; everyone else at the
/// address on file.
fn recipient(checkout: &Checkout, customer: &CustomerRecord) -> String {
    match checkout.identity {
        CustomerIdentity::Guest(_) => checkout
            .guest
            .email
            .as_deref()
            .filter(|email| !email.is_empty())
            .unwrap_or(&customer.email)
            .to_string(),
        CustomerIdentity::Registered(_) => customer.email.clone(),
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Turn the checkout's cart into a persisted order and send its confirmation.
    ///
    /// The caller clears the cart once this succeeds.
    async fn place_order(&self, checkout: Checkout) -> Result<PlacedOrder, OrdersServiceError>;

    /// Orders belonging to `identity`, newest first.
    ///
    /// A guest who never checked out has no orders.
    async fn list_orders(
        &self,
        identity: &CustomerIdentity,
    ) -> Result<Vec<OrderRecord>, OrdersServiceError>;

    /// A single order with its lines, only when `identity` owns it.
    async fn order_detail(
        &self,
        order: OrderId,
        identity: &CustomerIdentity,
    ) -> Result<OrderDetail, OrdersServiceError>;
}
