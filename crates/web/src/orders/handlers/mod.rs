//! Order Handlers

pub(crate) mod checkout;
pub(crate) mod detail;
pub(crate) mod history;
pub(crate) mod ordered;

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;

    use eshopper_app::domain::{
        catalog::records::ProductId,
        customers::records::CustomerId,
        orders::records::{OrderId, OrderItemId, OrderItemRecord, OrderRecord},
    };

    pub(crate) fn make_order(id: i64, customer: i64) -> OrderRecord {
        OrderRecord {
            id: OrderId::from_i64(id),
            customer_id: CustomerId::from_i64(customer),
            address: "12 St James's Square".to_string(),
            phone: "0123456789".to_string(),
            placed_at: Timestamp::UNIX_EPOCH,
            status: false,
        }
    }

    pub(crate) fn make_item(id: i64, order: i64, title: &str, quantity: u32, price: u64) -> OrderItemRecord {
        OrderItemRecord {
            id: OrderItemId::from_i64(id),
            order_id: OrderId::from_i64(order),
            product_id: ProductId::from_i64(id),
            product_title: title.to_string(),
            quantity,
            price,
        }
    }
}
