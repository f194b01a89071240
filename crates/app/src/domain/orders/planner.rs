//! Turns a cart into order lines and sales counter updates.

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use crate::domain::{
    carts::{Cart, CartKey, MAX_PRICE},
    catalog::records::{ProductId, ProductRecord},
    orders::{
        data::{MissingProductPolicy, NewOrderItem},
        errors::OrdersServiceError,
    },
};

/// Everything a checkout will write, computed before any write happens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderPlan {
    pub items: Vec<NewOrderItem>,

    /// Units sold per product, summed across lines.
    pub sales: BTreeMap<ProductId, u64>,
    pub total: u64,
    pub skipped: Vec<CartKey>,
}

/// Plan the order for `cart` against the products that still exist.
///
/// Lines are charged at the unit price captured in the cart, not the live
/// catalog price. A total above [`MAX_PRICE`] refuses the whole order.
pub fn plan_order(
    cart: &Cart,
    products: &FxHashMap<ProductId, ProductRecord>,
    policy: MissingProductPolicy,
) -> Result<OrderPlan, OrdersServiceError> {
    let mut plan = OrderPlan::default();

    for (key, line) in &cart.lines {
        if !products.contains_key(&line.product_id) {
            match policy {
                MissingProductPolicy::Skip => {
                    plan.skipped.push(key.clone());

                    continue;
                }
                MissingProductPolicy::Reject => {
                    return Err(OrdersServiceError::MissingProduct(key.clone()));
                }
            }
        }

        plan.items.push(NewOrderItem {
            product_id: line.product_id,
            title: line.title.clone(),
            quantity: line.quantity,
            price: line.unit_price,
        });

        let quantity = u64::from(line.quantity);

        plan.total = line
            .unit_price
            .checked_mul(quantity)
            .and_then(|line_total| plan.total.checked_add(line_total))
            .filter(|&total| total <= MAX_PRICE)
            .ok_or(OrdersServiceError::TotalTooHigh)?;

        let sold = plan.sales.entry(line.product_id).or_default();
        *sold = sold
            .checked_add(quantity)
            .ok_or(OrdersServiceError::TotalTooHigh)?;
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::domain::{
        carts::{AddToCart, CartLineItem},
        catalog::records::CategoryId,
    };

    use super::*;

    fn product(id: i64, title: &str, price: u64) -> ProductRecord {
        ProductRecord {
            id: ProductId::from_i64(id),
            title: title.to_string(),
            material: "Oak".to_string(),
            description: None,
            price,
            amount_sold: 0,
            category_id: CategoryId::from_i64(1),
            category_name: "Furniture".to_string(),
            image: format!("uploads/products/{id}.jpg"),
        }
    }

    fn add(cart: &mut Cart, title: &str, id: i64, unit_price: u64, times: u32) {
        for _ in 0..times {
            let added = cart.add_item(AddToCart {
                title: title.to_string(),
                product_id: ProductId::from_i64(id),
                unit_price,
                image: format!("{id}.jpg"),
            });

            assert_eq!(added, Ok(()), "test cart rejected {title}");
        }
    }

    fn catalog(
        products: impl IntoIterator<Item = ProductRecord>,
    ) -> FxHashMap<ProductId, ProductRecord> {
        products.into_iter().map(|p| (p.id, p)).collect()
    }

    #[test]
    fn chair_and_table_checkout() -> TestResult {
        let mut cart = Cart::with_id("1".to_string());
        add(&mut cart, "Chair", 1, 50, 2);
        add(&mut cart, "Table", 2, 200, 1);

        let products = catalog([product(1, "Chair", 50), product(2, "Table", 200)]);

        let plan = plan_order(&cart, &products, MissingProductPolicy::Skip)?;

        assert_eq!(
            plan.items,
            vec![
                NewOrderItem {
                    product_id: ProductId::from_i64(1),
                    title: "Chair".to_string(),
                    quantity: 2,
                    price: 50,
                },
                NewOrderItem {
                    product_id: ProductId::from_i64(2),
                    title: "Table".to_string(),
                    quantity: 1,
                    price: 200,
                },
            ]
        );
        assert_eq!(plan.sales.get(&ProductId::from_i64(1)), Some(&2));
        assert_eq!(plan.sales.get(&ProductId::from_i64(2)), Some(&1));
        assert_eq!(plan.total, 300);
        assert!(plan.skipped.is_empty());

        Ok(())
    }

    #[test]
    fn deleted_product_line_is_skipped() -> TestResult {
        let mut cart = Cart::with_id("1".to_string());
        add(&mut cart, "Chair", 1, 50, 2);
        add(&mut cart, "Table", 2, 200, 1);

        let products = catalog([product(2, "Table", 200)]);

        let plan = plan_order(&cart, &products, MissingProductPolicy::Skip)?;

        assert_eq!(plan.items.len(), 1);
        assert_eq!(
            plan.items.first().map(|i| i.product_id),
            Some(ProductId::from_i64(2))
        );
        assert_eq!(plan.total, 200);
        assert_eq!(
            plan.skipped,
            vec![CartKey::new("Chair", ProductId::from_i64(1))]
        );
        assert!(!plan.sales.contains_key(&ProductId::from_i64(1)));

        Ok(())
    }

    #[test]
    fn deleted_product_rejects_under_strict_policy() {
        let mut cart = Cart::with_id("1".to_string());
        add(&mut cart, "Chair", 1, 50, 1);

        let result = plan_order(&cart, &FxHashMap::default(), MissingProductPolicy::Reject);

        let rejected = match &result {
            Err(OrdersServiceError::MissingProduct(key)) => Some(key.as_str()),
            _ => None,
        };

        assert_eq!(rejected, Some("Chair_1"), "expected MissingProduct, got {result:?}");
    }

    #[test]
    fn cart_price_wins_over_catalog_price() -> TestResult {
        let mut cart = Cart::with_id("1".to_string());
        add(&mut cart, "Chair", 1, 50, 1);

        let products = catalog([product(1, "Chair", 80)]);

        let plan = plan_order(&cart, &products, MissingProductPolicy::Skip)?;

        assert_eq!(plan.items.first().map(|i| i.price), Some(50));
        assert_eq!(plan.total, 50);

        Ok(())
    }

    #[test]
    fn total_above_the_storable_maximum_refuses_the_order() {
        let mut cart = Cart::with_id("1".to_string());

        for (title, id) in [("Throne", 1), ("Crown", 2)] {
            cart.lines.insert(
                CartKey::new(title, ProductId::from_i64(id)),
                CartLineItem {
                    title: title.to_string(),
                    product_id: ProductId::from_i64(id),
                    unit_price: MAX_PRICE,
                    quantity: 1,
                    image: format!("{id}.jpg"),
                    line_total: MAX_PRICE,
                },
            );
        }

        let products = catalog([product(1, "Throne", MAX_PRICE), product(2, "Crown", MAX_PRICE)]);

        let result = plan_order(&cart, &products, MissingProductPolicy::Skip);

        assert!(
            matches!(result, Err(OrdersServiceError::TotalTooHigh)),
            "expected TotalTooHigh, got {result:?}"
        );
    }

    #[test]
    fn sales_are_summed_per_product_across_keys() -> TestResult {
        let mut cart = Cart::with_id("1".to_string());
        add(&mut cart, "Chair", 1, 50, 1);
        add(&mut cart, "Armchair", 1, 50, 3);

        let products = catalog([product(1, "Chair", 50)]);

        let plan = plan_order(&cart, &products, MissingProductPolicy::Skip)?;

        assert_eq!(plan.items.len(), 2);
        assert_eq!(plan.sales.get(&ProductId::from_i64(1)), Some(&4));

        Ok(())
    }
}
