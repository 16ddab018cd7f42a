//! # Sales Reports
//!
//! Aggregates submitted orders into the figures shown on the reports and
//! dashboard screens. Only paid orders count toward sales.
//!
//! Every sum is checked: a total that leaves the decimal range is reported
//! as `CoreError::TotalOverflow` naming the figure, never wrapped or
//! panicked on.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::inventory::InventoryItem;
use crate::money::Money;
use crate::types::{Category, MenuItem, Order, OrderItem};

/// Category name used for items without a (known) category.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Headline figures for a date range.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub order_count: usize,
    /// Sum of `total_amount`.
    pub total_sales: Money,
    pub total_vat: Money,
    pub total_service_charge: Money,
    /// `total_sales / order_count`, zero when there are no orders.
    pub average_order_value: Money,
}

/// Sales for one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailySales {
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub sales: Money,
}

/// Item sales for one menu category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategorySales {
    pub name: String,
    /// Sum of the items' `total_price`.
    pub sales: Money,
}

/// Figures for the dashboard tiles.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    /// Sum of today's paid orders.
    pub today_revenue: Money,
    /// All orders placed today, paid or not.
    pub today_order_count: usize,
    /// Inventory items at or under their minimum level.
    pub low_stock_count: usize,
}

impl SalesSummary {
    /// Summarises paid orders created within `from..=to`.
    pub fn from_orders(orders: &[Order], from: NaiveDate, to: NaiveDate) -> CoreResult<Self> {
        let mut summary = SalesSummary::default();

        for order in paid_in_range(orders, from, to) {
            summary.order_count += 1;
            summary.total_sales = add(summary.total_sales, order.total_amount, "total_sales")?;
            summary.total_vat = add(summary.total_vat, order.vat_amount, "total_vat")?;
            summary.total_service_charge = add(
                summary.total_service_charge,
                order.service_charge,
                "total_service_charge",
            )?;
        }

        summary.average_order_value = summary.total_sales.average_over(summary.order_count);
        Ok(summary)
    }
}

/// Per-day sales of paid orders within `from..=to`, oldest day first.
/// Days without sales are omitted.
pub fn daily_sales(orders: &[Order], from: NaiveDate, to: NaiveDate) -> CoreResult<Vec<DailySales>> {
    let mut by_day: BTreeMap<NaiveDate, Money> = BTreeMap::new();

    for order in paid_in_range(orders, from, to) {
        let day = by_day.entry(order.created_at.date_naive()).or_default();
        *day = add(*day, order.total_amount, "daily sales")?;
    }

    Ok(by_day
        .into_iter()
        .map(|(date, sales)| DailySales { date, sales })
        .collect())
}

/// Item sales grouped by the category of their menu item.
///
/// The caller picks which items to include. Items whose menu item or
/// category is unknown are grouped under [`UNCATEGORIZED`]. Largest sales
/// first; ties by name.
pub fn category_sales(
    items: &[OrderItem],
    menu: &[MenuItem],
    categories: &[Category],
) -> CoreResult<Vec<CategorySales>> {
    let category_names: HashMap<&str, &str> = categories
        .iter()
        .map(|c| (c.id.as_str(), c.name.as_str()))
        .collect();
    let item_category: HashMap<&str, &str> = menu
        .iter()
        .filter_map(|m| {
            let category_id = m.category_id.as_deref()?;
            Some((m.id.as_str(), *category_names.get(category_id)?))
        })
        .collect();

    let mut by_name: BTreeMap<&str, Money> = BTreeMap::new();
    for item in items {
        let name = item_category
            .get(item.menu_item_id.as_str())
            .copied()
            .unwrap_or(UNCATEGORIZED);
        let sales = by_name.entry(name).or_default();
        *sales = add(*sales, item.total_price, "category sales")?;
    }

    let mut result: Vec<CategorySales> = by_name
        .into_iter()
        .map(|(name, sales)| CategorySales {
            name: name.to_string(),
            sales,
        })
        .collect();
    // Stable sort keeps the name order for equal sales.
    result.sort_by(|a, b| b.sales.cmp(&a.sales));
    Ok(result)
}

/// Dashboard figures from today's orders and the inventory list.
pub fn dashboard_stats(
    todays_orders: &[Order],
    inventory: &[InventoryItem],
) -> CoreResult<DashboardStats> {
    let mut today_revenue = Money::zero();
    for order in todays_orders.iter().filter(|o| o.is_paid()) {
        today_revenue = add(today_revenue, order.total_amount, "today_revenue")?;
    }

    Ok(DashboardStats {
        today_revenue,
        today_order_count: todays_orders.len(),
        low_stock_count: inventory.iter().filter(|i| i.is_low_stock()).count(),
    })
}

fn add(total: Money, amount: Money, figure: &str) -> CoreResult<Money> {
    total
        .checked_add(amount)
        .ok_or_else(|| CoreError::TotalOverflow(figure.to_string()))
}

fn paid_in_range(
    orders: &[Order],
    from: NaiveDate,
    to: NaiveDate,
) -> impl Iterator<Item = &Order> {
    orders.iter().filter(move |o| {
        let day = o.created_at.date_naive();
        o.is_paid() && day >= from && day <= to
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EtaSubmissionStatus, OrderStatus, OrderType, PaymentStatus};
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn order(day: u32, total_minor: i64, payment_status: PaymentStatus) -> Order {
        let at = Utc.with_ymd_and_hms(2026, 3, day, 12, 0, 0).unwrap();
        let subtotal = Money::from_minor(total_minor * 100 / 124);
        Order {
            id: format!("order-{}-{}", day, total_minor),
            order_number: format!("ORD-{}", day),
            order_type: OrderType::DineIn,
            table_number: None,
            status: OrderStatus::Served,
            subtotal,
            discount_amount: Money::zero(),
            vat_amount: Money::from_minor(total_minor * 14 / 124),
            service_charge: Money::from_minor(total_minor * 10 / 124),
            total_amount: Money::from_minor(total_minor),
            payment_method: None,
            payment_status,
            eta_submission_status: EtaSubmissionStatus::Pending,
            notes: None,
            created_at: at,
            updated_at: at,
        }
    }

    fn march(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, day).unwrap()
    }

    fn order_item(menu_item_id: &str, total: i64) -> OrderItem {
        OrderItem {
            id: format!("item-{}-{}", menu_item_id, total),
            order_id: "order-1".to_string(),
            menu_item_id: menu_item_id.to_string(),
            name_snapshot: menu_item_id.to_string(),
            quantity: 1,
            unit_price: Money::from_major(total),
            total_price: Money::from_major(total),
            vat_amount: Money::zero(),
            created_at: Utc::now(),
        }
    }

    fn menu_item(id: &str, category_id: Option<&str>) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            category_id: category_id.map(str::to_string),
            name: id.to_string(),
            name_ar: None,
            sku: None,
            price: Money::from_major(1),
            is_available: true,
            created_at: Utc::now(),
        }
    }

    fn category(id: &str, name: &str) -> Category {
        Category {
            id: id.to_string(),
            name: name.to_string(),
            name_ar: None,
            sort_order: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary_counts_only_paid_orders_in_range() {
        let orders = vec![
            order(1, 12400, PaymentStatus::Paid),
            order(2, 24800, PaymentStatus::Paid),
            order(2, 99900, PaymentStatus::Pending),
            order(20, 12400, PaymentStatus::Paid),
        ];

        let summary = SalesSummary::from_orders(&orders, march(1), march(10)).unwrap();

        assert_eq!(summary.order_count, 2);
        assert_eq!(summary.total_sales, Money::from_major(372));
        assert_eq!(summary.total_vat, Money::from_major(42));
        assert_eq!(summary.total_service_charge, Money::from_major(30));
        assert_eq!(summary.average_order_value, Money::from_major(186));
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let summary = SalesSummary::from_orders(&[], march(1), march(31)).unwrap();
        assert_eq!(summary, SalesSummary::default());
        assert!(summary.average_order_value.is_zero());
    }

    #[test]
    fn test_range_is_inclusive() {
        let orders = vec![order(1, 1000, PaymentStatus::Paid), order(31, 1000, PaymentStatus::Paid)];
        let summary = SalesSummary::from_orders(&orders, march(1), march(31)).unwrap();
        assert_eq!(summary.order_count, 2);
    }

    #[test]
    fn test_summary_overflow_is_an_error() {
        let half = Money::new(Decimal::MAX / dec!(2));
        let orders: Vec<Order> = (0..3)
            .map(|_| {
                let mut o = order(9, 0, PaymentStatus::Paid);
                o.total_amount = half;
                o
            })
            .collect();

        let err = SalesSummary::from_orders(&orders, march(1), march(31)).unwrap_err();
        assert!(matches!(err, CoreError::TotalOverflow(ref f) if f == "total_sales"));

        let err = daily_sales(&orders, march(1), march(31)).unwrap_err();
        assert!(matches!(err, CoreError::TotalOverflow(_)));
    }

    #[test]
    fn test_daily_sales_grouped_and_sorted() {
        let orders = vec![
            order(5, 1000, PaymentStatus::Paid),
            order(3, 2000, PaymentStatus::Paid),
            order(5, 500, PaymentStatus::Paid),
            order(4, 700, PaymentStatus::Refunded),
        ];

        let days = daily_sales(&orders, march(1), march(31)).unwrap();

        assert_eq!(
            days,
            vec![
                DailySales {
                    date: march(3),
                    sales: Money::from_minor(2000)
                },
                DailySales {
                    date: march(5),
                    sales: Money::from_minor(1500)
                },
            ]
        );
    }

    #[test]
    fn test_category_sales_with_fallback() {
        let categories = vec![category("c-mains", "Mains"), category("c-drinks", "Drinks")];
        let menu = vec![
            menu_item("koshari", Some("c-mains")),
            menu_item("tea", Some("c-drinks")),
            menu_item("bread", None),
            menu_item("old", Some("c-deleted")),
        ];
        let items = vec![
            order_item("koshari", 90),
            order_item("tea", 15),
            order_item("koshari", 45),
            order_item("bread", 5),
            order_item("old", 10),
            order_item("gone", 3),
        ];

        let sales = category_sales(&items, &menu, &categories).unwrap();

        assert_eq!(
            sales,
            vec![
                CategorySales {
                    name: "Mains".to_string(),
                    sales: Money::from_major(135)
                },
                CategorySales {
                    name: "Uncategorized".to_string(),
                    sales: Money::from_major(18)
                },
                CategorySales {
                    name: "Drinks".to_string(),
                    sales: Money::from_major(15)
                },
            ]
        );
    }

    #[test]
    fn test_category_sales_ties_by_name() {
        let categories = vec![category("b", "Breakfast"), category("a", "Desserts")];
        let menu = vec![menu_item("x", Some("a")), menu_item("y", Some("b"))];
        let items = vec![order_item("x", 10), order_item("y", 10)];

        let names: Vec<String> = category_sales(&items, &menu, &categories)
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Breakfast", "Desserts"]);
    }

    #[test]
    fn test_dashboard_stats() {
        let orders = vec![
            order(7, 12400, PaymentStatus::Paid),
            order(7, 5000, PaymentStatus::Pending),
            order(7, 2480, PaymentStatus::Paid),
        ];
        let stock = |current, min| InventoryItem {
            id: "inv".to_string(),
            name: "Rice".to_string(),
            name_ar: None,
            unit: "kg".to_string(),
            current_stock: current,
            min_stock_level: min,
            reorder_point: dec!(0),
            unit_cost: Money::zero(),
            created_at: Utc::now(),
        };
        let inventory = vec![stock(dec!(2), dec!(5)), stock(dec!(50), dec!(5)), stock(dec!(5), dec!(5))];

        let stats = dashboard_stats(&orders, &inventory).unwrap();

        assert_eq!(stats.today_revenue, Money::new(dec!(148.80)));
        assert_eq!(stats.today_order_count, 3);
        assert_eq!(stats.low_stock_count, 2);
    }
}
