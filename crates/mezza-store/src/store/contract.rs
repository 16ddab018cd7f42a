//! Behaviour every `DataStore` must share. Each implementation's test
//! module runs these against a fresh store.

use chrono::{DateTime, Duration, TimeZone, Utc};
use mezza_core::{
    Category, EtaSubmissionStatus, InventoryItem, InventoryMovement, MenuItem, Money,
    MovementType, Order, OrderItem, OrderStatus, OrderType, PaymentMethod, PaymentStatus,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::{DataStore, MenuFilter, OrderFilter};
use crate::error::StoreError;

// =============================================================================
// Fixtures
// =============================================================================

pub fn menu_item(id: &str, name: &str, category: Option<&str>, available: bool) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        category_id: category.map(str::to_string),
        name: name.to_string(),
        name_ar: None,
        sku: None,
        price: Money::from_major(50),
        is_available: available,
        created_at: Utc::now(),
    }
}

pub fn order(id: &str, created_at: DateTime<Utc>, payment_status: PaymentStatus) -> Order {
    Order {
        id: id.to_string(),
        order_number: format!("ORD-{}", id),
        order_type: OrderType::Takeaway,
        table_number: None,
        status: OrderStatus::Pending,
        subtotal: Money::from_major(100),
        discount_amount: Money::zero(),
        vat_amount: Money::from_major(14),
        service_charge: Money::from_major(10),
        total_amount: Money::from_major(124),
        payment_method: None,
        payment_status,
        eta_submission_status: EtaSubmissionStatus::Pending,
        notes: None,
        created_at,
        updated_at: created_at,
    }
}

pub fn order_item(id: &str, order_id: &str) -> OrderItem {
    OrderItem {
        id: id.to_string(),
        order_id: order_id.to_string(),
        menu_item_id: "m1".to_string(),
        name_snapshot: "Koshari".to_string(),
        quantity: 1,
        unit_price: Money::from_major(100),
        total_price: Money::from_major(100),
        vat_amount: Money::from_major(14),
        created_at: Utc::now(),
    }
}

pub fn category(id: &str, name: &str, sort_order: i64) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        name_ar: None,
        sort_order,
        is_active: true,
        created_at: Utc::now(),
    }
}

pub fn inventory_item(id: &str, name: &str, stock: Decimal, min: Decimal) -> InventoryItem {
    InventoryItem {
        id: id.to_string(),
        name: name.to_string(),
        name_ar: None,
        unit: "kg".to_string(),
        current_stock: stock,
        min_stock_level: min,
        reorder_point: min,
        unit_cost: Money::from_major(30),
        created_at: Utc::now(),
    }
}

fn movement(item_id: &str, kind: MovementType, qty: Decimal) -> InventoryMovement {
    InventoryMovement::manual(item_id, kind, qty, Uuid::new_v4(), Utc::now())
        .expect("valid movement")
}

// =============================================================================
// Menu
// =============================================================================

pub async fn menu_crud<S: DataStore>(store: &S) {
    let mut item = menu_item("m1", "Koshari", None, true);

    store.insert_menu_item(&item).await.unwrap();
    assert!(matches!(
        store.insert_menu_item(&item).await,
        Err(StoreError::Duplicate { .. })
    ));
    assert_eq!(store.get_menu_item("m1").await.unwrap(), item);

    item.price = Money::from_major(60);
    store.update_menu_item(&item).await.unwrap();
    assert_eq!(
        store.get_menu_item("m1").await.unwrap().price,
        Money::from_major(60)
    );

    let ghost = menu_item("nope", "Ghost", None, true);
    assert!(matches!(
        store.update_menu_item(&ghost).await,
        Err(StoreError::NotFound { .. })
    ));

    store.delete_menu_item("m1").await.unwrap();
    assert!(matches!(
        store.get_menu_item("m1").await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(store.delete_menu_item("m1").await.is_err());
}

pub async fn menu_filter_and_order<S: DataStore>(store: &S) {
    store.insert_menu_item(&menu_item("1", "Tea", Some("drinks"), true)).await.unwrap();
    store.insert_menu_item(&menu_item("2", "Fattah", Some("mains"), true)).await.unwrap();
    store.insert_menu_item(&menu_item("3", "Karkade", Some("drinks"), false)).await.unwrap();
    store.insert_menu_item(&menu_item("4", "Sahlab", Some("drinks"), true)).await.unwrap();

    let all = store.list_menu_items(&MenuFilter::default()).await.unwrap();
    let names: Vec<_> = all.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Fattah", "Karkade", "Sahlab", "Tea"]);

    let drinks = store
        .list_menu_items(&MenuFilter::for_register(Some("drinks")))
        .await
        .unwrap();
    let names: Vec<_> = drinks.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, ["Sahlab", "Tea"]);
}

pub async fn categories_sorted<S: DataStore>(store: &S) {
    store.insert_category(&category("c3", "Drinks", 3)).await.unwrap();
    store.insert_category(&category("c1", "Mains", 1)).await.unwrap();
    store.insert_category(&category("c2", "Desserts", 1)).await.unwrap();

    assert!(matches!(
        store.insert_category(&category("c1", "Again", 9)).await,
        Err(StoreError::Duplicate { .. })
    ));

    let names: Vec<String> = store
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Desserts", "Mains", "Drinks"]);
}

// =============================================================================
// Orders
// =============================================================================

pub async fn orders_filtered_newest_first<S: DataStore>(store: &S) {
    let base = Utc.with_ymd_and_hms(2026, 5, 1, 10, 0, 0).unwrap();

    store.insert_order(&order("a", base, PaymentStatus::Paid)).await.unwrap();
    store
        .insert_order(&order("b", base + Duration::days(1), PaymentStatus::Paid))
        .await
        .unwrap();
    store
        .insert_order(&order("c", base + Duration::days(2), PaymentStatus::Pending))
        .await
        .unwrap();
    store
        .insert_order(&order("d", base + Duration::days(5), PaymentStatus::Paid))
        .await
        .unwrap();

    let filter = OrderFilter {
        payment_status: Some(PaymentStatus::Paid),
        created_from: Some(base),
        created_before: Some(base + Duration::days(5)),
    };
    let ids: Vec<_> = store
        .list_orders(&filter)
        .await
        .unwrap()
        .into_iter()
        .map(|o| o.id)
        .collect();
    assert_eq!(ids, ["b", "a"]);

    let everything = store.list_orders(&OrderFilter::default()).await.unwrap();
    assert_eq!(everything.len(), 4);
    assert_eq!(everything[0].id, "d");
}

pub async fn order_round_trips_exactly<S: DataStore>(store: &S) {
    let mut o = order("o1", Utc::now(), PaymentStatus::Pending);
    o.table_number = Some("7".to_string());
    o.order_type = OrderType::DineIn;
    o.vat_amount = Money::new(dec!(6.3714));
    o.notes = Some("no onions".to_string());

    store.insert_order(&o).await.unwrap();
    assert_eq!(store.get_order("o1").await.unwrap(), o);
    assert!(matches!(
        store.insert_order(&o).await,
        Err(StoreError::Duplicate { .. })
    ));
}

pub async fn order_items_require_order<S: DataStore>(store: &S) {
    let result = store.insert_order_items(&[order_item("i1", "missing")]).await;
    assert!(matches!(result, Err(StoreError::NotFound { .. })));
    assert!(matches!(
        store.list_order_items("missing").await,
        Err(StoreError::NotFound { .. })
    ));
}

pub async fn order_items_batch_is_all_or_nothing<S: DataStore>(store: &S) {
    store.insert_order(&order("o1", Utc::now(), PaymentStatus::Pending)).await.unwrap();
    store.insert_order_items(&[order_item("i1", "o1")]).await.unwrap();

    let result = store
        .insert_order_items(&[order_item("i2", "o1"), order_item("i1", "o1")])
        .await;
    assert!(matches!(result, Err(StoreError::Duplicate { .. })));
    assert_eq!(store.list_order_items("o1").await.unwrap().len(), 1);
}

pub async fn order_items_duplicate_within_batch<S: DataStore>(store: &S) {
    store.insert_order(&order("o1", Utc::now(), PaymentStatus::Pending)).await.unwrap();

    let result = store
        .insert_order_items(&[
            order_item("i1", "o1"),
            order_item("i2", "o1"),
            order_item("i1", "o1"),
        ])
        .await;
    assert!(matches!(result, Err(StoreError::Duplicate { ref id, .. }) if id == "i1"));
    assert!(store.list_order_items("o1").await.unwrap().is_empty());
}

pub async fn order_items_keep_insert_order<S: DataStore>(store: &S) {
    store.insert_order(&order("o1", Utc::now(), PaymentStatus::Pending)).await.unwrap();
    store
        .insert_order_items(&[order_item("z", "o1"), order_item("a", "o1"), order_item("m", "o1")])
        .await
        .unwrap();

    let ids: Vec<String> = store
        .list_order_items("o1")
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.id)
        .collect();
    assert_eq!(ids, ["z", "a", "m"]);
}

pub async fn update_payment_marks_paid<S: DataStore>(store: &S) {
    let created = Utc::now();
    store.insert_order(&order("o1", created, PaymentStatus::Pending)).await.unwrap();

    let later = created + Duration::minutes(30);
    let partial = store
        .update_payment("o1", PaymentStatus::Partial, Some(PaymentMethod::Card), later)
        .await
        .unwrap();
    assert_eq!(partial.status, OrderStatus::Pending);
    assert_eq!(partial.payment_method, Some(PaymentMethod::Card));

    let updated = store
        .update_payment("o1", PaymentStatus::Paid, None, later)
        .await
        .unwrap();

    assert_eq!(updated.payment_status, PaymentStatus::Paid);
    assert_eq!(updated.status, OrderStatus::Paid);
    assert_eq!(updated.payment_method, Some(PaymentMethod::Card));
    assert_eq!(updated.updated_at, later);
    assert_eq!(store.get_order("o1").await.unwrap(), updated);

    assert!(matches!(
        store
            .update_payment("nope", PaymentStatus::Paid, None, later)
            .await,
        Err(StoreError::NotFound { .. })
    ));
}

pub async fn delete_order_removes_items<S: DataStore>(store: &S) {
    store.insert_order(&order("o1", Utc::now(), PaymentStatus::Pending)).await.unwrap();
    store.insert_order_items(&[order_item("i1", "o1")]).await.unwrap();

    store.delete_order("o1").await.unwrap();
    assert!(store.get_order("o1").await.is_err());
    assert!(store.list_order_items("o1").await.is_err());
    assert!(matches!(
        store.delete_order("o1").await,
        Err(StoreError::NotFound { .. })
    ));

    // The item ID is free again once its order is gone.
    store.insert_order(&order("o2", Utc::now(), PaymentStatus::Pending)).await.unwrap();
    store.insert_order_items(&[order_item("i1", "o2")]).await.unwrap();
}

// =============================================================================
// Inventory
// =============================================================================

pub async fn inventory_insert_and_list<S: DataStore>(store: &S) {
    let rice = inventory_item("inv-2", "Rice", dec!(25.5), dec!(10));
    store.insert_inventory_item(&rice).await.unwrap();
    store
        .insert_inventory_item(&inventory_item("inv-1", "Lentils", dec!(3), dec!(5)))
        .await
        .unwrap();

    assert!(matches!(
        store.insert_inventory_item(&rice).await,
        Err(StoreError::Duplicate { .. })
    ));
    assert_eq!(store.get_inventory_item("inv-2").await.unwrap(), rice);
    assert!(matches!(
        store.get_inventory_item("nope").await,
        Err(StoreError::NotFound { .. })
    ));

    let names: Vec<String> = store
        .list_inventory_items()
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.name)
        .collect();
    assert_eq!(names, ["Lentils", "Rice"]);
}

pub async fn stock_movement_updates_and_records<S: DataStore>(store: &S) {
    store
        .insert_inventory_item(&inventory_item("inv-1", "Flour", dec!(10), dec!(4)))
        .await
        .unwrap();

    let received = movement("inv-1", MovementType::In, dec!(2.5));
    let item = store.apply_stock_movement(&received).await.unwrap();
    assert_eq!(item.current_stock, dec!(12.5));

    let used = movement("inv-1", MovementType::Out, dec!(9));
    let item = store.apply_stock_movement(&used).await.unwrap();
    assert_eq!(item.current_stock, dec!(3.5));
    assert!(item.is_low_stock());
    assert_eq!(store.get_inventory_item("inv-1").await.unwrap(), item);

    let movements = store.list_inventory_movements("inv-1").await.unwrap();
    assert_eq!(movements, vec![received, used]);
    assert_eq!(movements[1].quantity, dec!(-9));
    assert_eq!(
        movements[1].reference_type.as_deref(),
        Some(mezza_core::inventory::MANUAL_ADJUSTMENT)
    );
}

pub async fn stock_movement_is_all_or_nothing<S: DataStore>(store: &S) {
    store
        .insert_inventory_item(&inventory_item("inv-1", "Flour", dec!(10), dec!(4)))
        .await
        .unwrap();

    let first = movement("inv-1", MovementType::In, dec!(1));
    store.apply_stock_movement(&first).await.unwrap();

    // Same movement ID again: nothing changes.
    let mut again = movement("inv-1", MovementType::In, dec!(5));
    again.id = first.id.clone();
    assert!(matches!(
        store.apply_stock_movement(&again).await,
        Err(StoreError::Duplicate { .. })
    ));
    assert_eq!(
        store.get_inventory_item("inv-1").await.unwrap().current_stock,
        dec!(11)
    );
    assert_eq!(store.list_inventory_movements("inv-1").await.unwrap().len(), 1);

    let orphan = movement("missing", MovementType::In, dec!(1));
    assert!(matches!(
        store.apply_stock_movement(&orphan).await,
        Err(StoreError::NotFound { .. })
    ));
    assert!(matches!(
        store.list_inventory_movements("missing").await,
        Err(StoreError::NotFound { .. })
    ));
}
