//! Test helpers.

use std::sync::Arc;

use jiff::Timestamp;
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use storefront_app::{
    context::AppContext,
    domain::{
        carts::{
            MockCartsService,
            models::{Cart, CartLine, ProductSnapshot},
        },
        catalog::records::ProductUuid,
        checkout::MockCheckoutService,
        orders::{
            MockOrdersService,
            models::Order,
            records::{OrderItemRecord, OrderItemUuid, OrderUuid},
            status::OrderStatus,
        },
    },
    identity::{Identity, UserUuid},
};

use crate::{extensions::*, identity::IdentityHeaders, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());

pub(crate) const TEST_ADMIN_UUID: UserUuid = UserUuid::from_uuid(Uuid::from_u128(1));

#[salvo::handler]
pub(crate) async fn inject_customer(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity::customer(TEST_USER_UUID));
    ctrl.call_next(req, depot, res).await;
}

#[salvo::handler]
pub(crate) async fn inject_admin(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_identity(Identity::admin(TEST_ADMIN_UUID));
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn customer() -> Option<Identity> {
    Some(Identity::customer(TEST_USER_UUID))
}

pub(crate) fn admin() -> Option<Identity> {
    Some(Identity::admin(TEST_ADMIN_UUID))
}

pub(crate) fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_get_cart().never();
    carts.expect_add_item().never();
    carts.expect_set_quantity().never();
    carts.expect_remove_item().never();
    carts.expect_clear().never();

    carts
}

pub(crate) fn strict_checkout_mock() -> MockCheckoutService {
    let mut checkout = MockCheckoutService::new();

    checkout.expect_checkout().never();

    checkout
}

pub(crate) fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_get_order().never();
    orders.expect_list_orders().never();
    orders.expect_list_all_orders().never();
    orders.expect_set_order_status().never();
    orders.expect_cancel_order().never();

    orders
}

pub(crate) fn state_with(
    carts: MockCartsService,
    checkout: MockCheckoutService,
    orders: MockOrdersService,
) -> Arc<State> {
    State::from_app_context(
        AppContext {
            carts: Arc::new(carts),
            checkout: Arc::new(checkout),
            orders: Arc::new(orders),
        },
        IdentityHeaders::default(),
    )
}

pub(crate) fn strict_state() -> Arc<State> {
    state_with(
        strict_carts_mock(),
        strict_checkout_mock(),
        strict_orders_mock(),
    )
}

fn service(state: Arc<State>, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state))
            .hoop(inject_customer)
            .push(route),
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    service(
        state_with(carts, strict_checkout_mock(), strict_orders_mock()),
        route,
    )
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    service(
        state_with(strict_carts_mock(), checkout, strict_orders_mock()),
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    service(
        state_with(strict_carts_mock(), strict_checkout_mock(), orders),
        route,
    )
}

/// Like [`orders_service`], with the caller holding the admin capability.
pub(crate) fn admin_orders_service(orders: MockOrdersService, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(state_with(
                strict_carts_mock(),
                strict_checkout_mock(),
                orders,
            )))
            .hoop(inject_admin)
            .push(route),
    )
}

/// Routes without any identity injected.
pub(crate) fn anonymous_service(state: Arc<State>, route: Router) -> Service {
    Service::new(Router::new().hoop(inject(state)).push(route))
}

pub(crate) fn make_cart(lines: Vec<CartLine>) -> Cart {
    Cart {
        user_uuid: TEST_USER_UUID,
        lines,
    }
}

pub(crate) fn make_line(product: ProductUuid, quantity: u32, unit_price: u64) -> CartLine {
    CartLine {
        product_uuid: product,
        quantity,
        product: Some(ProductSnapshot {
            name: "Tea".to_string(),
            unit_price,
            image_url: None,
            stock_quantity: 10,
        }),
        available: true,
        added_at: Timestamp::UNIX_EPOCH,
    }
}

pub(crate) fn make_order(uuid: OrderUuid, status: OrderStatus) -> Order {
    let product = ProductUuid::new();

    Order {
        uuid,
        user_uuid: TEST_USER_UUID,
        subtotal: 20_00,
        shipping_fee: 9_99,
        total_amount: 29_99,
        status,
        shipping_address: "1 Main St".to_string(),
        items: vec![OrderItemRecord {
            uuid: OrderItemUuid::new(),
            order_uuid: uuid,
            product_uuid: product,
            quantity: 2,
            unit_price: 10_00,
            position: 0,
            created_at: Timestamp::UNIX_EPOCH,
        }],
        created_at: Timestamp::UNIX_EPOCH,
        updated_at: Timestamp::UNIX_EPOCH,
    }
}
