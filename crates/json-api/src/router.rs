//! App Router

use salvo::Router;

use crate::{carts, checkout, identity, orders};

/// Storefront routes. Every route runs behind the identity middleware.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(identity::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .delete(carts::clear::handler)
                .push(
                    Router::with_path("items")
                        .post(carts::items::create::handler)
                        .push(
                            Router::with_path("{product}")
                                .put(carts::items::update::handler)
                                .delete(carts::items::delete::handler),
                        ),
                ),
        )
        .push(Router::with_path("checkout").post(checkout::create::handler))
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("cancel").post(orders::cancel::handler))
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
        .push(Router::with_path("admin/orders").get(orders::all::handler))
}
