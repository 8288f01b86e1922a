use clap::Args;
use storefront_app::{
    database::{self, Db},
    domain::orders::{OrdersService, PgOrdersService, records::OrderUuid, status::OrderStatus},
    identity::{Identity, UserUuid},
};
use uuid::Uuid;

#[derive(Debug, Args)]
pub(crate) struct SetStatusArgs {
    /// Order UUID
    #[arg(long)]
    order_uuid: Uuid,

    /// Target status: processing, shipped, delivered or cancelled
    #[arg(long)]
    status: OrderStatus,

    /// Administrator the change is recorded against
    #[arg(long, env = "STOREFRONT_OPERATOR_UUID")]
    operator_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

pub(crate) async fn run(args: SetStatusArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgOrdersService::new(Db::new(pool));
    let operator = Identity::admin(UserUuid::from_uuid(args.operator_uuid));

    let order = service
        .set_order_status(
            Some(operator),
            OrderUuid::from_uuid(args.order_uuid),
            args.status,
        )
        .await
        .map_err(|error| format!("failed to update order: {error}"))?;

    println!("order_uuid: {}", order.uuid);
    println!("status: {}", order.status);
    println!("updated_at: {}", order.updated_at);

    Ok(())
}
