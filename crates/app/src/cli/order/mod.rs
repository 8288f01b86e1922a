use clap::{Args, Subcommand};

mod set_status;

#[derive(Debug, Args)]
pub(crate) struct OrderCommand {
    #[command(subcommand)]
    command: OrderSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrderSubcommand {
    /// Move an order to its next fulfillment status
    SetStatus(set_status::SetStatusArgs),
}

pub(crate) async fn run(command: OrderCommand) -> Result<(), String> {
    match command.command {
        OrderSubcommand::SetStatus(args) => set_status::run(args).await,
    }
}
