use clap::Args;
use eshopper_app::domain::customers::{CustomersService, PgCustomersService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ShowCustomerArgs {
    /// Email address the customer registered with
    #[arg(long)]
    email: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ShowCustomerArgs) -> Result<(), String> {
    let service = PgCustomersService::new(args.database.connect().await?);

    let Some(customer) = service
        .find_by_email(&args.email)
        .await
        .map_err(|error| format!("failed to look up customer: {error}"))?
    else {
        println!("no customer registered as {}", args.email);
        return Ok(());
    };

    println!("customer_id: {}", customer.id);
    println!("name: {} {}", customer.first_name, customer.last_name);
    println!("email: {}", customer.email);
    println!("phone: {}", customer.phone);
    println!("address: {}", customer.address.as_deref().unwrap_or("none"));

    Ok(())
}
