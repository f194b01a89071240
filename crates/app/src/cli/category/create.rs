use clap::Args;
use eshopper_app::domain::catalog::{CatalogService, PgCatalogService, data::NewCategory};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateCategoryArgs {
    /// Category display name
    #[arg(long)]
    name: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateCategoryArgs) -> Result<(), String> {
    let service = PgCatalogService::new(args.database.connect().await?);

    let category = service
        .create_category(NewCategory { name: args.name })
        .await
        .map_err(|error| format!("failed to create category: {error}"))?;

    println!("category_id: {}", category.id);
    println!("category_name: {}", category.name);

    Ok(())
}
