use clap::Args;
use eshopper_app::domain::catalog::{CatalogService, PgCatalogService};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct ListCategoriesArgs {
    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: ListCategoriesArgs) -> Result<(), String> {
    let service = PgCatalogService::new(args.database.connect().await?);

    let categories = service
        .list_categories()
        .await
        .map_err(|error| format!("failed to list categories: {error}"))?;

    if categories.is_empty() {
        println!("no categories found");
        return Ok(());
    }

    for category in categories {
        println!("{}\t{}", category.id, category.name);
    }

    Ok(())
}
