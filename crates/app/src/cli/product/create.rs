use clap::Args;
use eshopper_app::domain::catalog::{
    CatalogService, PgCatalogService, data::NewProduct, records::CategoryId,
};

use crate::cli::DatabaseArgs;

#[derive(Debug, Args)]
pub(crate) struct CreateProductArgs {
    /// Product title, also used in cart keys
    #[arg(long)]
    title: String,

    #[arg(long)]
    material: String,

    #[arg(long)]
    description: Option<String>,

    /// Price in minor units
    #[arg(long)]
    price: u64,

    /// Id of an existing category
    #[arg(long)]
    category_id: i64,

    /// Stored image reference, e.g. `uploads/products/chair.jpg`
    #[arg(long)]
    image: String,

    #[command(flatten)]
    database: DatabaseArgs,
}

pub(crate) async fn run(args: CreateProductArgs) -> Result<(), String> {
    if args.title.trim().is_empty() {
        return Err("title cannot be empty".to_string());
    }

    let service = PgCatalogService::new(args.database.connect().await?);

    let product = service
        .create_product(NewProduct {
            title: args.title,
            material: args.material,
            description: args.description,
            price: args.price,
            category_id: CategoryId::from_i64(args.category_id),
            image: args.image,
        })
        .await
        .map_err(|error| format!("failed to create product: {error}"))?;

    println!("product_id: {}", product.id);
    println!("product_title: {}", product.title);
    println!("category: {}", product.category_name);
    println!("price: {}", product.price);

    Ok(())
}
