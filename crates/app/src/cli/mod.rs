use clap::{Args, Parser, Subcommand};
use eshopper_app::database::{self, Db};

mod category;
mod customer;
mod migrate;
mod product;

#[derive(Debug, Parser)]
#[command(name = "eshopper-app", about = "Eshopper admin CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),
    Category(category::CategoryCommand),
    Product(product::ProductCommand),
    Customer(customer::CustomerCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        match self.command {
            Commands::Migrate(args) => migrate::run(args).await,
            Commands::Category(command) => category::run(command).await,
            Commands::Product(command) => product::run(command).await,
            Commands::Customer(command) => customer::run(command).await,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct DatabaseArgs {
    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: String,
}

impl DatabaseArgs {
    pub(crate) async fn connect(&self) -> Result<Db, String> {
        database::connect(&self.database_url)
            .await
            .map(Db::new)
            .map_err(|error| format!("failed to connect to database: {error}"))
    }
}
