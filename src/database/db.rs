use mongodb::bson::doc;
use mongodb::{Client, Database, options::ClientOptions};

use crate::config::AppConfig;
use crate::utils::error::CustomError;

/// Open the client, ping the server and hand back the blog database.
pub async fn connect_to_mongo(config: &AppConfig) -> Result<Database, CustomError> {
    let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;
    client_options.app_name = Some("blog_web".to_string());

    let client = Client::with_options(client_options)?;
    let database = client.database(&config.database);

    database.run_command(doc! { "ping": 1 }).await?;
    log::info!("Connected successfully to MongoDB database {}", config.database);

    Ok(database)
}
