//! Writes the OpenAPI document of the marketplace API to stdout.

use utoipa::OpenApi;

use campus_market_api::routes::doc::ApiDoc;

fn main() -> anyhow::Result<()> {
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}
