use serde::Deserialize;
use utoipa::IntoParams;

/// Optional filters for the listing browse page.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductQuery {
    /// Case-insensitive substring of the title or description.
    pub q: Option<String>,
    /// Exact category, case-insensitive.
    pub category: Option<String>,
}
