use crate::{
    error::{AppError, AppResult},
    models::Product,
    routes::params::ProductQuery,
    state::AppState,
};

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

pub async fn list_products(state: &AppState, query: ProductQuery) -> AppResult<Vec<Product>> {
    let search = query
        .q
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let category = query
        .category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let products = state
        .store
        .list_products()
        .await
        .into_iter()
        .filter(|p| match &search {
            Some(term) => {
                contains_ignore_case(&p.title, term) || contains_ignore_case(&p.description, term)
            }
            None => true,
        })
        .filter(|p| category.is_none_or(|c| p.category.eq_ignore_ascii_case(c)))
        .collect();

    Ok(products)
}

pub async fn get_product(state: &AppState, id: i32) -> AppResult<Product> {
    state
        .store
        .get_product(id)
        .await
        .ok_or(AppError::NotFound("Product"))
}
