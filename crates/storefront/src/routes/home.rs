//! Home page: category menu, search, filters, and the product grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use food_store_core::catalog::{
    AvailabilityFilter, ProductQuery, ProductQueryParams, ProductSort, product_count_label,
};
use food_store_core::mappers::{category_from_dto, product_from_dto};
use food_store_core::models::{Category, Product};
use tracing::instrument;

use crate::error::AppError;
use crate::filters;
use crate::models::ProductView;
use crate::routes::page::Page;
use crate::state::AppState;

/// Section title when no category is selected.
pub const ALL_PRODUCTS_TITLE: &str = "Todos los Productos";

/// A category in the side menu.
#[derive(Clone)]
pub struct CategoryLink {
    pub id: i64,
    pub name: String,
    pub selected: bool,
}

/// An `<option>` of a filter select.
#[derive(Clone)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub page: Page,
    pub title: String,
    pub count_label: String,
    pub search: String,
    pub all_selected: bool,
    pub categories: Vec<CategoryLink>,
    pub products: Vec<ProductView>,
    pub availability_options: Vec<SelectOption>,
    pub sort_options: Vec<SelectOption>,
    /// Hidden field that keeps the category when the filter form is submitted.
    pub category_value: String,
    pub load_error: Option<String>,
}

/// Filtered, sorted products and the section title for a query.
#[must_use]
pub fn build_listing(
    categories: &[Category],
    products: &[Product],
    query: &ProductQuery,
) -> (String, Vec<Product>) {
    let title = query
        .category
        .map_or_else(
            || Some(ALL_PRODUCTS_TITLE.to_string()),
            |id| {
                categories
                    .iter()
                    .find(|c| c.id == id)
                    .map(|c| c.name.clone())
            },
        )
        .unwrap_or_else(|| "Productos".to_string());
    (title, query.apply(products))
}

fn availability_options(selected: AvailabilityFilter) -> Vec<SelectOption> {
    [
        (AvailabilityFilter::All, "Todos"),
        (AvailabilityFilter::Available, "Disponibles"),
        (AvailabilityFilter::Unavailable, "No disponibles"),
    ]
    .into_iter()
    .map(|(filter, label)| SelectOption {
        value: filter.as_str(),
        label,
        selected: filter == selected,
    })
    .collect()
}

fn sort_options(selected: Option<ProductSort>) -> Vec<SelectOption> {
    ProductSort::ALL
        .into_iter()
        .map(|sort| SelectOption {
            value: sort.as_str(),
            label: sort.label(),
            selected: Some(sort) == selected,
        })
        .collect()
}

/// Render the home page.
///
/// A backend failure still renders the page chrome with an error panel.
#[instrument(skip(state, page))]
pub async fn home(
    State(state): State<AppState>,
    page: Page,
    Query(params): Query<ProductQueryParams>,
) -> HomeTemplate {
    let query = ProductQuery::from_params(&params);
    let backend = state.backend();

    let (categories, products, load_error): (Vec<Category>, Vec<Product>, Option<String>) =
        match tokio::try_join!(backend.list_categories(), backend.list_products()) {
            Ok((categories, products)) => (
                categories.into_iter().map(category_from_dto).collect(),
                products
                    .into_iter()
                    .map(|dto| product_from_dto(dto, None))
                    .collect(),
                None,
            ),
            Err(e) => {
                tracing::warn!("Failed to load catalog: {e}");
                (Vec::new(), Vec::new(), Some(AppError::from(e).public_message()))
            }
        };

    let (title, listed) = build_listing(&categories, &products, &query);

    HomeTemplate {
        page,
        count_label: product_count_label(listed.len()),
        title,
        search: params.q.clone().unwrap_or_default(),
        all_selected: query.category.is_none(),
        categories: categories
            .iter()
            .map(|c| CategoryLink {
                id: c.id.as_i64(),
                name: c.name.clone(),
                selected: query.category == Some(c.id),
            })
            .collect(),
        products: listed.iter().map(ProductView::new).collect(),
        availability_options: availability_options(query.availability),
        sort_options: sort_options(query.sort),
        category_value: query
            .category
            .map(|id| id.to_string())
            .unwrap_or_default(),
        load_error,
    }
}
