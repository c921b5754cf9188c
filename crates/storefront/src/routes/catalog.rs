//! Catalog route handlers.

use std::str::FromStr;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use quickmart_core::{
    CatalogFilters, CatalogQuery, Category, CategoryId, Price, PriceRange, Product, ProductId,
    SortKey,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub in_stock: Option<String>,
    pub sort: Option<String>,
}

impl SearchParams {
    fn into_query(self) -> Result<CatalogQuery> {
        let min = parse_price("min_price", self.min_price.as_deref())?;
        let max = parse_price("max_price", self.max_price.as_deref())?;
        let in_stock = parse_flag("in_stock", self.in_stock.as_deref())?;
        let price_range = match (min, max) {
            (None, None) => None,
            (min, max) => Some(PriceRange {
                min: min.unwrap_or(Price::ZERO),
                max: max.unwrap_or_else(|| Price::new(Decimal::MAX)),
            }),
        };

        Ok(CatalogQuery {
            text: self.q.map(|q| q.trim().to_string()).unwrap_or_default(),
            category: self
                .category
                .filter(|c| !c.is_empty())
                .map(CategoryId::new),
            filters: CatalogFilters {
                price_range,
                in_stock: in_stock.unwrap_or(false),
                sort_by: self
                    .sort
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .map(SortKey::parse),
            },
        })
    }
}

fn parse_price(name: &str, value: Option<&str>) -> Result<Option<Price>> {
    value
        .filter(|v| !v.is_empty())
        .map(|v| {
            Decimal::from_str(v)
                .map(Price::new)
                .map_err(|_| AppError::BadRequest(format!("{name} must be a number")))
        })
        .transpose()
}

fn parse_flag(name: &str, value: Option<&str>) -> Result<Option<bool>> {
    match value {
        None | Some("") => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(_) => Err(AppError::BadRequest(format!("{name} must be true or false"))),
    }
}

/// List categories.
#[instrument(skip(state))]
pub async fn categories(State(state): State<AppState>) -> Json<Vec<Category>> {
    Json(state.catalog().categories().await)
}

/// Products in one category.
#[instrument(skip(state))]
pub async fn category_products(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Json<Vec<Product>> {
    Json(
        state
            .catalog()
            .products_by_category(&CategoryId::new(id))
            .await,
    )
}

/// Search the catalog. Non-empty search text is added to the search history.
#[instrument(skip(state))]
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Product>>> {
    let query = params.into_query()?;
    if !query.text.is_empty() {
        state.history().record(&query.text).await;
    }
    Ok(Json(state.catalog().search(&query).await))
}

#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().featured_products().await)
}

#[instrument(skip(state))]
pub async fn trending(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().trending_products().await)
}

#[instrument(skip(state))]
pub async fn discounted(State(state): State<AppState>) -> Json<Vec<Product>> {
    Json(state.catalog().discounted_products().await)
}

/// Product detail.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<Product>> {
    let product = state.catalog().product_by_id(&ProductId::new(id)).await?;
    Ok(Json(product))
}
