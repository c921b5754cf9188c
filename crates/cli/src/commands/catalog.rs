//! Catalog commands.

use std::str::FromStr;

use clap::Args;
use quickmart_core::{
    CatalogFilters, CatalogQuery, Category, CategoryId, Price, PriceRange, Product, ProductId,
    SortKey,
};
use rust_decimal::Decimal;

use super::{CliError, Context};

#[derive(Debug, Default, Args)]
pub struct SearchArgs {
    /// Text to match against names and descriptions
    #[arg(default_value = "")]
    pub query: String,

    /// Category id
    #[arg(short, long)]
    pub category: Option<String>,

    /// `price_low`, `price_high`, `newest` or `popularity`
    #[arg(short, long)]
    pub sort: Option<String>,

    /// Only products in stock
    #[arg(long)]
    pub in_stock: bool,

    /// Lowest price to include
    #[arg(long)]
    pub min_price: Option<String>,

    /// Highest price to include
    #[arg(long)]
    pub max_price: Option<String>,
}

impl SearchArgs {
    fn into_query(self) -> Result<CatalogQuery, CliError> {
        let min = parse_price("min price", self.min_price.as_deref())?;
        let max = parse_price("max price", self.max_price.as_deref())?;
        let price_range = (min.is_some() || max.is_some()).then(|| PriceRange {
            min: min.unwrap_or(Price::ZERO),
            max: max.unwrap_or_else(|| Price::new(Decimal::MAX)),
        });

        Ok(CatalogQuery {
            text: self.query.trim().to_string(),
            category: self.category.map(CategoryId::new),
            filters: CatalogFilters {
                price_range,
                in_stock: self.in_stock,
                sort_by: self.sort.as_deref().map(SortKey::parse),
            },
        })
    }
}

fn parse_price(what: &'static str, value: Option<&str>) -> Result<Option<Price>, CliError> {
    value
        .map(|v| {
            Decimal::from_str(v)
                .map(Price::new)
                .map_err(|_| CliError::InvalidArgument(what, v.to_string()))
        })
        .transpose()
}

pub async fn search(ctx: &Context, args: SearchArgs) -> Result<Vec<Product>, CliError> {
    let query = args.into_query()?;
    Ok(ctx.catalog().await?.search(&query).await)
}

pub async fn product(ctx: &Context, id: &str) -> Result<Product, CliError> {
    Ok(ctx.catalog().await?.product_by_id(&ProductId::new(id)).await?)
}

pub async fn categories(ctx: &Context) -> Result<Vec<Category>, CliError> {
    Ok(ctx.catalog().await?.categories().await)
}
