//! Wishlist commands. They operate on the wishlist saved in device storage.

use quickmart_core::{ProductId, Wishlist, WishlistEntry};
use quickmart_storefront::storage::StorageKey;

use super::{CliError, Context};

async fn load(ctx: &Context) -> Result<Wishlist, CliError> {
    Ok(ctx
        .storage()
        .load(StorageKey::Wishlist)
        .await?
        .unwrap_or_default())
}

fn entries(wishlist: &Wishlist) -> Vec<WishlistEntry> {
    wishlist.entries().cloned().collect()
}

pub async fn list(ctx: &Context) -> Result<Vec<WishlistEntry>, CliError> {
    Ok(entries(&load(ctx).await?))
}

pub async fn add(ctx: &Context, product_id: &str) -> Result<Vec<WishlistEntry>, CliError> {
    let product = ctx
        .catalog()
        .await?
        .product_by_id(&ProductId::new(product_id))
        .await?;
    let mut wishlist = load(ctx).await?;
    if wishlist.add(WishlistEntry::from(&product)) {
        ctx.storage().save(StorageKey::Wishlist, &wishlist).await?;
    } else {
        tracing::info!(product_id, "Already in wishlist");
    }
    Ok(entries(&wishlist))
}

pub async fn remove(ctx: &Context, product_id: &str) -> Result<Vec<WishlistEntry>, CliError> {
    let mut wishlist = load(ctx).await?;
    if wishlist.remove(&ProductId::new(product_id)) {
        ctx.storage().save(StorageKey::Wishlist, &wishlist).await?;
    } else {
        tracing::info!(product_id, "Not in wishlist");
    }
    Ok(entries(&wishlist))
}
