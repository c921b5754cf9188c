//! Cart commands. They operate on the cart saved in device storage.
//!
//! Unlike the storefront, a failed write is an error here: the write is the
//! whole point of the command.

use quickmart_core::{Cart, ProductId};
use quickmart_storefront::storage::StorageKey;
use quickmart_storefront::stores::CartSnapshot;

use super::{CliError, Context};

async fn load(ctx: &Context) -> Result<Cart, CliError> {
    Ok(ctx
        .storage()
        .load(StorageKey::Cart)
        .await?
        .unwrap_or_default())
}

async fn save(ctx: &Context, cart: &Cart) -> Result<CartSnapshot, CliError> {
    ctx.storage().save(StorageKey::Cart, cart).await?;
    Ok(CartSnapshot::from(cart))
}

pub async fn list(ctx: &Context) -> Result<CartSnapshot, CliError> {
    Ok(CartSnapshot::from(&load(ctx).await?))
}

/// Add one unit of a catalog product.
pub async fn add(ctx: &Context, product_id: &str) -> Result<CartSnapshot, CliError> {
    let product = ctx
        .catalog()
        .await?
        .product_by_id(&ProductId::new(product_id))
        .await?;
    let mut cart = load(ctx).await?;
    cart.add_product(&product);
    save(ctx, &cart).await
}

pub async fn set(ctx: &Context, product_id: &str, quantity: i64) -> Result<CartSnapshot, CliError> {
    let mut cart = load(ctx).await?;
    cart.update_quantity(&ProductId::new(product_id), quantity);
    save(ctx, &cart).await
}

pub async fn clear(ctx: &Context) -> Result<CartSnapshot, CliError> {
    let mut cart = load(ctx).await?;
    cart.clear();
    save(ctx, &cart).await
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use quickmart_storefront::storage::DeviceStorage;
    use quickmart_storefront::stores::CartStore;

    use super::*;
    use crate::commands::tests::memory_context;

    #[tokio::test]
    async fn test_cart_commands_persist() {
        let ctx = memory_context();
        add(&ctx, "1").await.unwrap();
        add(&ctx, "1").await.unwrap();

        let cart = list(&ctx).await.unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.totals.total_items, 2);

        let cart = set(&ctx, "1", 5).await.unwrap();
        assert_eq!(cart.items[0].quantity, 5);

        let cart = set(&ctx, "1", -1).await.unwrap();
        assert!(cart.items.is_empty());

        add(&ctx, "2").await.unwrap();
        assert!(clear(&ctx).await.unwrap().items.is_empty());
        assert!(list(&ctx).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_add_unknown_product_fails() {
        let ctx = memory_context();
        assert!(add(&ctx, "999").await.is_err());
        assert!(list(&ctx).await.unwrap().items.is_empty());
    }

    #[tokio::test]
    async fn test_storefront_reads_what_the_cli_wrote() {
        let ctx = memory_context();
        add(&ctx, "3").await.unwrap();
        set(&ctx, "3", 4).await.unwrap();

        let store = CartStore::load(ctx.storage().clone()).await;
        let snapshot = store.snapshot().await;
        assert_eq!(snapshot.items[0].id, ProductId::new("3"));
        assert_eq!(snapshot.totals.total_items, 4);
    }

    #[tokio::test]
    async fn test_failed_write_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // The temp file the write goes through cannot be created.
        std::fs::create_dir(dir.path().join(".cart.json.tmp")).unwrap();
        let ctx = Context::with_storage(DeviceStorage::file(dir.path()), None);

        let result = add(&ctx, "1").await;
        assert!(matches!(result, Err(CliError::Storage(_))));
        assert!(list(&ctx).await.unwrap().items.is_empty());
    }
}
