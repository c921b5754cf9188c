//! Device storage commands.

use std::collections::BTreeMap;

use quickmart_storefront::storage::StorageKey;
use serde_json::Value;

use super::{CliError, Context};

/// Stored values by key. Values that are not JSON are shown as strings;
/// missing keys are `null`.
pub async fn show(
    ctx: &Context,
    key: Option<StorageKey>,
) -> Result<BTreeMap<&'static str, Value>, CliError> {
    let keys = key.map_or_else(|| StorageKey::ALL.to_vec(), |key| vec![key]);

    let mut values = BTreeMap::new();
    for key in keys {
        let value = ctx
            .storage()
            .get_raw(key)
            .await?
            .map_or(Value::Null, |raw| {
                serde_json::from_str(&raw).unwrap_or(Value::String(raw))
            });
        values.insert(key.as_str(), value);
    }
    Ok(values)
}

pub async fn clear(ctx: &Context, key: StorageKey) -> Result<(), CliError> {
    ctx.storage().remove(key).await?;
    Ok(())
}
