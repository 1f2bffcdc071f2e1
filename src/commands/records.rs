//! Single-record commands: `get`, `create`, `update`, `delete`

use super::{guarded_resource, Context};
use crate::api::{with_record, Record};
use crate::error::{Result, ReliefError};
use crate::views::table;
use serde_json::Value;

/// Parse a `--data` argument into a JSON object
///
/// # Errors
///
/// Returns [`ReliefError::InvalidInput`] for invalid JSON or a non-object
pub fn parse_body(data: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(data)
        .map_err(|e| ReliefError::InvalidInput(format!("--data is not valid JSON: {}", e)))?;
    if !value.is_object() {
        return Err(ReliefError::InvalidInput("--data must be a JSON object".to_string()).into());
    }
    Ok(value)
}

/// Print one record
pub async fn run_get(ctx: &Context, path: &str, id: u64) -> Result<()> {
    let resource = guarded_resource(path, &ctx.auth)?;
    let detail = with_record!(resource, R => {
        let record: R = ctx.api.get(id).await?;
        table::detail_table(&record).to_string()
    });
    println!("{}", detail);
    Ok(())
}

/// Create a record and print what the backend stored
pub async fn run_create(ctx: &Context, path: &str, data: &str) -> Result<u64> {
    let resource = guarded_resource(path, &ctx.auth)?;
    let body = parse_body(data)?;
    let (id, detail) = with_record!(resource, R => {
        let record: R = ctx.api.create(&body).await?;
        (record.id(), table::detail_table(&record).to_string())
    });
    tracing::info!("Created {} {}", resource, id);
    println!("Created {} {}\n{}", resource, id, detail);
    Ok(id)
}

/// Update a record and print what the backend stored
pub async fn run_update(ctx: &Context, path: &str, id: u64, data: &str) -> Result<()> {
    let resource = guarded_resource(path, &ctx.auth)?;
    let body = parse_body(data)?;
    let detail = with_record!(resource, R => {
        let record: R = ctx.api.update(id, &body).await?;
        table::detail_table(&record).to_string()
    });
    tracing::info!("Updated {} {}", resource, id);
    println!("Updated {} {}\n{}", resource, id, detail);
    Ok(())
}

/// Delete a record
pub async fn run_delete(ctx: &Context, path: &str, id: u64) -> Result<()> {
    let resource = guarded_resource(path, &ctx.auth)?;
    ctx.api.delete(resource, id).await?;
    tracing::info!("Deleted {} {}", resource, id);
    println!("Deleted {} {}", resource, id);
    Ok(())
}
