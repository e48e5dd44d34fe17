use anyhow::bail;
use chem_core::entities::CompoundEntry;
use chem_core::responses::{LeaderboardResponse, PredictResponse, ScanResponse, SubmitResponse};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;

/// Schema names accepted by `cclab schema`.
pub const TYPE_NAMES: [&str; 5] = ["compound-entry", "leaderboard", "predict", "scan", "submit"];

/// JSON Schema for one of [`TYPE_NAMES`].
pub fn schema(type_name: &str) -> anyhow::Result<serde_json::Value> {
    let schema = match type_name {
        "compound-entry" => schema_for!(CompoundEntry),
        "leaderboard" => schema_for!(LeaderboardResponse),
        "predict" => schema_for!(PredictResponse),
        "scan" => schema_for!(ScanResponse),
        "submit" => schema_for!(SubmitResponse),
        other => bail!(
            "unknown schema type '{other}' (expected one of: {})",
            TYPE_NAMES.join(", ")
        ),
    };
    Ok(serde_json::to_value(schema)?)
}

/// Handle `cclab schema`. Always prints JSON.
pub fn handle(args: &SchemaArgs, _flags: &GlobalFlags) -> anyhow::Result<()> {
    let schema = schema(&args.type_name)?;
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
