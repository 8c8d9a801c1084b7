//! schema command - Print the action's input or output JSON Schema

use crate::action::schema::{input_schema, output_schema};
use crate::cli::args::SchemaKind;
use anyhow::Result;

/// Print a schema as pretty JSON on stdout.
pub fn schema(kind: SchemaKind) -> Result<()> {
    let value = match kind {
        SchemaKind::Input => input_schema(),
        SchemaKind::Output => output_schema(),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
