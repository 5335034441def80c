use crate::config::Config;
use schemars::schema_for;
use std::io::Write;

pub fn execute() -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    write_schema(&mut stdout.lock())
}

fn write_schema(out: &mut impl Write) -> anyhow::Result<()> {
    let schema = schema_for!(Config);
    serde_json::to_writer_pretty(&mut *out, &schema)?;
    writeln!(out)?;
    Ok(())
}
