use anyhow::Context;
use clap::Parser;
use neuron_lut::{InputTuple, SerializedTable, simulate};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "query", about = "Look up the precomputed result for some inputs")]
pub struct QueryCmd {
    /// Path to a table written by `generate`
    #[arg(long, default_value = "sample_database.json")]
    table: PathBuf,
    /// Input values, e.g. `1,1` or `(1, 1)`
    inputs: String,
}

impl QueryCmd {
    pub fn run(self) -> anyhow::Result<()> {
        println!("{}", self.resolve()?);
        Ok(())
    }

    fn resolve(&self) -> anyhow::Result<u64> {
        let inputs: InputTuple = self.inputs.parse().context("invalid inputs")?;
        let table = SerializedTable::load(&self.table)
            .with_context(|| format!("failed to load table {}", self.table.display()))?;
        tracing::debug!("querying {inputs} against {} entries", table.len());
        Ok(simulate(&table, &inputs)?)
    }
}
