use anyhow::Context;
use clap::Parser;
use neuron_lut::{SerializedTable, deserialize};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inspect", about = "Summarize a saved lookup table")]
pub struct InspectCmd {
    /// Path to a table written by `generate`
    #[arg(long, default_value = "sample_database.json")]
    table: PathBuf,
}

impl InspectCmd {
    pub fn run(self) -> anyhow::Result<()> {
        let serialized = SerializedTable::load(&self.table)
            .with_context(|| format!("failed to load table {}", self.table.display()))?;
        let table = deserialize(&serialized).context("table has malformed entries")?;

        println!("Entries: {}", table.len());
        match table.shape() {
            Some(shape) => {
                println!("Inputs: {}", shape.num_inputs);
                println!("Input bit depth: {}", shape.input_bit_depth);
            }
            None => println!("Shape: not a complete enumeration"),
        }
        if let Some(max) = table.iter().map(|(_, result)| result).max() {
            println!("Largest result: {max}");
        }
        Ok(())
    }
}
