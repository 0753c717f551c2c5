use crate::utils::print_cargo_message;
use anyhow::Context;
use clap::Parser;
use neuron_lut::{TableParams, serialize};
use std::{fs::File, io::BufReader, path::PathBuf, time::Instant};

/// Tables above this size are refused unless `--max-entries` is raised.
pub const DEFAULT_MAX_ENTRIES: usize = 1 << 24;

#[derive(Parser)]
#[command(name = "generate", about = "Precompute a lookup table and save it as JSON")]
pub struct GenerateCmd {
    /// Number of inputs to the neuron
    #[arg(long, default_value_t = 2, allow_hyphen_values = true)]
    num_inputs: i64,
    /// Bits per input; each input ranges over 0..2^bits
    #[arg(long, default_value_t = 2, allow_hyphen_values = true)]
    input_bit_depth: i64,
    /// Operation to precompute
    #[arg(long, default_value = "multiply")]
    operation: String,
    /// JSON file with `num_inputs`, `input_bit_depth` and `operation`.
    /// Replaces the three flags above when given
    #[arg(long)]
    params: Option<PathBuf>,
    /// Path of the table to write
    #[arg(short, long, default_value = "sample_database.json")]
    out: PathBuf,
    /// Refuse to build tables with more entries than this
    #[arg(long, default_value_t = DEFAULT_MAX_ENTRIES)]
    max_entries: usize,
}

impl GenerateCmd {
    pub fn run(self) -> anyhow::Result<()> {
        let params = self.table_params()?;
        print_cargo_message(
            "Generating",
            format_args!(
                "table with num_inputs={}, input_bit_depth={}, operation='{}'",
                params.num_inputs, params.input_bit_depth, params.operation
            ),
        );
        params
            .ensure_within(self.max_entries)
            .with_context(|| format!("table exceeds --max-entries {}", self.max_entries))?;

        let start = Instant::now();
        let table = params.build().context("failed to build table")?;
        let serialized = serialize(&table);
        print_cargo_message(
            "Converted",
            format_args!("{} tuple keys to string keys", serialized.len()),
        );

        serialized
            .save(&self.out)
            .with_context(|| format!("failed to save table to {}", self.out.display()))?;
        print_cargo_message(
            "Saved",
            format_args!(
                "{} in {:.2}s",
                self.out.display(),
                start.elapsed().as_secs_f32()
            ),
        );
        Ok(())
    }

    fn table_params(&self) -> anyhow::Result<TableParams> {
        let Some(path) = self.params.as_ref() else {
            return TableParams::new(self.num_inputs, self.input_bit_depth, &self.operation)
                .context("invalid table parameters");
        };
        tracing::info!("Loading params file: {:?}", path);
        let file = File::open(path).context(format!("failed to read {}", path.display()))?;
        let value: serde_json::Value = serde_json::from_reader(BufReader::new(file))
            .context(format!("failed to parse {}", path.display()))?;
        TableParams::from_json_value(&value)
            .context(format!("invalid table parameters in {}", path.display()))
    }
}
