use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;

use transit_scout::data::demo::{DEMO_COLUMNS, DemoRecord, demo_records};

const ROWS: usize = 120;
const SEED: u64 = 42;

fn write_csv(path: &str, records: &[DemoRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(DEMO_COLUMNS)?;
    for r in records {
        writer.write_record([
            r.id.to_string(),
            format!("{:.2}", r.transit_depth),
            format!("{:.3}", r.snr),
            format!("{:.4}", r.period),
            format!("{:.3}", r.planet_radius),
            r.label.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn record_batch(records: &[DemoRecord]) -> Result<RecordBatch> {
    let float_column = |f: fn(&DemoRecord) -> f64| -> ArrayRef {
        Arc::new(Float64Array::from(records.iter().map(f).collect::<Vec<_>>()))
    };
    let int_column = |f: fn(&DemoRecord) -> i64| -> ArrayRef {
        Arc::new(Int64Array::from(records.iter().map(f).collect::<Vec<_>>()))
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int64, false),
        Field::new("transit_depth", DataType::Float64, false),
        Field::new("snr", DataType::Float64, false),
        Field::new("period", DataType::Float64, false),
        Field::new("planet_radius", DataType::Float64, false),
        Field::new("label", DataType::Int64, false),
    ]));

    RecordBatch::try_new(
        schema,
        vec![
            int_column(|r| r.id),
            float_column(|r| r.transit_depth),
            float_column(|r| r.snr),
            float_column(|r| r.period),
            float_column(|r| r.planet_radius),
            int_column(|r| r.label),
        ],
    )
    .context("building record batch")
}

fn write_parquet(path: &str, batch: &RecordBatch) -> Result<()> {
    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).context("creating writer")?;
    writer.write(batch).context("writing batch")?;
    writer.close().context("closing writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let records = demo_records(ROWS, SEED);

    write_csv("demo_exoplanets.csv", &records)?;

    let batch = record_batch(&records)?;
    write_parquet("demo_exoplanets.parquet", &batch)?;

    let head = batch.slice(0, batch.num_rows().min(5));
    println!("{}", pretty_format_batches(&[head])?);
    println!(
        "Wrote {} transit signals to demo_exoplanets.csv and demo_exoplanets.parquet",
        records.len()
    );
    Ok(())
}
