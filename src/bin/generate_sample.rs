use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
use parquet::arrow::ArrowWriter;

const ROWS: usize = 200;

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One synthetic customer record covering every column shape the viewer
/// distinguishes: continuous numbers, numeric flags, labels, dates, gaps.
struct Record {
    customer_id: i64,
    age: f64,
    plan: &'static str,
    churned: i64,
    signup_date: String,
    monthly_spend: Option<f64>,
    city: &'static str,
}

fn generate(rng: &mut SimpleRng) -> Vec<Record> {
    let plans = ["basic", "standard", "premium"];
    let cities = ["Seoul", "Busan", "Incheon", "Daegu", "Gwangju"];
    let epoch = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default();

    (0..ROWS)
        .map(|i| {
            let plan = rng.pick(&plans);
            let base_spend = match plan {
                "basic" => 15.0,
                "standard" => 35.0,
                _ => 70.0,
            };
            let days = (rng.next_f64() * 365.0) as i64;
            Record {
                customer_id: 1000 + i as i64,
                age: rng.gauss(38.0, 11.0).clamp(18.0, 80.0).round(),
                plan,
                churned: i64::from(rng.next_f64() < 0.25),
                signup_date: (epoch + Duration::days(days)).format("%Y-%m-%d").to_string(),
                // Roughly one in ten spend figures is missing.
                monthly_spend: (rng.next_f64() >= 0.1)
                    .then(|| (rng.gauss(base_spend, base_spend * 0.2) * 100.0).round() / 100.0),
                city: rng.pick(&cities),
            }
        })
        .collect()
}

fn write_csv(records: &[Record], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record([
        "customer_id",
        "age",
        "plan",
        "churned",
        "signup_date",
        "monthly_spend",
        "city",
    ])?;
    for r in records {
        writer.write_record([
            r.customer_id.to_string(),
            r.age.to_string(),
            r.plan.to_string(),
            r.churned.to_string(),
            r.signup_date.clone(),
            r.monthly_spend.map(|v| v.to_string()).unwrap_or_default(),
            r.city.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(records: &[Record], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("customer_id", DataType::Int64, false),
        Field::new("age", DataType::Float64, false),
        Field::new("plan", DataType::Utf8, false),
        Field::new("churned", DataType::Int64, false),
        Field::new("signup_date", DataType::Utf8, false),
        Field::new("monthly_spend", DataType::Float64, true),
        Field::new("city", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.customer_id))),
        Arc::new(Float64Array::from_iter_values(records.iter().map(|r| r.age))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.plan))),
        Arc::new(Int64Array::from_iter_values(records.iter().map(|r| r.churned))),
        Arc::new(StringArray::from_iter_values(
            records.iter().map(|r| r.signup_date.as_str()),
        )),
        Arc::new(Float64Array::from_iter(records.iter().map(|r| r.monthly_spend))),
        Arc::new(StringArray::from_iter_values(records.iter().map(|r| r.city))),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let records = generate(&mut rng);

    let csv_path = "sample_dataset.csv";
    let parquet_path = "sample_dataset.parquet";
    write_csv(&records, csv_path)?;
    write_parquet(&records, parquet_path)?;

    println!("Wrote {} rows to {csv_path} and {parquet_path}", records.len());
    Ok(())
}
