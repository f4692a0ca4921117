use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const ROWS: usize = 1338;
const REGIONS: [&str; 4] = ["northeast", "northwest", "southeast", "southwest"];

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

struct Row {
    age: i64,
    sex: &'static str,
    bmi: f64,
    children: i64,
    smoker: &'static str,
    region: &'static str,
    charges: f64,
}

/// Charges grow with age; smokers pay a large premium that grows further
/// with BMI above 30.
fn generate_row(rng: &mut SimpleRng) -> Row {
    let age = 18 + rng.below(47) as i64;
    let sex = if rng.below(2) == 0 { "male" } else { "female" };
    let bmi = round_to(rng.gauss(30.6, 6.1).clamp(16.0, 53.0), 2);
    let children = rng.below(6) as i64;
    let smoker = rng.next_f64() < 0.2;
    let region = REGIONS[rng.below(REGIONS.len() as u64) as usize];

    let mut charges = 250.0 * age as f64 + 500.0 * children as f64 - 2000.0;
    if smoker {
        charges += 23000.0;
        if bmi > 30.0 {
            charges += 19000.0;
        }
    }
    charges = round_to(charges.max(1100.0) + rng.gauss(0.0, 1500.0).abs() * 3.0, 4);

    Row {
        age,
        sex,
        bmi,
        children,
        smoker: if smoker { "yes" } else { "no" },
        region,
        charges,
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    writer.write_record(["age", "sex", "bmi", "children", "smoker", "region", "charges"])?;
    for r in rows {
        writer.write_record([
            r.age.to_string(),
            r.sex.to_string(),
            r.bmi.to_string(),
            r.children.to_string(),
            r.smoker.to_string(),
            r.region.to_string(),
            r.charges.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("age", DataType::Int64, false),
        Field::new("sex", DataType::Utf8, false),
        Field::new("bmi", DataType::Float64, false),
        Field::new("children", DataType::Int64, false),
        Field::new("smoker", DataType::Utf8, false),
        Field::new("region", DataType::Utf8, false),
        Field::new("charges", DataType::Float64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.age))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.sex))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.bmi))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.children))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.smoker))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.region))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.charges))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows: Vec<Row> = (0..ROWS).map(|_| generate_row(&mut rng)).collect();

    write_csv(&rows, "insurance.csv")?;
    write_parquet(&rows, "insurance.parquet")?;

    println!("Wrote {} rows to insurance.csv and insurance.parquet", rows.len());
    Ok(())
}
