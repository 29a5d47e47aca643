use super::model::{CellValue, Row, Table};

/// Columns of the synthetic dataset, in order.
pub const DEMO_COLUMNS: [&str; 6] = ["id", "transit_depth", "snr", "period", "planet_radius", "label"];

/// Seeded sampler for the demo data (SplitMix64 stream).
pub struct DemoSampler {
    state: u64,
}

impl DemoSampler {
    pub fn new(seed: u64) -> Self {
        DemoSampler { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[lo, hi)`.
    pub fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        let unit = (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64;
        lo + (hi - lo) * unit
    }

    /// `true` with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform(0.0, 1.0) < p
    }

    /// Normal sample (Box-Muller, cosine branch).
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.uniform(f64::MIN_POSITIVE, 1.0);
        let u2 = self.uniform(0.0, 1.0);
        mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

/// One synthetic transit measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoRecord {
    pub id: i64,
    pub transit_depth: f64,
    pub snr: f64,
    pub period: f64,
    pub planet_radius: f64,
    pub label: i64,
}

/// Generate `n` records: roughly a third are planets with deep,
/// high-SNR transits, the rest are shallow noisy signals.
pub fn demo_records(n: usize, seed: u64) -> Vec<DemoRecord> {
    let mut rng = DemoSampler::new(seed);
    (0..n)
        .map(|i| {
            let planet = rng.chance(0.35);
            let (depth, snr) = if planet {
                (rng.normal(1200.0, 350.0), rng.normal(18.0, 5.0))
            } else {
                (rng.normal(250.0, 150.0), rng.normal(6.0, 2.5))
            };
            let transit_depth = depth.max(5.0);
            DemoRecord {
                id: i as i64 + 1,
                transit_depth,
                snr: snr.max(0.5),
                period: rng.uniform(0.5, 60.5),
                // Rp/R* ≈ sqrt(depth); scaled to Earth radii for a Sun-like star.
                planet_radius: (transit_depth * 1e-6).sqrt() * 109.1 * rng.normal(1.0, 0.05),
                label: i64::from(planet),
            }
        })
        .collect()
}

/// The demo dataset as a [`Table`].
pub fn demo_table(n: usize, seed: u64) -> Table {
    let rows = demo_records(n, seed)
        .into_iter()
        .map(|r| {
            Row::from_iter([
                ("id", CellValue::Integer(r.id)),
                ("transit_depth", CellValue::Float(r.transit_depth)),
                ("snr", CellValue::Float(r.snr)),
                ("period", CellValue::Float(r.period)),
                ("planet_radius", CellValue::Float(r.planet_radius)),
                ("label", CellValue::Integer(r.label)),
            ])
        })
        .collect();
    Table::from_rows(DEMO_COLUMNS.iter().map(|c| c.to_string()).collect(), rows)
}
