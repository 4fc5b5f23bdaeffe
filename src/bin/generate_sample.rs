use anyhow::{Context, Result};

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const OUTPUT_PATH: &str = "adult.csv";
const ROWS_PER_LEVEL: usize = 120;

/// Education labels with their ordinal `education.num` value.
const EDUCATIONS: [(&str, u8); 16] = [
    ("Preschool", 1),
    ("1st-4th", 2),
    ("5th-6th", 3),
    ("7th-8th", 4),
    ("9th", 5),
    ("10th", 6),
    ("11th", 7),
    ("12th", 8),
    ("HS-grad", 9),
    ("Some-college", 10),
    ("Assoc-voc", 11),
    ("Assoc-acdm", 12),
    ("Bachelors", 13),
    ("Masters", 14),
    ("Prof-school", 15),
    ("Doctorate", 16),
];

const WORKCLASSES: [&str; 6] = [
    "Private",
    "Self-emp-not-inc",
    "Self-emp-inc",
    "Local-gov",
    "State-gov",
    "Federal-gov",
];

const MARITAL_STATUSES: [&str; 5] = [
    "Never-married",
    "Married-civ-spouse",
    "Divorced",
    "Separated",
    "Widowed",
];

const OCCUPATIONS: [&str; 8] = [
    "Prof-specialty",
    "Craft-repair",
    "Exec-managerial",
    "Adm-clerical",
    "Sales",
    "Machine-op-inspct",
    "Transport-moving",
    "Farming-fishing",
];

const RELATIONSHIPS: [&str; 6] = [
    "Husband",
    "Wife",
    "Own-child",
    "Not-in-family",
    "Unmarried",
    "Other-relative",
];

const RACES: [&str; 5] = [
    "White",
    "Black",
    "Asian-Pac-Islander",
    "Amer-Indian-Eskimo",
    "Other",
];

const SEXES: [&str; 2] = ["Male", "Female"];

const COUNTRIES: [&str; 8] = [
    "United-States",
    "Mexico",
    "Philippines",
    "Germany",
    "Canada",
    "India",
    "England",
    "Cuba",
];

fn maybe_missing<'a>(rng: &mut SimpleRng, items: &'a [&'a str], missing_rate: f64) -> &'a str {
    if rng.next_f64() < missing_rate {
        "?"
    } else {
        rng.pick(items)
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;
    writer.write_record([
        "age",
        "workclass",
        "fnlwgt",
        "education",
        "education.num",
        "marital.status",
        "occupation",
        "relationship",
        "race",
        "sex",
        "capital.gain",
        "capital.loss",
        "hours.per.week",
        "native.country",
        "income",
    ])?;

    let mut rows = 0usize;
    for (education, education_num) in EDUCATIONS {
        for _ in 0..ROWS_PER_LEVEL {
            let age = rng.gauss(39.0, 13.0).clamp(17.0, 90.0) as u32;
            let fnlwgt = 20_000 + (rng.next_f64() * 400_000.0) as u64;
            let hours = rng.gauss(40.0, 10.0).clamp(1.0, 99.0) as u32;

            let capital_gain = if rng.next_f64() < 0.08 {
                (rng.next_f64() * 15_000.0) as u32
            } else {
                0
            };
            let capital_loss = if rng.next_f64() < 0.04 {
                (rng.next_f64() * 2_500.0) as u32
            } else {
                0
            };

            // Upper bracket gets likelier with education, matching the
            // relationship the dashboard is meant to show.
            let p_high = 0.05 + 0.55 * f64::from(education_num - 1) / 15.0;
            let income = if rng.next_f64() < p_high {
                ">50K"
            } else {
                "<=50K"
            };

            writer.write_record([
                age.to_string(),
                maybe_missing(&mut rng, &WORKCLASSES, 0.056).to_string(),
                fnlwgt.to_string(),
                education.to_string(),
                education_num.to_string(),
                rng.pick(&MARITAL_STATUSES).to_string(),
                maybe_missing(&mut rng, &OCCUPATIONS, 0.057).to_string(),
                rng.pick(&RELATIONSHIPS).to_string(),
                rng.pick(&RACES).to_string(),
                rng.pick(&SEXES).to_string(),
                capital_gain.to_string(),
                capital_loss.to_string(),
                hours.to_string(),
                maybe_missing(&mut rng, &COUNTRIES, 0.018).to_string(),
                income.to_string(),
            ])?;
            rows += 1;
        }
    }

    writer.flush().context("flushing output")?;
    println!("Wrote {rows} census records to {OUTPUT_PATH}");
    Ok(())
}
