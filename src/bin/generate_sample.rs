//! Write `sample_people.csv`, a deterministic test sheet for the month filter.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len() as u64) as usize]
    }
}

/// A date somewhere in 1900..2025, rendered in one of several layouts, or a
/// blank / junk value now and then.
fn date_cell(rng: &mut SimpleRng, blank_chance: u64) -> Result<String> {
    let roll = rng.below(100);
    if roll < blank_chance {
        return Ok(String::new());
    }
    if roll < blank_chance + 3 {
        return Ok(rng.pick(&["unknown", "n/a", "?", "circa 1900"]).to_string());
    }

    let start = NaiveDate::from_ymd_opt(1900, 1, 1).context("start date")?;
    let date = start + Duration::days(rng.below(45_000) as i64);

    let text = match rng.below(5) {
        0 | 1 => date.format("%Y-%m-%d").to_string(),
        2 => date.format("%m/%d/%Y").to_string(),
        3 => date.format("%d %B %Y").to_string(),
        _ => date.format("%Y-%m-%d %H:%M:%S").to_string(),
    };
    Ok(text)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let first = ["Ada", "Bram", "Cleo", "Dov", "Edith", "Farid", "Greta", "Hugo"];
    let last = ["Moreau", "Okafor", "Lindqvist", "Tanaka", "Novak", "Reyes"];
    let notes = ["", "baptism", "emigrated", "married", "census entry"];

    let output_path = "sample_people.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record(["Name", "Birth", "Death", "Other", "Notes"])?;

    let n_rows = 200;
    for _ in 0..n_rows {
        let name = format!("{} {}", rng.pick(&first), rng.pick(&last));
        let birth = date_cell(&mut rng, 5)?;
        let death = date_cell(&mut rng, 40)?;
        let other = date_cell(&mut rng, 60)?;
        let note = rng.pick(&notes);
        writer.write_record([name.as_str(), birth.as_str(), death.as_str(), other.as_str(), note])?;
    }
    writer.flush()?;

    println!("Wrote {n_rows} people to {output_path}");
    Ok(())
}
