use biased_die::{AliasTable, WeightedKeys};
use std::collections::HashMap;

#[derive(Copy, Eq, PartialEq, Clone, Debug, Hash, WeightedKeys)]
enum Face {
    #[weight(1)]
    One,
    #[weight(1)]
    Two,
    #[weight(1)]
    Three,
    #[weight(1)]
    Four,
    #[weight(1)]
    Five,
    #[weight(5)]
    Six,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let die = Face::alias_table()?;
    let weather = AliasTable::from_probabilities([0.7, 0.2, 0.1])?;
    let labels = ["sun", "rain", "snow"];

    let mut rng = rand::rng();
    let mut faces: HashMap<Face, u64> = HashMap::default();
    let mut days: HashMap<usize, u64> = HashMap::default();
    for _ in 0..100_000 {
        *faces.entry(die.sample_owned(&mut rng)).or_default() += 1;
        *days.entry(*weather.sample(&mut rng)).or_default() += 1;
    }

    println!("Faces:");
    for (face, p) in die.iter() {
        let seen = faces.get(face).copied().unwrap_or(0);
        println!("{seen:>6} {face:?} (expected {:.3})", p);
    }

    println!("\nWeather:");
    let mut v: Vec<_> = days.into_iter().collect();
    v.sort_by(|a, b| b.1.cmp(&a.1));
    for (day, c) in v {
        println!("{c:>6} {}", labels[day]);
    }

    Ok(())
}
