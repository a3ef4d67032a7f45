#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]

use plotters::prelude::*;
use primetable::{HashStrategy, ProbeKind, Table, TableError, TableExtensions};
use rand::Rng;

// Every table starts at this (prime) size and grows from there
const INITIAL_CAPACITY: usize = 11;
// Large enough that growth never falls back to trial division for these workloads
const SIEVE_BOUND: usize = 100_000;
const RANDOM_KEYS: usize = 500;
const BAR_WIDTH: f64 = 0.4;

const WORKLOADS: [&str; 2] = ["grid", "random"];

struct Measurement {
    workload: &'static str,
    hash: HashStrategy,
    probe: ProbeKind,
    // None when the probe walk ran out of slots
    collisions: Option<usize>,
}

// "i:j" keys for i in 0..10, j in 1..=10
fn grid_keys() -> Vec<String> {
    (0..10).flat_map(|i| (1..=10).map(move |j| format!("{i}:{j}"))).collect()
}

fn random_keys(rng: &mut impl Rng, count: usize) -> Vec<String> {
    (0..count)
        .map(|_| {
            let len = rng.random_range(3..=10);
            (0..len).map(|_| char::from(rng.random_range(b'a'..=b'z'))).collect::<String>()
        })
        .collect()
}

fn measure(hash: HashStrategy, probe: ProbeKind, keys: &[String]) -> Result<usize, TableError> {
    let mut table = Table::new(INITIAL_CAPACITY);
    table.set_hash(hash)?;
    table.set_probe(probe)?;
    table.make_sieve(SIEVE_BOUND);
    table.set_capacity(INITIAL_CAPACITY)?;

    for (index, key) in keys.iter().enumerate() {
        table.put(key.as_str(), index)?;
    }

    Ok(table.total_collisions())
}

fn draw_chart(measurements: &[Measurement], path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let combos: Vec<(HashStrategy, ProbeKind)> = HashStrategy::ALL
        .iter()
        .flat_map(|&hash| ProbeKind::ALL.iter().map(move |&probe| (hash, probe)))
        .collect();
    let labels: Vec<String> =
        combos.iter().map(|(hash, probe)| format!("{}/{}", hash.name(), probe.name())).collect();

    let max_collisions =
        measurements.iter().filter_map(|m| m.collisions).max().unwrap_or(1).max(1) as f64 * 1.1;

    let root = BitMapBackend::new(path, (1400, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Total lookup collisions by hash and probe strategy", ("sans-serif", 30))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5..(combos.len() as f64 - 0.5), 0.0..max_collisions)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(combos.len())
        .x_label_formatter(&|x| {
            if *x < 0.0 || (x - x.round()).abs() > f64::EPSILON {
                return String::new();
            }
            labels.get(x.round() as usize).cloned().unwrap_or_default()
        })
        .x_desc("Hash / probe")
        .y_desc("Collisions")
        .axis_desc_style(("sans-serif", 16))
        .draw()?;

    let colors = [RGBColor(50, 90, 220), RGBColor(220, 50, 50)];

    for (workload_idx, &workload) in WORKLOADS.iter().enumerate() {
        let color = colors[workload_idx % colors.len()];
        let offset = workload_idx as f64 * BAR_WIDTH - BAR_WIDTH;

        chart
            .draw_series(measurements.iter().filter(|m| m.workload == workload).filter_map(|m| {
                let position = combos.iter().position(|&combo| combo == (m.hash, m.probe))?;
                let collisions = m.collisions? as f64;
                let x = position as f64 + offset;
                Some(Rectangle::new([(x, 0.0), (x + BAR_WIDTH, collisions)], color.filled()))
            }))?
            .label(workload)
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperRight)
        .draw()?;

    root.present()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = rand::rng();
    let workloads = [grid_keys(), random_keys(&mut rng, RANDOM_KEYS)];

    let mut measurements = Vec::new();
    for (&workload, keys) in WORKLOADS.iter().zip(&workloads) {
        println!("Workload {workload}: {} keys", keys.len());

        for hash in HashStrategy::ALL {
            for probe in ProbeKind::ALL {
                let collisions = match measure(hash, probe, keys) {
                    Ok(collisions) => {
                        println!(
                            "  {:>13} / {:<11}: {collisions} collisions",
                            hash.name(),
                            probe.name()
                        );
                        Some(collisions)
                    }
                    Err(err) => {
                        println!("  {:>13} / {:<11}: {err}", hash.name(), probe.name());
                        None
                    }
                };
                measurements.push(Measurement { workload, hash, probe, collisions });
            }
        }
    }

    draw_chart(&measurements, "collision_report.png")?;
    println!("Generated collision_report.png");

    Ok(())
}
