#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::indexing_slicing)]

use plotters::prelude::*;
use primemap::{ChainedMap, MapError, OpenAddressingMap, hashing::std_hash};
use rand::Rng;

// Prime, so neither map rounds it
const TABLE_SIZE: usize = 10_007;
// Load factors from 0.05 to 0.95
const NUM_LOAD_FACTORS: usize = 19;

const METHODS: [&str; 2] = ["Quadratic Probing", "Separate Chaining"];

#[derive(Debug, Clone, Copy)]
struct ProbeStats {
    load: f64,
    average: f64,
    worst: usize,
}

fn summarize(load: f64, lengths: &[usize]) -> ProbeStats {
    let average = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    };
    let worst = lengths.iter().copied().max().unwrap_or(0);
    ProbeStats { load, average, worst }
}

// Lookups of every inserted key into a table that never grows
fn quadratic_probing(keys: &[String], load: f64) -> Result<ProbeStats, MapError> {
    let mut map = OpenAddressingMap::with_capacity_and_hasher(TABLE_SIZE, std_hash)?;
    for key in keys {
        map.put(key.clone(), ())?;
    }
    let lengths: Vec<usize> = keys.iter().map(|key| map.probe_length(key)).collect();
    Ok(summarize(load, &lengths))
}

fn separate_chaining(keys: &[String], load: f64) -> Result<ProbeStats, MapError> {
    let mut map = ChainedMap::with_capacity_and_hasher(TABLE_SIZE, std_hash)?;
    for key in keys {
        map.put(key.clone(), ())?;
    }
    let lengths: Vec<usize> = keys.iter().map(|key| map.probe_length(key)).collect();
    Ok(summarize(load, &lengths))
}

fn draw_chart(
    area: &DrawingArea<BitMapBackend<'_>, plotters::coord::Shift>,
    caption: &str,
    y_desc: &str,
    series: &[Vec<(f64, f64)>],
) -> Result<(), Box<dyn std::error::Error>> {
    let font_family = "sans-serif";
    let colors = [RGBColor(220, 50, 50), RGBColor(50, 90, 220)];

    let max_y =
        series.iter().flat_map(|points| points.iter().map(|&(_, y)| y)).fold(1.0, f64::max) * 1.1;

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (font_family, 30))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0.0..1.0, 0.0..max_y)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc(y_desc)
        .axis_desc_style((font_family, 16))
        .draw()?;

    for ((points, &method), color) in series.iter().zip(METHODS.iter()).zip(colors.iter()) {
        let line_style = ShapeStyle::from(color).stroke_width(2);
        chart
            .draw_series(LineSeries::new(points.iter().copied(), line_style))?
            .label(method)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));
        chart.draw_series(points.iter().map(|&point| Circle::new(point, 4, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.05 + (0.95 - 0.05) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    // Generate random keys up front so both maps see the same ones
    let mut rng = rand::rng();
    let keys: Vec<String> =
        (0..TABLE_SIZE).map(|_| format!("key-{}", rng.random::<u64>())).collect();

    let mut results: Vec<Vec<ProbeStats>> = vec![Vec::new(); METHODS.len()];
    for &load in &load_factors {
        let n_keys = ((TABLE_SIZE as f64) * load) as usize;
        let sample = keys.get(..n_keys).unwrap_or(keys.as_slice());
        println!("Testing with {n_keys} keys (load {load:.2})");

        // Past 0.5 the probing table would grow and the load would no longer be `load`
        if load < <OpenAddressingMap<()>>::MAX_LOAD {
            let stats = quadratic_probing(sample, load)?;
            println!(
                "  {}: Avg probes = {:.2}, Worst = {}",
                METHODS[0], stats.average, stats.worst
            );
            results[0].push(stats);
        }

        let stats = separate_chaining(sample, load)?;
        println!("  {}: Avg probes = {:.2}, Worst = {}", METHODS[1], stats.average, stats.worst);
        results[1].push(stats);
    }

    let averages: Vec<Vec<(f64, f64)>> = results
        .iter()
        .map(|stats| stats.iter().map(|s| (s.load, s.average)).collect())
        .collect();
    let worst: Vec<Vec<(f64, f64)>> = results
        .iter()
        .map(|stats| stats.iter().map(|s| (s.load, s.worst as f64)).collect())
        .collect();

    let root = BitMapBackend::new("probe_lengths.png", (1200, 1200)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));
    if let [top, bottom] = areas.as_slice() {
        draw_chart(top, "Average Successful Lookup", "Slots / nodes examined", &averages)?;
        draw_chart(bottom, "Worst-Case Successful Lookup", "Slots / nodes examined", &worst)?;
    }
    root.present()?;

    println!("Generated plot image: probe_lengths.png");

    Ok(())
}
