use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use surfsup::models::{Measurement, Station};
use surfsup::processors::IntegrityChecker;
use surfsup::query::{DateRange, QueryEngine};
use surfsup::store::DatasetStore;

// Create test data for benchmarking
fn create_test_dataset(station_count: usize, days: usize) -> (Vec<Station>, Vec<Measurement>) {
    let mut stations = Vec::with_capacity(station_count);
    let mut measurements = Vec::with_capacity(station_count * days);

    for station_idx in 1..=station_count {
        let station_id = format!("USC00{:06}", station_idx);
        stations.push(Station::new(
            station_id.clone(),
            format!("Test Station {}", station_idx),
            21.0 + (station_idx as f64) * 0.01,
            -157.0 - (station_idx as f64) * 0.01,
            Some(10.0 + station_idx as f64),
        ));

        let base_date = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
        // Later stations skip some days so counts differ
        for day in (0..days).filter(|d| d % (station_idx % 5 + 1) != 1) {
            let date = base_date + chrono::Duration::days(day as i64);
            let prcp = if day % 7 == 0 { None } else { Some((day % 13) as f64 * 0.05) };
            let tobs = 70.0 + ((day + station_idx) % 15) as f64;

            measurements.push(Measurement::new(station_id.clone(), date, prcp, Some(tobs)));
        }
    }

    (stations, measurements)
}

fn benchmark_store_construction(c: &mut Criterion) {
    let (stations, measurements) = create_test_dataset(9, 2800);

    c.bench_function("store_construction", |b| {
        b.iter(|| {
            let store = DatasetStore::new(stations.clone(), measurements.clone());
            black_box(store.measurement_count())
        })
    });
}

fn benchmark_queries(c: &mut Criterion) {
    let (stations, measurements) = create_test_dataset(9, 2800);
    let store = DatasetStore::new(stations, measurements);
    let engine = QueryEngine::new(&store);
    let range = DateRange::parse("2016-08-23", Some("2017-08-23")).unwrap();

    c.bench_function("precipitation_series", |b| {
        b.iter(|| black_box(engine.precipitation_series().map(|s| s.len()).unwrap_or(0)))
    });

    c.bench_function("station_list", |b| {
        b.iter(|| black_box(engine.station_list().map(|s| s.len()).unwrap_or(0)))
    });

    c.bench_function("most_active_temperature_series", |b| {
        b.iter(|| {
            black_box(
                engine
                    .most_active_temperature_series()
                    .map(|s| s.len())
                    .unwrap_or(0),
            )
        })
    });

    c.bench_function("temperature_summary", |b| {
        b.iter(|| black_box(engine.temperature_summary(black_box(range)).ok()))
    });
}

fn benchmark_integrity_checker(c: &mut Criterion) {
    let (stations, measurements) = create_test_dataset(9, 2800);
    let store = DatasetStore::new(stations, measurements);

    c.bench_function("integrity_checker", |b| {
        b.iter(|| {
            let checker = IntegrityChecker::new();
            let report = checker.check(&store);
            black_box(report.measurement_count)
        })
    });
}

fn benchmark_varying_data_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("temperature_summary_by_size");

    for &days in &[365, 1825, 3650] {
        group.bench_with_input(BenchmarkId::new("days", days), &days, |b, &days| {
            let (stations, measurements) = create_test_dataset(9, days);
            let store = DatasetStore::new(stations, measurements);
            let range = DateRange::open(NaiveDate::from_ymd_opt(2010, 6, 1).unwrap());

            b.iter(|| {
                let engine = QueryEngine::new(&store);
                black_box(engine.temperature_summary(range).ok())
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_store_construction,
    benchmark_queries,
    benchmark_integrity_checker,
    benchmark_varying_data_sizes
);
criterion_main!(benches);
