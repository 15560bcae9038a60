use std::fmt::Write;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ntn::geo::{distance_miles, Location};
use ntn::samples::scan_samples;
use ntn::sites::{parse_site_feed, select_within_radius};
use ntn::validate::{RadiusQuery, SamplesQuery};

/// A synthetic feed of `count` sites spread over the continental US.
fn site_feed(count: usize) -> String {
    let mut body =
        String::from("siteid,siteName,status,latitude,longitude,elevation\n");
    for i in 0..count {
        let lat = 25.0 + (i % 250) as f64 * 0.1;
        let lon = -124.0 + (i / 250) as f64 * 0.5;
        let status = if i % 7 == 0 { "I" } else { "A" };
        writeln!(body, "S{:03},Site {},{},{:.4},{:.4},1000", i, i, status, lat, lon).unwrap();
    }
    body
}

/// Weekly rows for 50 sites over 30 years.
fn sample_file() -> String {
    let mut body = String::from("siteID,labno,yrmonth,ppt,NH4,NO3,SO4\n");
    for site in 0..50 {
        for year in 1990..2020 {
            for month in 1..=12 {
                for week in 0..4 {
                    writeln!(
                        body,
                        "X{:03},L{}{:02}{},{}{:02},0.5,0.1,0.2,0.3",
                        site, year, month, week, year, month
                    )
                    .unwrap();
                }
            }
        }
    }
    body
}

fn bench_distance(c: &mut Criterion) {
    let a = Location::new(42.4944, -108.8320);
    let b = Location::new(42.7336, -108.8498);

    c.bench_function("geodesic_distance", |bench| {
        bench.iter(|| black_box(distance_miles(black_box(a), black_box(b))));
    });
}

fn bench_radius_filter(c: &mut Criterion) {
    let sites = parse_site_feed(&site_feed(2500)).unwrap();
    let query = RadiusQuery {
        location: Location::new(39.0, -100.0),
        radius: 250.0,
        include_inactive: false,
    };

    c.bench_function("select_within_radius_2500_sites", |bench| {
        bench.iter(|| black_box(select_within_radius(sites.clone(), black_box(&query))));
    });
}

fn bench_sample_scan(c: &mut Criterion) {
    let body = sample_file();
    let query = SamplesQuery {
        site_id: "X025".to_string(),
        start: "200501".to_string(),
        end: "200512".to_string(),
    };

    c.bench_function("scan_samples_72k_rows", |bench| {
        bench.iter(|| black_box(scan_samples(body.as_bytes(), black_box(&query)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_distance,
    bench_radius_filter,
    bench_sample_scan
);
criterion_main!(benches);
