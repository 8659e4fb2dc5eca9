use std::f64::consts::PI;
use std::fs;

use image::{Rgba, RgbaImage};
use quakemap::{
    constants::{CANVAS_HEIGHT, CANVAS_WIDTH, ERROR_BACKGROUND},
    data::datasets::load_feed,
    prelude::*,
};

const FEED: &str = "\
time,latitude,longitude,depth,mag,magType,nst,gap,dmin,rms,net,id
2024-01-01T00:00:00Z,49.2827,-123.1207,10,5.5,mww,,,,,us,us1
bad,data
2024-01-01T01:00:00Z,-33.8688,151.2093,,4.1,mb,,,,,us,us2
";

const BASEMAP_COLOR: [u8; 4] = [12, 34, 56, 255];

fn write_fixtures(dir: &std::path::Path) -> String {
    for window in FeedWindow::ALL {
        let body = if window == FeedWindow::Day { FEED } else { "time,latitude,longitude,depth,mag\n" };
        fs::write(dir.join(window.file_name()), body).unwrap();
    }
    let basemap = dir.join("basemap.png");
    RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgba(BASEMAP_COLOR))
        .save(&basemap)
        .unwrap();
    basemap.to_string_lossy().into_owned()
}

#[test]
fn test_vancouver_marker_lands_where_projected() {
    let report = parse_feed(FEED, HeaderPolicy::Auto);
    assert!(report.header_skipped);
    assert_eq!(report.events.len(), 2);
    assert_eq!(report.skipped.len(), 1);

    let vancouver = &report.events[0];
    let config = MapConfig::new(LatLng::new(0.0, 0.0), 1.0);
    let projector = Projector::new(&config);
    let offset = projector.offset(&vancouver.location);

    let scale = 256.0 / PI * 2.0;
    let expected_x = scale * (-123.1207f64).to_radians();
    let phi = 49.2827f64.to_radians();
    let expected_y = -scale * (PI / 4.0 + phi / 2.0).tan().ln();
    assert!((offset.x - expected_x).abs() < 1e-6);
    assert!((offset.y - expected_y).abs() < 1e-6);
    assert!(offset.x < 0.0 && offset.y < 0.0, "north-west of center: {:?}", offset);

    let diameter = magnitude_to_diameter(5.5, 1800.0);
    let expected = linear_map(10f64.powf(5.5).sqrt(), 0.0, 10f64.powi(10).sqrt(), 0.0, 1800.0);
    assert!((diameter - expected).abs() < 1e-9);
    assert!((diameter - 10.12).abs() < 0.01);

    let basemap = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, Rgba(BASEMAP_COLOR));
    let outcome = RenderPipeline::render(
        &config,
        &RenderOptions::default(),
        Some(&basemap),
        &report.events[..1],
    )
    .unwrap();

    let px = (CANVAS_WIDTH as f64 / 2.0 + expected_x).floor() as u32;
    let py = (CANVAS_HEIGHT as f64 / 2.0 + expected_y).floor() as u32;
    let marked = outcome.image.get_pixel(px, py).0;
    assert!(marked[1] > BASEMAP_COLOR[1], "green tint expected at ({px}, {py}): {:?}", marked);
    assert_eq!(outcome.image.get_pixel(px + 20, py).0, BASEMAP_COLOR);
}

#[test]
fn test_malformed_row_does_not_affect_neighbours() {
    let report = parse_feed(FEED, HeaderPolicy::Auto);
    assert_eq!(report.skipped[0].line, 3);
    assert_eq!(report.events[1].timestamp, "2024-01-01T01:00:00Z");
    assert_eq!(report.events[1].depth, None);
    assert!((report.events[1].magnitude - 4.1).abs() < f64::EPSILON);
}

#[test]
fn test_trigger_dispatch_from_files() {
    let dir = tempfile::tempdir().unwrap();
    let basemap = write_fixtures(dir.path());
    let loader = ResourceLoader::new();
    let source = FeedSource::new(dir.path().to_string_lossy());

    let (datasets, failures) = DatasetStore::preload(&loader, &source, HeaderPolicy::Auto);
    assert!(failures.is_empty());
    assert_eq!(datasets.get(FeedWindow::Day).len(), 2);

    let map = QuakeMap::load(
        MapConfig::default(),
        RenderOptions::with_profile(&MarkerProfile::Compact),
        &loader,
        &FixedBasemap(basemap),
        datasets,
    )
    .unwrap();
    assert!(map.has_basemap());

    let day = map.handle(Action::ShowDay).unwrap();
    assert!(!day.is_error());
    assert_eq!(day.markers_drawn, 2);

    let month = map.handle(Action::ShowMonth).unwrap();
    assert_eq!(month.markers_drawn, 0);
    assert!(month.image.pixels().all(|p| p.0 == BASEMAP_COLOR));

    // Passes are independent: the day frame is reproduced exactly.
    let again = map.handle(Action::ShowDay).unwrap();
    assert_eq!(again.image, day.image);
}

#[test]
fn test_missing_basemap_renders_error_frame() {
    let dir = tempfile::tempdir().unwrap();
    write_fixtures(dir.path());
    let loader = ResourceLoader::new();
    let missing = dir.path().join("nope.png");

    let report = load_feed(
        &loader,
        &FeedSource::new(dir.path().to_string_lossy()).url(FeedWindow::Day),
        HeaderPolicy::Auto,
    )
    .unwrap();
    let mut datasets = DatasetStore::new();
    datasets.insert(FeedWindow::Day, report.events);

    let map = QuakeMap::load(
        MapConfig::default(),
        RenderOptions::default(),
        &loader,
        &FixedBasemap(missing.to_string_lossy().into_owned()),
        datasets,
    )
    .unwrap();

    let outcome = map.handle(Action::ShowDay).unwrap();
    assert!(outcome.is_error());
    assert_eq!(outcome.markers_drawn, 0);
    assert!(outcome.error.as_deref().unwrap_or_default().contains("nope.png"));
    assert_eq!(outcome.image.get_pixel(CANVAS_WIDTH / 2, 4).0, ERROR_BACKGROUND);
}

#[test]
fn test_settings_file_drives_render() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.json");
    fs::write(
        &path,
        r#"{ "render": { "canvas_width": 200, "canvas_height": 100, "header": "keep" } }"#,
    )
    .unwrap();

    let settings = MapSettings::load(&path).unwrap();
    assert_eq!(settings.map, MapConfig::default());
    assert_eq!(settings.render.header, HeaderPolicy::Keep);

    let outcome = RenderPipeline::render(&settings.map, &settings.render, None, &[]).unwrap();
    assert_eq!(outcome.image.dimensions(), (200, 100));
}
