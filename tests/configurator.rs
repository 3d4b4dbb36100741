use approx::assert_relative_eq;
use arcgauge::{GaugeConfig, GaugeConfigurator, GaugeError};

fn example() -> GaugeConfig {
    GaugeConfig::builder()
        .min_value(0.0)
        .max_value(100.0)
        .max_segment_labels(5)
        .major_ticks(5)
        .width(200.0)
        .ring_width(20.0)
        .ring_inset(5.0)
        .corner_radius(2.0)
        .arc_padding(0.02)
        .min_angle(-90.0)
        .max_angle(90.0)
        .build()
}

#[test]
fn example_gauge_end_to_end() {
    let config = example();
    let mut gauge = GaugeConfigurator::new();

    let tick_data = gauge.configure_tick_data(&config).unwrap();
    assert_eq!(tick_data.len(), 5);
    assert!(tick_data.iter().all(|&ratio| (ratio - 0.2).abs() < 1e-12));

    let arc = gauge.configure_arc(&config).unwrap();
    assert_relative_eq!(arc.segment(0).start_angle, (-90f64).to_radians());
    assert_relative_eq!(arc.segment(4).end_angle, 90f64.to_radians(), epsilon = 1e-12);
}

#[test]
fn custom_stops_drive_ticks_and_segments() {
    let mut config = example();
    config.custom_segment_stops = vec![10.0, 40.0, 70.0];
    config.max_segment_labels = 3;
    let mut gauge = GaugeConfigurator::new();

    assert_eq!(gauge.configure_ticks(&config).unwrap(), vec![10.0, 40.0, 70.0]);

    let tick_data = gauge.configure_tick_data(&config).unwrap();
    assert_eq!(tick_data.len(), 4);
    assert_relative_eq!(tick_data.iter().sum::<f64>(), 1.0, epsilon = 1e-12);
}

#[test]
fn angles_are_monotonic_and_bounded() {
    let configs = [
        example(),
        GaugeConfig::builder()
            .max_value(50.0)
            .custom_segment_stops(vec![0.0, 5.0, 30.0, 50.0])
            .min_angle(-120.0)
            .max_angle(120.0)
            .build(),
        GaugeConfig::builder().major_ticks(11).min_angle(0.0).max_angle(270.0).build(),
    ];

    for config in &configs {
        let mut gauge = GaugeConfigurator::new();
        let lo = config.min_angle.to_radians() - 1e-12;
        let hi = config.max_angle.to_radians() + 1e-12;
        for arc in [
            gauge.configure_arc(config).unwrap(),
            gauge.border_arc(config, 1.0, 0.1, 3.0).unwrap(),
        ] {
            let mut previous = lo;
            for segment in arc.segments() {
                assert!(segment.start_angle >= previous - 1e-12);
                assert!(segment.end_angle >= segment.start_angle);
                assert!(segment.start_angle >= lo && segment.end_angle <= hi);
                previous = segment.end_angle;
            }
        }
    }
}

#[test]
fn repeated_calls_are_identical() {
    let config = example();
    let mut gauge = GaugeConfigurator::new();

    let scale = gauge.configure_scale(&config).unwrap();
    let ticks = gauge.configure_ticks(&config).unwrap();
    let tick_data = gauge.configure_tick_data(&config).unwrap();
    let arc = gauge.configure_arc(&config).unwrap();
    let border = gauge.border_arc(&config, 2.0, 0.02, 4.0).unwrap();

    assert_eq!(gauge.configure_scale(&config).unwrap(), scale);
    assert_eq!(gauge.configure_ticks(&config).unwrap(), ticks);
    assert_eq!(gauge.configure_tick_data(&config).unwrap(), tick_data);
    assert_eq!(gauge.configure_arc(&config).unwrap(), arc);
    assert_eq!(gauge.border_arc(&config, 2.0, 0.02, 4.0).unwrap(), border);
    assert_eq!(arc.path(2), gauge.configure_arc(&config).unwrap().path(2));
}

#[test]
fn separate_gauges_do_not_share_caches() {
    let mut first = GaugeConfigurator::new();
    let mut second = GaugeConfigurator::new();
    let small = example();
    let mut large = example();
    large.major_ticks = 8;

    assert_eq!(first.configure_tick_data(&small).unwrap().len(), 5);
    assert_eq!(second.configure_tick_data(&large).unwrap().len(), 8);
    assert_eq!(first.configure_tick_data(&small).unwrap().len(), 5);
    assert_eq!(first.cache_hits(), 1);
}

#[test]
fn loads_config_from_json() {
    let config = GaugeConfig::from_json(
        r#"{
            "minValue": 0,
            "maxValue": 100,
            "maxSegmentLabels": 3,
            "customSegmentStops": [10, 40, 70],
            "width": 200
        }"#,
    )
    .unwrap();
    let mut gauge = GaugeConfigurator::new();
    assert_eq!(gauge.configure_ticks(&config).unwrap(), vec![10.0, 40.0, 70.0]);
}

#[test]
fn malformed_configs_fail_loudly() {
    let mut gauge = GaugeConfigurator::new();

    let mut unordered = example();
    unordered.custom_segment_stops = vec![50.0, 20.0];
    assert!(matches!(
        gauge.configure_tick_data(&unordered),
        Err(GaugeError::NonMonotonicStops { index: 1 })
    ));

    let mut flat = example();
    flat.max_angle = flat.min_angle;
    assert!(matches!(
        gauge.configure_arc(&flat),
        Err(GaugeError::InvalidAngles { .. })
    ));
}
