use arcgauge::{GaugeConfig, GaugeConfigurator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Build a speedometer-style config with the bon-generated builder
    let config = GaugeConfig::builder()
        .max_value(120.0)
        .max_segment_labels(4)
        .custom_segment_stops(vec![0.0, 60.0, 90.0, 120.0])
        .width(240.0)
        .ring_width(30.0)
        .ring_inset(10.0)
        .corner_radius(3.0)
        .arc_padding(0.03)
        .build();

    let mut gauge = GaugeConfigurator::new();

    println!("ticks:     {:?}", gauge.configure_ticks(&config)?);
    println!("tick data: {:?}", gauge.configure_tick_data(&config)?);

    let arc = gauge.configure_arc(&config)?;
    for (index, segment) in arc.segments().enumerate() {
        println!(
            "segment {index}: {:.1}° .. {:.1}°  {}",
            segment.start_angle.to_degrees(),
            segment.end_angle.to_degrees(),
            arc.path(index).to_svg()
        );
    }

    let border = gauge.border_arc(&config, 0.0, 0.0, 2.0)?;
    println!("border radii: {:?}", border.radii());
    println!("needle at 75: {:.3} rad", gauge.needle_angle(&config, 75.0)?);

    Ok(())
}
