use conftree::{Config, Vec3i};

fn main() -> Result<(), conftree::ConfigError> {
    let config = Config::from_path("demos/demo.yaml")?;

    let app = config.get::<String>("app_name").unwrap_or_default();
    let debug = config.get::<bool>("app_debug").unwrap_or_default();
    let length = config.get::<f64>("road_dims_length").unwrap_or_default();
    let rgb = config.get::<Vec3i>("road_color_rgb").unwrap_or_default();

    println!("App: {} (debug={})", app, debug);
    println!("Road length: {}", length);
    println!("Road color: {}", rgb);

    // Misses come back as None rather than failing.
    println!("Unset key: {:?}", config.get::<f64>("road_color_alpha"));

    Ok(())
}
