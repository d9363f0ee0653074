use std::error::Error;
use std::path::Path;

use weatherglass::palette::{encode_png, render_ramp, TEMPERATURE_ANCHORS};
use weatherglass::{interpolated_palette, lens_count};

fn format_rgb(color: [f32; 3]) -> String {
    format!("[{:.3}, {:.3}, {:.3}]", color[0], color[1], color[2])
}

/// Print the anchors, the interpolated palette every 5 °C and the lens count
/// every 10 % humidity. With `--png <path>`, also write the palette ramp.
fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();

    println!("=== ANCHORS ===");
    for anchor in &TEMPERATURE_ANCHORS {
        println!(
            "{:>6.1} °C  bg {}  primary {}  accent1 {}  accent2 {}",
            anchor.temp,
            format_rgb(anchor.background),
            format_rgb(anchor.primary),
            format_rgb(anchor.accent1),
            format_rgb(anchor.accent2)
        );
    }

    println!("\n=== INTERPOLATED ===");
    for temp in (-25..=55).step_by(5) {
        let palette = interpolated_palette(temp as f64);
        println!(
            "{:>6} °C  bg {}  primary {}",
            temp,
            format_rgb(palette.background),
            format_rgb(palette.primary)
        );
    }

    println!("\n=== LENS COUNT ===");
    for percent in (0..=100).step_by(10) {
        println!("{:>4} %  {} lenses", percent, lens_count(percent as f64 / 100.0));
    }

    if let Some(pos) = args.iter().position(|a| a == "--png") {
        let path = args.get(pos + 1).ok_or("--png needs a file path")?;
        let bytes = encode_png(&render_ramp(700, 200))?;
        std::fs::write(Path::new(path), bytes)?;
        println!("\nRamp written to {}", path);
    }

    Ok(())
}
