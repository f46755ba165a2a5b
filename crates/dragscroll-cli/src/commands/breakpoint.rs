use anyhow::Result;

use dragscroll_core::{Axis, Breakpoint, CarouselConfig};

pub fn run(config: &CarouselConfig, width: f64) -> Result<()> {
    if !width.is_finite() || width < 0.0 {
        anyhow::bail!("Viewport width must be a non-negative number, got {}", width);
    }

    let breakpoint = Breakpoint::from_width(width);
    let axis = config.axis.resolve_at(breakpoint, Axis::X);

    println!("Viewport {}px is breakpoint '{}'\n", width, breakpoint);
    println!("  axis:            {:?}", axis);
    println!("  slides per view: {}", config.layout.resolve_at(breakpoint, 1));
    println!("  partial delta:   {}px", config.partial_delta.resolve_at(breakpoint, 0.0));
    println!("  gap:             {}px", config.gap.resolve_at(breakpoint, 0.0));
    println!(
        "  native scroll:   {}",
        if config.disable_native_scroll.resolve_at(breakpoint, false) {
            "disabled"
        } else {
            "enabled"
        }
    );
    println!(
        "  auto height:     {}",
        config.auto_height.unwrap_or(axis == Axis::Y) && axis == Axis::Y
    );

    Ok(())
}
