//! SVG source for the bridge arc image.

use crate::color::SerializableColor;
use crate::geometry::ArcGeometry;

/// SVG path data for the half circle, e.g. `M -6 0 A 6 6 0 0 1 6 0`.
///
/// Sweep flag 1 runs clockwise on screen, so the arc passes through `(0, -r)`.
pub fn arc_path_data(arc: &ArcGeometry) -> String {
    let start = arc.start();
    let end = arc.end();
    format!(
        "M {} {} A {} {} 0 0 1 {} {}",
        start.x, start.y, arc.radius, arc.radius, end.x, end.y
    )
}

/// Standalone SVG document drawing the stroked arc inside its view box.
pub fn arc_svg(arc: &ArcGeometry, color: SerializableColor) -> String {
    let vb = arc.view_box;
    let opacity = if color.a == 255 {
        String::new()
    } else {
        format!(r#" stroke-opacity="{}""#, color.opacity())
    };
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="{} {} {} {}"><path d="{}" fill="none" stroke="{}" stroke-width="{}"{}/></svg>"#,
        vb.width(),
        vb.height(),
        vb.x0,
        vb.y0,
        vb.width(),
        vb.height(),
        arc_path_data(arc),
        color.to_hex(),
        arc.stroke_width,
        opacity,
    )
}
