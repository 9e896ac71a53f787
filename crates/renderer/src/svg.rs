//! SVG serialization of a laid out [`HeatMap`].
//!
//! The markup follows the usual chart DOM shape: an outer `<svg>`, a plot
//! group translated by the margins, `#x-axis` and `#y-axis` groups, one
//! `rect.cell` per record carrying `data-year`, `data-month` (0-indexed) and
//! `data-temp`, and a `#legend` group with its own axis.

use std::fmt::Write;

use crate::axis::{Axis, Orientation};
use crate::chart::HeatMap;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Crisp-edge offset applied to axis lines.
const HALF_PIXEL: f64 = 0.5;

/// Escape text for use in XML content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Shortest decimal form of a number, e.g. `6` for 6.0 and `9.5` for 9.5.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0 as well
        return "0".to_string();
    }
    format!("{}", value)
}

/// Render the chart as a standalone SVG document.
pub fn render_svg(chart: &HeatMap) -> String {
    let config = &chart.config;
    let mut svg = String::with_capacity(256 + chart.cells.len() * 160);

    let _ = writeln!(
        svg,
        "<svg xmlns=\"{}\" width=\"{}\" height=\"{}\" viewBox=\"0 0 {} {}\">",
        SVG_NS,
        format_number(config.width),
        format_number(config.height),
        format_number(config.width),
        format_number(config.height)
    );
    if let Some(title) = &config.title {
        let _ = writeln!(svg, "  <title id=\"title\">{}</title>", escape_xml(title));
    }
    if let Some(description) = &config.description {
        let _ = writeln!(
            svg,
            "  <desc id=\"description\">{}</desc>",
            escape_xml(description)
        );
    }

    let _ = writeln!(
        svg,
        "  <g transform=\"translate({}, {})\">",
        format_number(config.margin.left),
        format_number(config.margin.top)
    );

    write_axis(
        &mut svg,
        &chart.x_axis,
        Some("x-axis"),
        (0.0, config.inner_height()),
        "    ",
    );
    write_axis(&mut svg, &chart.y_axis, Some("y-axis"), (0.0, 0.0), "    ");

    for cell in &chart.cells {
        let _ = writeln!(
            svg,
            "    <rect class=\"cell\" data-month=\"{}\" data-year=\"{}\" data-temp=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            cell.month,
            cell.year,
            format_number(cell.temperature),
            format_number(cell.x),
            format_number(cell.y),
            format_number(cell.width),
            format_number(cell.height),
            cell.fill.to_css()
        );
    }

    let legend = &chart.legend;
    let _ = writeln!(
        svg,
        "    <g id=\"legend\" transform=\"translate({}, {})\">",
        format_number(legend.origin.0),
        format_number(legend.origin.1)
    );
    for swatch in &legend.swatches {
        let _ = writeln!(
            svg,
            "      <rect x=\"{}\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
            format_number(swatch.x),
            format_number(swatch.width),
            format_number(legend.height),
            swatch.fill.to_css()
        );
    }
    write_axis(
        &mut svg,
        &legend.axis,
        None,
        (0.0, legend.height),
        "      ",
    );
    svg.push_str("    </g>\n");

    svg.push_str("  </g>\n");
    svg.push_str("</svg>\n");
    svg
}

fn write_axis(svg: &mut String, axis: &Axis, id: Option<&str>, offset: (f64, f64), indent: &str) {
    let anchor = match axis.orientation {
        Orientation::Bottom => "middle",
        Orientation::Left => "end",
    };
    let id_attr = id
        .map(|id| format!(" id=\"{}\"", escape_xml(id)))
        .unwrap_or_default();
    let transform = if offset == (0.0, 0.0) {
        String::new()
    } else {
        format!(
            " transform=\"translate({}, {})\"",
            format_number(offset.0),
            format_number(offset.1)
        )
    };
    let _ = writeln!(
        svg,
        "{indent}<g{id_attr}{transform} fill=\"none\" font-size=\"10\" font-family=\"sans-serif\" text-anchor=\"{anchor}\">"
    );

    let size = axis.tick_size;
    let (r0, r1) = axis.range;
    let (start, end) = (r0.min(r1) + HALF_PIXEL, r0.max(r1) + HALF_PIXEL);
    let domain = match axis.orientation {
        Orientation::Bottom => format!(
            "M{},{}V{}H{}V{}",
            format_number(start),
            format_number(size),
            HALF_PIXEL,
            format_number(end),
            format_number(size)
        ),
        Orientation::Left => format!(
            "M{},{}H{}V{}H{}",
            format_number(-size),
            format_number(start),
            HALF_PIXEL,
            format_number(end),
            format_number(-size)
        ),
    };
    let _ = writeln!(
        svg,
        "{indent}  <path class=\"domain\" stroke=\"currentColor\" d=\"{domain}\"/>"
    );

    let label_gap = size + axis.tick_padding;
    for tick in &axis.ticks {
        let position = format_number(tick.position + HALF_PIXEL);
        let label = escape_xml(&tick.label);
        match axis.orientation {
            Orientation::Bottom => {
                let _ = writeln!(
                    svg,
                    "{indent}  <g class=\"tick\" opacity=\"1\" transform=\"translate({position}, 0)\"><line stroke=\"currentColor\" y2=\"{}\"/><text fill=\"currentColor\" y=\"{}\" dy=\"0.71em\">{label}</text></g>",
                    format_number(size),
                    format_number(label_gap)
                );
            }
            Orientation::Left => {
                let _ = writeln!(
                    svg,
                    "{indent}  <g class=\"tick\" opacity=\"1\" transform=\"translate(0, {position})\"><line stroke=\"currentColor\" x2=\"{}\"/><text fill=\"currentColor\" x=\"{}\" dy=\"0.32em\">{label}</text></g>",
                    format_number(-size),
                    format_number(-label_gap)
                );
            }
        }
    }
    let _ = writeln!(svg, "{indent}</g>");
}
