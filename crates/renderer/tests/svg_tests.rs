//! Tests for the SVG output: the markup contract that external checks rely on.

mod common;

use common::{cells, parse_svg, tick_labels};
use renderer::chart::{ChartConfig, HeatMap};
use renderer::{rasterize, render_svg};
use test_utils::{assert_approx_eq, create_published_shape_dataset, two_record_dataset};

fn scenario_svg() -> String {
    let chart = HeatMap::build(&two_record_dataset(), &ChartConfig::default()).unwrap();
    render_svg(&chart)
}

// ============================================================================
// Document structure
// ============================================================================

#[test]
fn test_svg_root_size() {
    let elements = parse_svg(&scenario_svg());
    let root = &elements[0];
    assert_eq!(root.name, "svg");
    assert_eq!(root.attr("width"), Some("1200"));
    assert_eq!(root.attr("height"), Some("600"));
}

#[test]
fn test_plot_group_translated_by_margins() {
    let elements = parse_svg(&scenario_svg());
    let plot = elements
        .iter()
        .find(|e| e.name == "g" && e.ancestors.len() == 1)
        .expect("plot group");
    assert_eq!(plot.attr("transform"), Some("translate(80, 50)"));
}

#[test]
fn test_axis_groups_present() {
    let elements = parse_svg(&scenario_svg());
    let x_axis = elements.iter().find(|e| e.attr("id") == Some("x-axis")).unwrap();
    assert_eq!(x_axis.attr("transform"), Some("translate(0, 450)"));
    assert!(elements.iter().any(|e| e.attr("id") == Some("y-axis")));
    assert!(elements.iter().any(|e| e.attr("id") == Some("legend")));
}

#[test]
fn test_title_is_escaped() {
    let mut config = ChartConfig::default();
    config.title = Some("Temps <1753 & later>".to_string());
    let chart = HeatMap::build(&two_record_dataset(), &config).unwrap();
    let svg = render_svg(&chart);
    assert!(svg.contains("Temps &lt;1753 &amp; later&gt;"));

    let elements = parse_svg(&svg);
    let title = elements.iter().find(|e| e.name == "title").unwrap();
    assert_eq!(title.text, "Temps <1753 & later>");
}

// ============================================================================
// Cells
// ============================================================================

#[test]
fn test_scenario_cell_attributes() {
    let elements = parse_svg(&scenario_svg());
    let cells = cells(&elements);
    assert_eq!(cells.len(), 2);

    assert_eq!(cells[0].attr("data-year"), Some("1900"));
    assert_eq!(cells[0].attr("data-month"), Some("0"));
    assert_eq!(cells[0].attr_f64("data-temp"), 6.0);

    assert_eq!(cells[1].attr("data-year"), Some("2000"));
    assert_eq!(cells[1].attr("data-month"), Some("5"));
    assert_eq!(cells[1].attr_f64("data-temp"), 9.5);
}

#[test]
fn test_cell_count_and_attributes_match_dataset() {
    let dataset = create_published_shape_dataset();
    let chart = HeatMap::build(&dataset, &ChartConfig::default()).unwrap();
    let elements = parse_svg(&render_svg(&chart));
    let cells = cells(&elements);

    assert_eq!(cells.len(), dataset.len());
    for (cell, record) in cells.iter().zip(&dataset.monthly_variance) {
        assert_eq!(cell.attr_f64("data-year") as i32, record.year);
        assert_eq!(cell.attr_f64("data-month") as u32, record.month - 1);
        assert_approx_eq!(
            cell.attr_f64("data-temp"),
            dataset.base_temperature + record.variance,
            1e-12
        );
        assert!(cell.attr("fill").unwrap().starts_with("rgb("));
    }
}

#[test]
fn test_cells_fill_plot_width() {
    let elements = parse_svg(&scenario_svg());
    let cells = cells(&elements);
    let last = cells[1];
    assert_approx_eq!(last.attr_f64("x") + last.attr_f64("width"), 1100.0, 1e-9);
}

// ============================================================================
// Axes
// ============================================================================

#[test]
fn test_x_axis_labels_are_decades() {
    let dataset = create_published_shape_dataset();
    let chart = HeatMap::build(&dataset, &ChartConfig::default()).unwrap();
    let elements = parse_svg(&render_svg(&chart));
    let labels = tick_labels(&elements, "x-axis");

    assert_eq!(labels.len(), 26);
    for label in &labels {
        let year: i32 = label.parse().unwrap();
        assert_eq!(year % 10, 0);
    }
    let mut unique = labels.clone();
    unique.dedup();
    assert_eq!(unique.len(), labels.len());
}

#[test]
fn test_y_axis_labels_are_month_names() {
    let elements = parse_svg(&scenario_svg());
    let labels = tick_labels(&elements, "y-axis");
    assert_eq!(labels.len(), 12);
    assert_eq!(labels[0], "January");
    assert_eq!(labels[5], "June");
    assert_eq!(labels[11], "December");
}

// ============================================================================
// Legend
// ============================================================================

#[test]
fn test_legend_markup() {
    let elements = parse_svg(&scenario_svg());
    let legend = elements.iter().find(|e| e.attr("id") == Some("legend")).unwrap();
    assert_eq!(legend.attr("transform"), Some("translate(350, 490)"));

    let swatches: Vec<_> = elements
        .iter()
        .filter(|e| e.name == "rect" && e.within("legend"))
        .collect();
    assert_eq!(swatches.len(), 10);
    let total: f64 = swatches.iter().map(|s| s.attr_f64("width")).sum();
    assert_approx_eq!(total, 400.0, 1e-9);

    let labels = tick_labels(&elements, "legend");
    assert!(labels.contains(&"6.0".to_string()));
    assert!(labels.contains(&"9.5".to_string()));
}

// ============================================================================
// Rasterization
// ============================================================================

#[test]
fn test_rasterize_chart() {
    let png = rasterize(&scenario_svg(), 1.0).unwrap();
    assert_eq!(&png[0..8], &[137, 80, 78, 71, 13, 10, 26, 10]);
    assert_eq!(&png[16..20], &1200u32.to_be_bytes());
    assert_eq!(&png[20..24], &600u32.to_be_bytes());
}

#[test]
fn test_rasterize_rejects_garbage() {
    assert!(rasterize("not svg", 1.0).is_err());
}
