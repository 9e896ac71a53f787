//! Standalone HTML page: chart container, tooltip element and hover wiring.

use heatmap_common::{month_name, MONTHS_PER_YEAR};

use crate::chart::HeatMap;
use crate::svg::{escape_xml, format_number, render_svg};

const PAGE_STYLE: &str = r#"
      body { font-family: sans-serif; margin: 20px; }
      .cell:hover { stroke: #000; stroke-width: 1; }
      .tooltip {
        position: absolute;
        pointer-events: none;
        padding: 6px 8px;
        font-size: 12px;
        line-height: 1.4;
        background: rgba(255, 255, 255, 0.95);
        border: 1px solid #999;
        border-radius: 4px;
        transition: opacity 0.1s;
      }
"#;

/// Render an HTML document hosting the chart.
///
/// The tooltip lives outside the chart container and is toggled by opacity
/// only; its content and position are rewritten on every `mouseover`.
pub fn render_page(chart: &HeatMap) -> String {
    let config = &chart.config;
    let title = config
        .title
        .as_deref()
        .unwrap_or("Monthly Global Land-Surface Temperature");
    let base = format_number(chart.base_temperature);
    let years = match (chart.x_scale.domain().first(), chart.x_scale.domain().last()) {
        (Some(first), Some(last)) => format!("{} - {}", first, last),
        _ => String::new(),
    };
    let description = config
        .description
        .clone()
        .unwrap_or_else(|| format!("{}: base temperature {}{}", years, base, config.tooltip.unit));

    let mut html = String::with_capacity(4096 + chart.cells.len() * 160);
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n  <head>\n");
    html.push_str("    <meta charset=\"utf-8\">\n");
    html.push_str(&format!("    <title>{}</title>\n", escape_xml(title)));
    html.push_str(&format!("    <style>{}    </style>\n", PAGE_STYLE));
    html.push_str("  </head>\n  <body>\n");
    html.push_str(&format!("    <h1 id=\"title\">{}</h1>\n", escape_xml(title)));
    html.push_str(&format!(
        "    <p id=\"description\">{}</p>\n",
        escape_xml(&description)
    ));
    html.push_str(&format!(
        "    <div id=\"{}\">\n{}    </div>\n",
        escape_xml(&config.container_id),
        render_svg(chart)
    ));
    html.push_str(&format!(
        "    <div id=\"{}\" class=\"tooltip\" style=\"opacity: 0;\"></div>\n",
        escape_xml(&config.tooltip_id)
    ));
    html.push_str(&format!("    <script>\n{}    </script>\n", hover_script(chart)));
    html.push_str("  </body>\n</html>\n");
    html
}

/// Inline script registering `mouseover`/`mouseout` on every cell.
fn hover_script(chart: &HeatMap) -> String {
    let config = &chart.config;
    let months: Vec<String> = (0..MONTHS_PER_YEAR)
        .map(|m| format!("'{}'", month_name(m).unwrap_or_default()))
        .collect();

    format!(
        r#"      (function () {{
        var tooltip = document.getElementById({tooltip_id});
        var months = [{months}];
        var cells = document.querySelectorAll('#' + {container_id} + ' .cell');
        cells.forEach(function (cell) {{
          cell.addEventListener('mouseover', function (event) {{
            var year = cell.getAttribute('data-year');
            var month = months[+cell.getAttribute('data-month')];
            var temp = (+cell.getAttribute('data-temp')).toFixed({precision});
            tooltip.innerHTML = 'Year: ' + year + '<br>Month: ' + month + '<br>Temp: ' + temp + {unit};
            tooltip.setAttribute('data-year', year);
            tooltip.style.opacity = 1;
            tooltip.style.left = (event.pageX + {offset_x}) + 'px';
            tooltip.style.top = (event.pageY + {offset_y}) + 'px';
          }});
          cell.addEventListener('mouseout', function () {{
            tooltip.style.opacity = 0;
          }});
        }});
      }})();
"#,
        tooltip_id = js_string(&config.tooltip_id),
        container_id = js_string(&config.container_id),
        months = months.join(", "),
        precision = config.tooltip.precision,
        unit = js_string(&config.tooltip.unit),
        offset_x = format_number(config.tooltip.offset_x),
        offset_y = format_number(config.tooltip.offset_y),
    )
}

/// Quote a string as a JavaScript literal that is also safe inside `<script>`.
fn js_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('\'');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\'' => quoted.push_str("\\'"),
            '\n' => quoted.push_str("\\n"),
            '<' => quoted.push_str("\\u003c"),
            '>' => quoted.push_str("\\u003e"),
            _ => quoted.push(c),
        }
    }
    quoted.push('\'');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escapes_script_breakers() {
        assert_eq!(js_string("tooltip"), "'tooltip'");
        assert_eq!(js_string("a'b"), "'a\\'b'");
        assert_eq!(js_string("</script>"), "'\\u003c/script\\u003e'");
    }
}
