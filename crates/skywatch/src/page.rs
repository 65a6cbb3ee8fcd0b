//! Self-contained HTML page for a dashboard view.
//!
//! The page draws the chart and map specs with Plotly in the browser. It
//! only lays out what a render pass produced; it never touches the data.

use std::fmt::Write as _;

use crate::config::PageConfig;
use crate::dashboard::{DashboardView, MapView};
use crate::error::{Error, Result};
use crate::filter::YearRange;

/// Plotly bundle loaded by the page.
pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

const STYLE: &str = r"
body { margin: 0; font-family: sans-serif; background: #0e1117; color: #fafafa; display: flex; }
aside { width: 260px; padding: 24px; background: #262730; min-height: 100vh; box-sizing: border-box; }
main { flex: 1; padding: 24px 48px; }
.shape { display: block; margin: 4px 0; }
.range { margin-top: 16px; }
.notice { padding: 16px; border-radius: 8px; background: #3d3a1a; color: #ffe08a; }
.error { padding: 16px; border-radius: 8px; background: #3e1f22; color: #ff8a8a; }
.plot { width: 100%; height: 480px; }
";

// Python-side template names mean nothing to plotly.js, so the page applies
// the dark colors itself.
const SCRIPT: &str = r"
function applyTheme(layout) {
  if (layout.template === 'plotly_dark') {
    delete layout.template;
    layout.paper_bgcolor = '#111111';
    layout.plot_bgcolor = '#111111';
    layout.font = { color: '#f2f5fa' };
    if (layout.geo) {
      layout.geo.bgcolor = '#111111';
      layout.geo.landcolor = '#2a2a2a';
      layout.geo.countrycolor = '#555555';
    }
  }
  return layout;
}
function draw(id, figure) {
  Plotly.newPlot(id, figure.data, applyTheme(figure.layout), { responsive: true });
}
";

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize `value` for embedding inside a `<script>` element.
fn script_json<T: serde::Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn head(out: &mut String, title: &str) {
    let _ = write!(
        out,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n<script src=\"{PLOTLY_CDN}\"></script>\n\
         <style>{STYLE}</style>\n</head>\n<body>\n",
        title = escape_html(title),
    );
}

fn sidebar(out: &mut String, view: &DashboardView, bounds: Option<YearRange>) {
    out.push_str("<aside>\n<h2>Data Controls</h2>\n<h4>Select Shapes</h4>\n");
    for shape in &view.shape_options {
        let checked = if view.filter.selected_shapes().contains(shape) {
            " checked"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "<label class=\"shape\"><input type=\"checkbox\" disabled{checked}> {}</label>",
            escape_html(shape)
        );
    }
    if let Some(range) = view.filter.year_range() {
        let _ = write!(
            out,
            "<div class=\"range\"><h4>Year Range</h4><p>{} to {}</p>",
            range.min(),
            range.max()
        );
        if let Some(bounds) = bounds {
            let _ = write!(out, "<small>of {} to {}</small>", bounds.min(), bounds.max());
        }
        out.push_str("</div>\n");
    }
    out.push_str("</aside>\n");
}

/// Render the page for a completed render pass.
///
/// # Errors
///
/// Returns an error if a spec cannot be serialized.
pub fn render_page(
    config: &PageConfig,
    view: &DashboardView,
    bounds: Option<YearRange>,
) -> Result<String> {
    let mut out = String::new();
    head(&mut out, &config.title);
    sidebar(&mut out, view, bounds);

    let _ = write!(
        out,
        "<main>\n<h1>{}</h1>\n<p>{}</p>\n<h3>The Trinity Correlation</h3>\n\
         <div id=\"chart\" class=\"plot\"></div>\n<h3>Anomaly Mapping</h3>\n",
        escape_html(&config.title),
        escape_html(&config.subtitle)
    );

    let _ = writeln!(
        out,
        "<script>{SCRIPT}draw('chart', {});</script>",
        script_json(&view.chart)?
    );

    match &view.map {
        MapView::Points(spec) => {
            let _ = writeln!(
                out,
                "<div id=\"map\" class=\"plot\"></div>\n<script>draw('map', {});</script>",
                script_json(spec)?
            );
        }
        MapView::Notice { message } => {
            let _ = writeln!(out, "<div class=\"notice\">{}</div>", escape_html(message));
        }
    }

    out.push_str("</main>\n</body>\n</html>\n");
    Ok(out)
}

/// Render a page reporting that a render pass failed.
#[must_use]
pub fn render_error_page(config: &PageConfig, err: &Error) -> String {
    let mut out = String::new();
    head(&mut out, &config.title);
    let _ = write!(
        out,
        "<main>\n<h1>{}</h1>\n<div class=\"error\">{}</div>\n</main>\n</body>\n</html>\n",
        escape_html(&config.title),
        escape_html(&err.to_string())
    );
    out
}
