use crate::chart::growth_figure;
use crate::models::GrowthPoint;

const PLOTLY_SCRIPT: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// What a rendered page shows: a growth series, or the failure that prevented one.
pub enum PageContent<'a> {
    Growth(&'a [GrowthPoint]),
    Failure(&'a str)
}

/// Renders a standalone HTML page with the growth table and chart.
///
/// An empty series still renders an empty table and chart; a failure renders a banner instead.
pub fn render_page(title: &str, chart_title: &str, content: PageContent<'_>) -> String {
    let mut body = String::new();

    match content {
        PageContent::Failure(message) => {
            body.push_str(&format!(r#"<div class="banner">{}</div>"#, escape(message)));
        }
        PageContent::Growth(series) => {
            body.push_str("<table><thead><tr><th>date</th><th>growth</th></tr></thead><tbody>");

            for point in series {
                body.push_str(&format!("<tr><td>{}</td><td>{}</td></tr>", point.date, point.growth));
            }

            body.push_str("</tbody></table>");

            let figure = script_safe(&growth_figure(series, chart_title).to_string());
            body.push_str(&format!(
                r#"<div id="growth-chart"></div><script>const figure = {figure}; Plotly.newPlot("growth-chart", figure.data, figure.layout);</script>"#
            ));
        }
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_SCRIPT}"></script>
<style>
body {{ font-family: sans-serif; margin: 2rem; }}
table {{ border-collapse: collapse; width: 100%; }}
td, th {{ border-bottom: 1px solid #ddd; padding: 0.3rem 0.6rem; text-align: left; }}
.banner {{ background: #fdecea; color: #611a15; padding: 1rem; border-radius: 4px; }}
</style>
</head>
<body>
<h1>{title}</h1>
{body}
</body>
</html>
"#,
        title = escape(title)
    )
}

/// Keeps embedded JSON from closing the surrounding script element; `<\/` is still valid JSON.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/").replace("<!--", "<\\u0021--")
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
