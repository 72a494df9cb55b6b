// The HTML page: one tab per location, the charts as inline SVG.

use std::fmt::Write;

use crate::survey::render::render_chart;
use crate::survey::*;

const PAGE_CSS: &str = r#"
body { font-family: system-ui, -apple-system, sans-serif; margin: 24px; color: #0c1625; }
.tabs > input { display: none; }
.tabs > label { display: inline-block; padding: 8px 16px; border: 1px solid #cbd2dc; border-bottom: none; cursor: pointer; background: #edf1f7; }
.tabs > input:checked + label { background: #ffffff; font-weight: 600; }
.tabs > section { display: none; border-top: 1px solid #cbd2dc; padding-top: 16px; }
figure { margin: 0 0 24px 0; }
.note { color: #5b6678; font-size: 13px; }
"#;

fn escape_html(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => res.push_str("&amp;"),
            '<' => res.push_str("&lt;"),
            '>' => res.push_str("&gt;"),
            '"' => res.push_str("&quot;"),
            _ => res.push(c),
        }
    }
    res
}

pub fn build_report(title: &str, dashboard: &Dashboard) -> SurveyResult<String> {
    let mut output = String::new();
    let title = escape_html(title);

    let _ = writeln!(output, "<!DOCTYPE html>");
    let _ = writeln!(output, "<html lang=\"en\">");
    let _ = writeln!(output, "<head>");
    let _ = writeln!(output, "<meta charset=\"utf-8\">");
    let _ = writeln!(output, "<title>{}</title>", title);
    let _ = writeln!(output, "<style>{}", PAGE_CSS);
    // Each radio button shows the panel with the same index.
    for idx in 0..dashboard.tabs.len() {
        let _ = writeln!(
            output,
            "#tab-{idx}:checked ~ #panel-{idx} {{ display: block; }}",
            idx = idx
        );
    }
    let _ = writeln!(output, "</style>");
    let _ = writeln!(output, "</head>");
    let _ = writeln!(output, "<body>");
    let _ = writeln!(output, "<h1>{}</h1>", title);
    let _ = writeln!(output, "<div class=\"tabs\">");

    for (idx, tab) in dashboard.tabs.iter().enumerate() {
        let checked = if idx == 0 { " checked" } else { "" };
        let _ = writeln!(
            output,
            "<input type=\"radio\" name=\"tabs\" id=\"tab-{}\"{}><label for=\"tab-{}\">{}</label>",
            idx,
            checked,
            idx,
            escape_html(tab.location.tab_label())
        );
    }

    for (idx, tab) in dashboard.tabs.iter().enumerate() {
        let _ = writeln!(output, "<section id=\"panel-{}\">", idx);
        let mut num_drawn = 0;
        for chart in tab.charts.iter() {
            let svg = match render_chart(chart)? {
                Some(svg) => svg,
                None => continue,
            };
            num_drawn += 1;
            let _ = writeln!(output, "<figure>");
            let _ = writeln!(output, "{}", svg);
            let unrecognized: u64 = chart.series.iter().map(|s| s.unrecognized).sum();
            if unrecognized > 0 {
                let _ = writeln!(
                    output,
                    "<figcaption class=\"note\">{} answer(s) outside of the scale were left out.</figcaption>",
                    unrecognized
                );
            }
            let _ = writeln!(output, "</figure>");
        }
        if num_drawn == 0 {
            let _ = writeln!(
                output,
                "<p class=\"note\">No responses for {}.</p>",
                escape_html(tab.location.tab_label())
            );
        }
        let _ = writeln!(output, "</section>");
    }

    let _ = writeln!(output, "</div>");
    let _ = writeln!(output, "</body>");
    let _ = writeln!(output, "</html>");
    Ok(output)
}
