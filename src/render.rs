use pulldown_cmark::{Options, Parser, html};

use crate::models::{EligibilityReport, RenderedReport};

/// Render the model's markdown for display. The markdown itself is kept as is.
pub fn render_report(report: &EligibilityReport) -> RenderedReport {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(report.as_str(), options);
    let mut html_out = String::with_capacity(report.as_str().len() * 3 / 2);
    html::push_html(&mut html_out, parser);

    RenderedReport {
        markdown: report.as_str().to_string(),
        html: html_out,
    }
}
