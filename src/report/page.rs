use crate::core::config::DashboardConfig;
use crate::core::engine::RunOutput;
use crate::core::error::DashResult;
use crate::report::charts::{self, ChartFragment};
use crate::report::html::{self, PageContext};

pub struct Page {
    pub fragments: Vec<ChartFragment>,
    pub html: String,
}

/// Chart building and template rendering for one request.
pub fn render(cfg: &DashboardConfig, output: &RunOutput) -> DashResult<Page> {
    let fragments = charts::build_all(&output.dataset, &output.summary, &cfg.charts)?;
    let meta = format!(
        "{} items, {} participants. Source: {}",
        output.dataset.n_items(),
        output.summary.len(),
        cfg.data.dataset_file
    );
    let ctx = PageContext::new(&cfg.report.title, &meta, &fragments);
    let template = html::load_template(cfg.report.template.as_deref())?;
    let html = html::render_template(&template, &ctx)?;
    Ok(Page { fragments, html })
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/page.rs"]
mod tests;
