use crate::core::error::{DashResult, DashboardError};
use crate::report::charts::ChartFragment;
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

pub const BUILTIN_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1"/>
<title>{{ title }}</title>
<style>
body{font-family:Arial,Helvetica,sans-serif;margin:0;background:#eee;color:#222;}
.main{max-width:1200px;margin:16px auto;background:#fff;border:1px solid #ddd;border-radius:4px;box-shadow:0 1px 3px rgba(0,0,0,0.08);padding:16px 20px;}
h1{margin:0 0 6px 0;font-size:24px;}
.meta{color:#555;font-size:12px;margin-bottom:12px;}
.chart{padding:12px 0 18px 0;border-bottom:1px solid #eee;}
.chart:last-child{border-bottom:none;}
.view-selector{margin:0 0 6px 0;}
.view-selector select{font-size:15px;padding:2px 6px;}
.chart-note{color:#a33;font-size:13px;}
svg{max-width:100%;height:auto;}
</style>
</head>
<body>
<div class="main">
<h1>{{ title }}</h1>
<div class="meta">{{ meta }}</div>
{{ combined_figure }}
{{ scatter_plot }}
{{ correct_answer_histogram }}
{{ correct_answers_vs_ability }}
</div>
</body>
</html>
"#;

/// Named values substituted into the page template.
#[derive(Clone, Debug, Default)]
pub struct PageContext {
    values: BTreeMap<String, String>,
}

impl PageContext {
    pub fn new(title: &str, meta: &str, fragments: &[ChartFragment]) -> Self {
        let mut values = BTreeMap::new();
        values.insert("title".to_string(), escape_html(title));
        values.insert("meta".to_string(), escape_html(meta));
        for f in fragments {
            values.insert(f.kind.slot().to_string(), f.html.clone());
        }
        Self { values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Replaces every `{{ name }}` placeholder; an unknown name is an error.
pub fn render_template(template: &str, ctx: &PageContext) -> DashResult<String> {
    let mut out = String::with_capacity(template.len() + 256 * 1024);
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            return Err(DashboardError::Configuration(
                "template has an unterminated `{{` placeholder".to_string(),
            ));
        };
        let key = after[..end].trim();
        let value = ctx.get(key).ok_or_else(|| {
            DashboardError::Configuration(format!("template references unknown slot `{}`", key))
        })?;
        out.push_str(value);
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    Ok(out)
}

pub fn load_template(path: Option<&Path>) -> DashResult<String> {
    match path {
        None => Ok(BUILTIN_TEMPLATE.to_string()),
        Some(p) => std::fs::read_to_string(p).map_err(|e| {
            DashboardError::Configuration(format!("failed to read template {}: {e}", p.display()))
        }),
    }
}

pub fn write(path: &Path, html: &str) -> Result<()> {
    let mut w = BufWriter::new(
        File::create(path).with_context(|| format!("create {} failed", path.display()))?,
    );
    w.write_all(html.as_bytes())?;
    w.flush()?;
    Ok(())
}

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/html.rs"]
mod tests;
