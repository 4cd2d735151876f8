//! Report template loading and placeholder substitution.
//!
//! Templates are plain HTML with `{{NAME}}` tokens. Substitution is a single
//! literal pass: each known token is replaced at most once and inserted values
//! are never scanned again, so one value cannot inject another placeholder.

use std::path::Path;

pub const REPORT_TITLE: &str = "REPORT_TITLE";
pub const CURRENCY: &str = "CURRENCY";
pub const VAT_PERCENT: &str = "VAT_PERCENT";
pub const SUMMARY: &str = "SUMMARY";
pub const DESCRIPTION: &str = "DESCRIPTION";
pub const NOTES: &str = "NOTES";
pub const PRICING_TABLE: &str = "PRICING_TABLE";

/// Built-in template, used whenever no external template can be read.
pub const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <title>Pricing Report</title>
  <style>
    body { font-family: system-ui, -apple-system, "Segoe UI", sans-serif; background:#f9fafb; color:#0b1120; padding:32px; }
    .page { max-width: 960px; margin: 0 auto; background:#ffffff; border-radius:16px; padding:32px; box-shadow:0 10px 40px rgba(15,23,42,0.08); }
    h1 { font-size: 28px; margin-bottom:4px; }
    h2 { margin-top:32px; margin-bottom:8px; font-size:20px; }
    table { width:100%; border-collapse:collapse; margin-top:12px; font-size:14px; }
    th, td { border:1px solid #e5e7eb; padding:8px 10px; text-align:left; }
    th { background:#f3f4f6; }
    tfoot td { font-weight:600; }
    .meta-grid { display:grid; grid-template-columns: repeat(auto-fit,minmax(180px,1fr)); gap:8px 24px; font-size:13px; margin-top:8px; }
    .meta-label { font-weight:600; color:#6b7280; }
  </style>
</head>
<body>
  <div class="page">
    <header style="display:flex; justify-content:space-between; align-items:flex-start; gap:16px;">
      <h1>{{REPORT_TITLE}}</h1>
      <div style="text-align:right; font-size:12px; color:#6b7280;">
        <div>Currency: {{CURRENCY}}</div>
        <div>VAT: {{VAT_PERCENT}}%</div>
      </div>
    </header>

    <section>
      <h2>Overview</h2>
      <p style="font-size:14px;">{{SUMMARY}}</p>
      <div class="meta-grid">
        <div>
          <div class="meta-label">Description</div>
          <div>{{DESCRIPTION}}</div>
        </div>
        <div>
          <div class="meta-label">Notes</div>
          <div>{{NOTES}}</div>
        </div>
      </div>
    </section>

    <section>
      <h2>Pricing Breakdown</h2>
      {{PRICING_TABLE}}
    </section>

    <section style="font-size:12px; color:#6b7280;">
      <p>
        All figures are indicative only and must be reviewed and approved by a
        qualified decision-maker before submission.
      </p>
    </section>
  </div>
</body>
</html>
"#;

/// Read the template at `path`, falling back to [`DEFAULT_TEMPLATE`].
pub fn load_template(path: Option<&Path>) -> String {
    let Some(path) = path else {
        return DEFAULT_TEMPLATE.to_string();
    };
    match std::fs::read_to_string(path) {
        Ok(template) => template,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "report template unavailable, using built-in template");
            DEFAULT_TEMPLATE.to_string()
        }
    }
}

/// Replace `{{NAME}}` tokens with their values in one pass.
///
/// Unknown tokens and repeated occurrences of an already-used token are left
/// as they are.
pub fn fill_placeholders(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut used = vec![false; values.len()];
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };

        let name = &after_open[..close];
        let slot = values
            .iter()
            .enumerate()
            .find(|(i, (key, _))| !used[*i] && *key == name)
            .map(|(i, _)| i);

        match slot {
            Some(i) => {
                used[i] = true;
                out.push_str(&values[i].1);
                rest = &after_open[close + 2..];
            }
            None => {
                // Not ours: keep one brace and rescan from the next one.
                out.push('{');
                rest = &rest[open + 1..];
            }
        }
    }

    out.push_str(rest);
    out
}
