//! The shared page layout and formatting helpers for maud views.

use std::sync::OnceLock;

use maud::{DOCTYPE, Markup, PreEscaped, html};
use numfmt::{Formatter, Precision};

/// The stylesheet served inline with every page. The dashboard is a single
/// page, so there is no separate static asset pipeline.
const STYLESHEET: &str = r#"
    body { font-family: system-ui, sans-serif; margin: 0; background: #f6f7f9; color: #1f2933; }
    main { max-width: 64rem; margin: 0 auto; padding: 1.5rem; }
    h1 { font-size: 1.5rem; }
    .alerts { margin-bottom: 1rem; }
    .alert { padding: 0.75rem 1rem; border-radius: 0.25rem; margin-bottom: 0.5rem; }
    .alert-info { background: #e0f2fe; color: #075985; }
    .alert-warning { background: #fef9c3; color: #854d0e; }
    .alert-danger { background: #fee2e2; color: #991b1b; }
    .summaries { display: flex; gap: 1rem; flex-wrap: wrap; margin-bottom: 1.5rem; }
    .summary-card { background: white; border-radius: 0.5rem; padding: 1rem 1.25rem;
                    box-shadow: 0 1px 2px rgba(0,0,0,0.08); flex: 1 1 16rem; }
    .summary-card h2 { margin-top: 0; font-size: 1.1rem; }
    .summary-card .dates { color: #6b7280; font-size: 0.85rem; }
    .summary-card dl { display: grid; grid-template-columns: auto auto; gap: 0.25rem 1rem; }
    .summary-card dd { margin: 0; text-align: right; font-variant-numeric: tabular-nums; }
    .income { color: #047857; }
    .expense { color: #b91c1c; }
    table { width: 100%; border-collapse: collapse; background: white;
            border-radius: 0.5rem; overflow: hidden; }
    th, td { text-align: left; padding: 0.5rem 0.75rem; border-bottom: 1px solid #e5e7eb; }
    th { background: #f3f4f6; font-size: 0.8rem; text-transform: uppercase; color: #4b5563; }
    td.amount { text-align: right; font-variant-numeric: tabular-nums; }
    tr.excluded td { color: #9ca3af; text-decoration: line-through; }
    tr.excluded td.controls { text-decoration: none; }
    .badge { font-size: 0.7rem; padding: 0.1rem 0.4rem; border-radius: 9999px;
             background: #e0e7ff; color: #3730a3; text-decoration: none; }
    .controls form { display: inline; }
    .controls button { border: none; background: none; color: #2563eb;
                       cursor: pointer; text-decoration: underline; padding: 0; }
    .toolbar { display: flex; justify-content: space-between; align-items: center;
               margin: 1rem 0 0.5rem; }
    .toolbar .muted { color: #6b7280; font-size: 0.85rem; }
"#;

/// Wrap `content` in the standard HTML document shell.
pub fn base(title: &str, content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Pocketwatch" }
                style { (PreEscaped(STYLESHEET)) }
            }

            body
            {
                (content)
            }
        }
    }
}

/// Format an amount as currency with two decimal places, e.g. "-$1,234.50".
pub fn format_currency(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-$")
            .unwrap()
            .precision(Precision::Decimals(2))
    });

    let mut formatted_string = if number < 0.0 {
        negative_fmt.fmt_string(number.abs())
    } else if number > 0.0 {
        positive_fmt.fmt_string(number)
    } else {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        "$0.00".to_owned()
    };

    // numfmt omits the last trailing zero, so we must add it ourselves
    // For example, "12.30" is rendered as "12.3" so we append "0".
    if formatted_string.as_bytes()[formatted_string.len() - 3] != b'.' {
        formatted_string = format!("{formatted_string}0");
    }

    formatted_string
}

#[cfg(test)]
mod tests {
    use super::{base, format_currency};
    use maud::html;

    #[test]
    fn formats_positive_negative_and_zero_amounts() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(-1234.5), "-$1,234.50");
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(12.34), "$12.34");
    }

    #[test]
    fn base_wraps_content_in_a_document() {
        let page = base("Dashboard", &html! { p { "hello" } }).into_string();

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Dashboard - Pocketwatch</title>"));
        assert!(page.contains("<p>hello</p>"));
    }
}
