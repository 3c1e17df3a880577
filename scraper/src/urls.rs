use crate::period::FiscalPeriod;

/// URL suffixes seen across the bulletin archive.
const SUFFIXES: [&str; 2] = ["-for", ""];

/// Fill in the address template for one spelling of a period.
pub fn format_url(template: &str, period: &FiscalPeriod, month: &str, suffix: &str) -> String {
    template
        .replace("{fiscal_year}", &period.fiscal_year.to_string())
        .replace("{suffix}", suffix)
        .replace("{month}", month)
        .replace("{year}", &period.calendar_year().to_string())
}

/// The archive has been inconsistent about month casing and the "-for"
/// suffix, so every period gets four addresses to try, in order.
pub fn candidate_urls(template: &str, period: &FiscalPeriod) -> Vec<String> {
    let lower = period.month.name();
    let title = period.month.title();

    vec![
        format_url(template, period, lower, SUFFIXES[0]),
        format_url(template, period, lower, SUFFIXES[1]),
        format_url(template, period, &title, SUFFIXES[1]),
        format_url(template, period, &title, SUFFIXES[0]),
    ]
}
