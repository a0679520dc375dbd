//! Result reporting: plain-text summary plus an optional HTML report.
pub mod html;
pub mod plots;
pub mod text;

pub use html::{write_html_report, Report, ReportSection};
pub use text::{format_percentage, print_summary};
