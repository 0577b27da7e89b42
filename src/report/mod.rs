//! Report formatter
//!
//! Turns one market data read into five fixed lines, then renders those
//! lines as HTML and plain text. Interpolated values are numbers or the
//! formatted date, so the HTML is not escaped.

pub mod format;

use crate::market_data::{FeeEstimate, PriceSnapshot};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use self::format::{format_optional_change, format_optional_fee, format_optional_usd, localized_date};

/// Subject prefix, followed by the localized date
pub const SUBJECT_PREFIX: &str = "BTC 每日重點 – ";

/// Heading of the static link block
pub const LINKS_HEADING: &str = "🔗 追蹤連結：";

/// A static link appended to every report
pub struct ReportLink {
    /// Label in the HTML list
    pub html_label: &'static str,
    /// Label in the text list
    pub text_label: &'static str,
    pub url: &'static str,
}

pub const REPORT_LINKS: [ReportLink; 4] = [
    ReportLink {
        html_label: "Farside：美國現貨 BTC ETF 淨流面板",
        text_label: "Farside ETF 面板",
        url: "https://farside.co.uk/btc/",
    },
    ReportLink {
        html_label: "Fed 官方 FOMC 日曆",
        text_label: "Fed FOMC 日曆",
        url: "https://www.federalreserve.gov/monetarypolicy/fomccalendars.htm",
    },
    ReportLink {
        html_label: "CoinGecko：BTC 詳情",
        text_label: "CoinGecko BTC",
        url: "https://www.coingecko.com/en/coins/bitcoin",
    },
    ReportLink {
        html_label: "mempool.space：鏈上狀態",
        text_label: "mempool.space",
        url: "https://mempool.space/",
    },
];

/// Formatted report, ready for a transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub subject: String,
    pub html: String,
    pub text: String,
}

/// The five report lines, in order
pub fn report_lines(snapshot: &PriceSnapshot, fee: &FeeEstimate, date: &str) -> Vec<String> {
    vec![
        format!("📊 市場總結（{}）", date),
        format!(
            "• 價格：${}（24h {}%）",
            format_optional_usd(snapshot.price),
            format_optional_change(snapshot.change_24h)
        ),
        format!(
            "• 手續費建議：fast {} / halfHour {} / hour {} sats/vB",
            format_optional_fee(fee.fastest),
            format_optional_fee(fee.half_hour),
            format_optional_fee(fee.hour)
        ),
        "• ETF 淨流：請見 Farside 面板（下方連結）".to_string(),
        "• 重要事件：下次 FOMC 會議請見官方日曆".to_string(),
    ]
}

fn render_html(lines: &[String]) -> String {
    let mut html: String = lines.iter().map(|line| format!("<div>{}</div>", line)).collect();

    html.push_str("<hr>\n<div>");
    html.push_str(LINKS_HEADING);
    html.push_str("\n  <ul>\n");
    for link in &REPORT_LINKS {
        html.push_str(&format!(
            "    <li><a href=\"{}\">{}</a></li>\n",
            link.url, link.html_label
        ));
    }
    html.push_str("  </ul>\n</div>");
    html
}

fn render_text(lines: &[String]) -> String {
    let links: Vec<String> = REPORT_LINKS
        .iter()
        .map(|link| format!("• {}: {}", link.text_label, link.url))
        .collect();

    format!("{}\n\n{}\n{}", lines.join("\n"), LINKS_HEADING, links.join("\n"))
}

/// Build the report for `now` as seen in `tz`
pub fn format_report(snapshot: &PriceSnapshot, fee: &FeeEstimate, now: DateTime<Utc>, tz: Tz) -> Report {
    let date = localized_date(now, tz);
    let lines = report_lines(snapshot, fee, &date);

    Report {
        subject: format!("{}{}", SUBJECT_PREFIX, date),
        html: render_html(&lines),
        text: render_text(&lines),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn taipei() -> Tz {
        "Asia/Taipei".parse().unwrap()
    }

    fn sample_report() -> Report {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 1, 0, 0).unwrap();
        format_report(
            &PriceSnapshot::new(65000.5, 3.2),
            &FeeEstimate::new(10, 5, 2),
            now,
            taipei(),
        )
    }

    /// Contents of the leading `<div>` elements, before the link block
    fn html_lines(html: &str) -> Vec<String> {
        let body = html.split("<hr>").next().unwrap_or_default();
        body.split("</div>")
            .filter_map(|chunk| chunk.strip_prefix("<div>"))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_end_to_end_sample() {
        let report = sample_report();
        assert_eq!(report.subject, "BTC 每日重點 – 2024年6月1日");

        let lines: Vec<&str> = report.text.lines().collect();
        assert_eq!(lines[0], "📊 市場總結（2024年6月1日）");
        assert_eq!(lines[1], "• 價格：$65,000.50（24h +3.20%）");
        assert_eq!(lines[2], "• 手續費建議：fast 10 / halfHour 5 / hour 2 sats/vB");
        assert_eq!(lines[3], "• ETF 淨流：請見 Farside 面板（下方連結）");
        assert_eq!(lines[4], "• 重要事件：下次 FOMC 會議請見官方日曆");
    }

    #[test]
    fn test_text_and_html_carry_same_lines() {
        let samples = [
            (PriceSnapshot::new(65000.5, 3.2), FeeEstimate::new(10, 5, 2)),
            (PriceSnapshot::new(0.0, -12.345), FeeEstimate::new(1, 1, 1)),
            (PriceSnapshot::new(123456789.0, 0.0), FeeEstimate::new(250, 120, 60)),
            (PriceSnapshot::default(), FeeEstimate::default()),
        ];
        let now = Utc.with_ymd_and_hms(2024, 12, 31, 20, 0, 0).unwrap();

        for (snapshot, fee) in samples {
            let report = format_report(&snapshot, &fee, now, taipei());
            let text_lines: Vec<String> = report.text.lines().take(5).map(str::to_string).collect();
            assert_eq!(html_lines(&report.html), text_lines);
            assert_eq!(
                text_lines,
                report_lines(&snapshot, &fee, &localized_date(now, taipei()))
            );
        }
    }

    #[test]
    fn test_negative_change_has_no_extra_prefix() {
        let lines = report_lines(&PriceSnapshot::new(60000.0, -4.5), &FeeEstimate::new(3, 2, 1), "d");
        assert_eq!(lines[1], "• 價格：$60,000.00（24h -4.50%）");
    }

    #[test]
    fn test_missing_upstream_values_render_placeholder() {
        let snapshot = PriceSnapshot {
            price: None,
            change_24h: Some(1.0),
        };
        let fee = FeeEstimate {
            fastest: Some(8),
            half_hour: None,
            hour: Some(2),
        };
        let lines = report_lines(&snapshot, &fee, "d");
        assert_eq!(lines[1], "• 價格：$N/A（24h +1.00%）");
        assert_eq!(lines[2], "• 手續費建議：fast 8 / halfHour N/A / hour 2 sats/vB");
    }

    #[test]
    fn test_link_blocks() {
        let report = sample_report();

        assert!(report.text.contains("\n\n🔗 追蹤連結：\n• Farside ETF 面板: https://farside.co.uk/btc/\n"));
        assert!(report.text.ends_with("• mempool.space: https://mempool.space/"));
        assert_eq!(report.html.matches("<li><a href=").count(), 4);
        assert!(report.html.contains("<a href=\"https://www.coingecko.com/en/coins/bitcoin\">CoinGecko：BTC 詳情</a>"));
    }
}
