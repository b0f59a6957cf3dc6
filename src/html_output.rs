//! HTML output format for analysis reports
//!
//! Styled summary tables with tipping-point rows highlighted and embedded CSS

use crate::report::AnalysisReport;

/// HTML output formatter
#[derive(Debug)]
pub struct HtmlOutput<'a> {
    report: &'a AnalysisReport,
}

impl<'a> HtmlOutput<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self { report }
    }

    /// Escape HTML special characters to prevent XSS
    fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Generate embedded CSS styles
    fn generate_styles() -> &'static str {
        r#"
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            margin: 20px;
            background-color: #f5f5f5;
        }
        h1, h2 {
            color: #333;
        }
        table {
            border-collapse: collapse;
            width: 100%;
            background-color: white;
            box-shadow: 0 1px 3px rgba(0,0,0,0.1);
            margin-bottom: 20px;
        }
        th, td {
            border: 1px solid #ddd;
            padding: 8px;
            text-align: right;
        }
        th {
            background-color: #4a90d9;
            color: white;
            font-weight: bold;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        .key {
            font-family: monospace;
            font-weight: bold;
            text-align: left;
        }
        .tipping {
            background-color: #fbe3e3 !important;
            color: #cc0000;
        }
        .summary {
            font-size: 1.1em;
            margin-bottom: 10px;
        }
        .footer {
            margin-top: 20px;
            font-size: 0.8em;
            color: #888;
            text-align: center;
        }
        "#
    }

    fn render_capability(&self) -> String {
        let rows = &self.report.aggregation.capability;
        if rows.is_empty() {
            return String::new();
        }

        let mut html = String::new();
        html.push_str("    <h2>Capability Sweep</h2>\n");
        html.push_str("    <table>\n");
        html.push_str("        <tr><th>Threads</th><th>ops/s (mean)</th><th>ops/s (std)</th><th>Runs</th></tr>\n");
        for row in rows {
            html.push_str(&format!(
                "        <tr><td class=\"key\">{}</td><td>{:.2}</td><td>{:.2}</td><td>{}</td></tr>\n",
                row.threads, row.ops_per_sec_mean, row.ops_per_sec_std, row.samples
            ));
        }
        html.push_str("    </table>\n");
        html
    }

    fn render_efficiency(&self) -> String {
        let rows = &self.report.aggregation.efficiency;
        if rows.is_empty() {
            return String::new();
        }

        let mut html = String::new();
        html.push_str("    <h2>Efficiency Sweep</h2>\n");
        html.push_str("    <table>\n");
        html.push_str("        <tr><th>Block size</th><th>MiB/s (mean)</th><th>MiB/s (std)</th><th>p99 µs (mean)</th><th>p99 µs (std)</th><th>Runs</th></tr>\n");
        for row in rows {
            let class = if row.p99_lat_us_mean > self.report.threshold_us {
                " class=\"tipping\""
            } else {
                ""
            };
            html.push_str(&format!(
                "        <tr{}><td class=\"key\">{}</td><td>{:.2}</td><td>{:.2}</td><td>{:.1}</td><td>{:.1}</td><td>{}</td></tr>\n",
                class,
                Self::escape_html(&row.block_size),
                row.bw_mib_s_mean,
                row.bw_mib_s_std,
                row.p99_lat_us_mean,
                row.p99_lat_us_std,
                row.samples
            ));
        }
        html.push_str("    </table>\n");
        html
    }

    fn render_tipping(&self) -> String {
        let mut html = String::new();
        html.push_str("    <h2>Tipping Points</h2>\n");
        html.push_str(&format!(
            "    <p>{}</p>\n",
            Self::escape_html(&self.report.tipping_heading())
        ));
        let lines = self.report.tipping_lines();
        if !lines.is_empty() {
            html.push_str("    <ul>\n");
            for line in lines {
                html.push_str(&format!("        <li>{}</li>\n", Self::escape_html(&line)));
            }
            html.push_str("    </ul>\n");
        }
        html
    }

    /// Generate complete HTML document
    pub fn to_html(&self) -> String {
        let mut html = String::new();

        html.push_str("<!DOCTYPE html>\n");
        html.push_str("<html lang=\"en\">\n");

        html.push_str("<head>\n");
        html.push_str("    <meta charset=\"UTF-8\">\n");
        html.push_str(
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
        );
        html.push_str("    <title>Assurance Harness Report</title>\n");
        html.push_str("    <style>");
        html.push_str(Self::generate_styles());
        html.push_str("</style>\n");
        html.push_str("</head>\n");

        html.push_str("<body>\n");
        html.push_str("    <h1>Benchmark Sweep Report</h1>\n");
        html.push_str(&format!(
            "    <div class=\"summary\">{} run(s) for {}</div>\n",
            self.report.run_count(),
            Self::escape_html(&self.report.label)
        ));

        html.push_str(&self.render_capability());
        html.push_str(&self.render_efficiency());
        html.push_str(&self.render_tipping());

        html.push_str("    <div class=\"footer\">\n");
        html.push_str("        Generated by Assurance Harness\n");
        html.push_str("    </div>\n");

        html.push_str("</body>\n");
        html.push_str("</html>\n");

        html
    }
}
