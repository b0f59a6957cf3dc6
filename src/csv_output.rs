//! CSV output format for summary tables
//!
//! Two tables in one document: the capability table, a blank line, then the
//! efficiency table with a `tipping_point` column.

use crate::report::AnalysisReport;

/// CSV output formatter
#[derive(Debug)]
pub struct CsvOutput<'a> {
    report: &'a AnalysisReport,
}

impl<'a> CsvOutput<'a> {
    pub fn new(report: &'a AnalysisReport) -> Self {
        Self { report }
    }

    /// Escape CSV field (handle commas, quotes, newlines)
    fn escape_field(field: &str) -> String {
        if field.contains(',') || field.contains('"') || field.contains('\n') {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }

    /// Capability table as CSV
    pub fn capability_csv(&self) -> String {
        let mut output = String::from("threads,ops_per_sec_mean,ops_per_sec_std,samples\n");
        for row in &self.report.aggregation.capability {
            output.push_str(&format!(
                "{},{},{},{}\n",
                row.threads, row.ops_per_sec_mean, row.ops_per_sec_std, row.samples
            ));
        }
        output
    }

    /// Efficiency table as CSV
    pub fn efficiency_csv(&self) -> String {
        let mut output = String::from(
            "block_size,bw_mib_s_mean,bw_mib_s_std,p99_lat_us_mean,p99_lat_us_std,samples,tipping_point\n",
        );
        for row in &self.report.aggregation.efficiency {
            let tipping = row.p99_lat_us_mean > self.report.threshold_us;
            output.push_str(&format!(
                "{},{},{},{},{},{},{}\n",
                Self::escape_field(&row.block_size),
                row.bw_mib_s_mean,
                row.bw_mib_s_std,
                row.p99_lat_us_mean,
                row.p99_lat_us_std,
                row.samples,
                tipping
            ));
        }
        output
    }

    /// Generate CSV output as string
    pub fn to_csv(&self) -> String {
        let mut output = self.capability_csv();
        output.push('\n');
        output.push_str(&self.efficiency_csv());
        output
    }
}
