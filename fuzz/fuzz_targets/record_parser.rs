#![no_main]

use assurance_harness::{aggregate, ResultRecord};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Parsing and aggregating must never panic, whatever the document
        if let Ok(record) = ResultRecord::from_json_str(input) {
            let _ = aggregate(&[record]);
        }
    }
});
