//! Architecture discovery for the benchmark runner
//!
//! The runner stamps every result document with this metadata. Setting
//! `MOCK_S390X=true` pretends to be an IBM Z so mainframe reports can be
//! exercised on commodity hardware.

use crate::record::Metadata;
use serde::{Deserialize, Serialize};

/// Environment variable that forces the mocked s390x identity
pub const MOCK_S390X_ENV: &str = "MOCK_S390X";

/// Identity of the machine a run executes on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArchDetails {
    pub isa: String,
    #[serde(rename = "type")]
    pub system_type: String,
    pub is_enterprise: bool,
}

impl ArchDetails {
    fn new(isa: &str, system_type: &str, is_enterprise: bool) -> Self {
        Self {
            isa: isa.to_string(),
            system_type: system_type.to_string(),
            is_enterprise,
        }
    }

    /// Map a machine architecture name to its harness identity
    pub fn from_machine(machine: &str) -> Self {
        let machine = machine.to_lowercase();
        match machine.as_str() {
            "x86_64" => Self::new("x86_64", "Consumer Laptop", false),
            "aarch64" => Self::new("arm64", "Raspberry Pi 5", false),
            "s390x" => Self::new("s390x", "IBM Z Mainframe", true),
            other => Self::new(other, "Unknown", false),
        }
    }

    pub fn mocked_s390x() -> Self {
        Self::new("s390x", "Mocked IBM Z", true)
    }
}

impl From<ArchDetails> for Metadata {
    fn from(details: ArchDetails) -> Self {
        Metadata::new()
            .with("isa", details.isa)
            .with("type", details.system_type)
            .with("is_enterprise", details.is_enterprise)
    }
}

/// Whether a `MOCK_S390X` value enables the mock
fn mock_enabled(value: Option<&str>) -> bool {
    value.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

/// Detect the current machine, honoring `MOCK_S390X`
pub fn detect_arch() -> ArchDetails {
    let mock = std::env::var(MOCK_S390X_ENV).ok();
    if mock_enabled(mock.as_deref()) {
        return ArchDetails::mocked_s390x();
    }
    ArchDetails::from_machine(std::env::consts::ARCH)
}
