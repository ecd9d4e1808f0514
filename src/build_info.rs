//! Build metadata
//!
//! `build.rs` stamps each compile with a counter and a UTC timestamp. They
//! surface in the startup banner, the status tool and the outgoing
//! `User-Agent` sent to FoodData Central.

use std::fmt;

use serde::Serialize;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Where candidate foods come from
pub const DATA_SOURCE: &str = "USDA FoodData Central";

const BANNER_RULE: &str = "===============================================";

/// Identity of this binary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildInfo {
    pub name: &'static str,
    pub version: &'static str,
    /// 0 when the build script did not run
    pub build_number: u64,
    pub build_timestamp: &'static str,
    pub data_source: &'static str,
}

impl BuildInfo {
    pub fn current() -> Self {
        Self::from_stamps(
            option_env!("RN_BUILD_NUMBER"),
            option_env!("RN_BUILD_TIMESTAMP"),
        )
    }

    /// Build info from raw build-script stamps; garbage counts as unstamped
    fn from_stamps(number: Option<&str>, timestamp: Option<&'static str>) -> Self {
        Self {
            name: NAME,
            version: VERSION,
            build_number: number.and_then(|n| n.trim().parse().ok()).unwrap_or(0),
            build_timestamp: timestamp.filter(|t| !t.is_empty()).unwrap_or("unknown"),
            data_source: DATA_SOURCE,
        }
    }

    /// `User-Agent` header for outgoing lookups
    pub fn user_agent(&self) -> String {
        format!("{}/{}+build.{}", self.name, self.version, self.build_number)
    }

    pub fn banner_lines(&self) -> Vec<String> {
        vec![
            BANNER_RULE.to_string(),
            "  Recipe Nutrition Estimator".to_string(),
            format!("  Version: {} | Build: {}", self.version, self.build_number),
            format!("  Compiled: {}", self.build_timestamp),
            format!("  Foods: {}", self.data_source),
            BANNER_RULE.to_string(),
        ]
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} (build {}, {})", self.name, self.version, self.build_number, self.build_timestamp)
    }
}

/// Print the startup banner to stderr
pub fn print_startup_banner() {
    for line in BuildInfo::current().banner_lines() {
        eprintln!("{}", line);
    }
}
