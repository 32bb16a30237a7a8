//! User-entered fault-code identifiers.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DiagnosisError, Result};

/// A J1587-style fault code: module, parameter or subsystem, failure mode.
///
/// Real codes carry either a PID or a SID; the type does not enforce that.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FaultCodeData {
    /// Module identifier (required)
    pub mid: String,
    /// Parameter identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pid: Option<String>,
    /// Subsystem identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    /// Failure mode identifier (required)
    pub fmi: String,
}

impl FaultCodeData {
    pub fn new(mid: impl Into<String>, fmi: impl Into<String>) -> Self {
        FaultCodeData {
            mid: mid.into(),
            pid: None,
            sid: None,
            fmi: fmi.into(),
        }
    }

    pub fn with_pid(mut self, pid: impl Into<String>) -> Self {
        self.pid = Some(pid.into());
        self
    }

    pub fn with_sid(mut self, sid: impl Into<String>) -> Self {
        self.sid = Some(sid.into());
        self
    }

    /// Render as `MID <mid> [PID <pid> | SID <sid>] FMI <fmi>`.
    ///
    /// PID wins when both are set. Blank identifiers are skipped.
    pub fn code_string(&self) -> String {
        let middle = match (non_blank(&self.pid), non_blank(&self.sid)) {
            (Some(pid), _) => Some(("PID", pid)),
            (None, Some(sid)) => Some(("SID", sid)),
            (None, None) => None,
        };

        let mut parts = vec![format!("MID {}", self.mid.trim())];
        if let Some((label, value)) = middle {
            parts.push(format!("{} {}", label, value));
        }
        parts.push(format!("FMI {}", self.fmi.trim()));
        parts.join(" ")
    }

    /// Extract identifiers from free text such as `"MID 128 SID 232 FMI 3"`
    /// or `"mid128 pid100 fmi4"`.
    ///
    /// The first occurrence of each label wins. MID and FMI are required.
    pub fn parse(text: &str) -> Result<Self> {
        let pattern = code_pattern()?;

        let mut mid = None;
        let mut pid = None;
        let mut sid = None;
        let mut fmi = None;
        for caps in pattern.captures_iter(text) {
            let value = caps[2].to_string();
            if value.len() > MAX_ID_DIGITS {
                return Err(DiagnosisError::InvalidFaultCode(format!(
                    "{} {} is longer than {} digits",
                    caps[1].to_ascii_uppercase(),
                    value,
                    MAX_ID_DIGITS
                )));
            }
            let slot = match caps[1].to_ascii_uppercase().as_str() {
                "MID" => &mut mid,
                "PID" => &mut pid,
                "SID" => &mut sid,
                _ => &mut fmi,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        let mid = mid.ok_or_else(|| {
            DiagnosisError::InvalidFaultCode(format!("no MID in {:?}", text))
        })?;
        let fmi = fmi.ok_or_else(|| {
            DiagnosisError::InvalidFaultCode(format!("no FMI in {:?}", text))
        })?;
        Ok(FaultCodeData { mid, pid, sid, fmi })
    }
}

impl std::fmt::Display for FaultCodeData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code_string())
    }
}

impl std::str::FromStr for FaultCodeData {
    type Err = DiagnosisError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Longest identifier accepted by [`FaultCodeData::parse`].
const MAX_ID_DIGITS: usize = 5;

fn code_pattern() -> Result<&'static Regex> {
    static PATTERN: OnceLock<std::result::Result<Regex, regex::Error>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)(MID|PID|SID|FMI)\s*[:#=-]?\s*(\d+)"))
        .as_ref()
        .map_err(|e| DiagnosisError::InvalidFaultCode(e.to_string()))
}
