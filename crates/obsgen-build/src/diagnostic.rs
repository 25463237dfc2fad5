use derive_more::Display;
use obsgen_schema::{manifest::Location, types::Flavor};
use std::fmt;

/// Reported when a batch produced no unit at all.
pub const EVENTS_NOT_FOUND: &str = "OBS001";

///
/// Severity
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Severity {
    #[display("warning")]
    Warning,
}

///
/// Diagnostic
/// Advisory for the host to report; never aborts generation.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Diagnostic {
    pub id: &'static str,
    pub severity: Severity,
    pub message: String,
    pub location: Location,
}

impl Diagnostic {
    #[must_use]
    pub fn events_not_found(flavor: Flavor, location: Location) -> Self {
        let kind = if flavor.is_static() { "static " } else { "" };

        Self {
            id: EVENTS_NOT_FOUND,
            severity: Severity::Warning,
            message: format!("no {kind}events were found on the requested types"),
            location,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}: {}",
            self.location, self.severity, self.id, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_reads_like_a_compiler_warning() {
        let diagnostic = Diagnostic::events_not_found(Flavor::Static, Location::new("Program.cs(3,12)"));

        assert_eq!(
            diagnostic.to_string(),
            "Program.cs(3,12): warning OBS001: no static events were found on the requested types"
        );
        assert_eq!(
            Diagnostic::events_not_found(Flavor::Instance, Location::none()).to_string(),
            "<unknown>: warning OBS001: no events were found on the requested types"
        );
    }
}
