use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilingStatusCode {
    Single,
    MarriedFilingJointly,
}

impl FilingStatusCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::MarriedFilingJointly => "mfj",
        }
    }

    /// Human-readable form for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::MarriedFilingJointly => "Married Filing Jointly",
        }
    }

    /// Parses the user-facing key. Callers are expected to lowercase input
    /// read from a prompt first.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "single" => Some(Self::Single),
            "mfj" => Some(Self::MarriedFilingJointly),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_accepts_known_keys() {
        assert_eq!(
            FilingStatusCode::parse("single"),
            Some(FilingStatusCode::Single)
        );
        assert_eq!(
            FilingStatusCode::parse("mfj"),
            Some(FilingStatusCode::MarriedFilingJointly)
        );
    }

    #[test]
    fn parse_rejects_unknown_keys() {
        assert_eq!(FilingStatusCode::parse("hoh"), None);
        assert_eq!(FilingStatusCode::parse(""), None);
    }

    #[test]
    fn as_str_round_trips_through_parse() {
        for status in [
            FilingStatusCode::Single,
            FilingStatusCode::MarriedFilingJointly,
        ] {
            assert_eq!(FilingStatusCode::parse(status.as_str()), Some(status));
        }
    }
}
