//=====================================================================
// Typed error kinds for the transport core. Setup-time failures are
// fatal (propagated with `anyhow` context up to the CLI); history-time
// DomainErrors are caught at the per-history boundary and counted.
//=====================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("malformed ACE table '{table}' in block {block}")]
    FormatError { table: String, block: String },

    #[error("could not locate '{table}' in xsdir / file '{path}'")]
    LookupError { table: String, path: String },

    #[error("geometry error: {reason}")]
    GeometryError { reason: String },

    #[error("unsupported law {law} for MT={mt}")]
    UnsupportedLawError { mt: usize, law: usize },

    #[error("domain error: {reason}")]
    DomainError { reason: String },
}

impl TransportError {
    pub fn format(table: impl Into<String>, block: impl Into<String>) -> Self {
        Self::FormatError { table: table.into(), block: block.into() }
    }

    pub fn lookup(table: impl Into<String>, path: impl Into<String>) -> Self {
        Self::LookupError { table: table.into(), path: path.into() }
    }

    pub fn geometry(reason: impl Into<String>) -> Self {
        Self::GeometryError { reason: reason.into() }
    }

    pub fn unsupported_law(mt: usize, law: usize) -> Self {
        Self::UnsupportedLawError { mt, law }
    }

    pub fn domain(reason: impl Into<String>) -> Self {
        Self::DomainError { reason: reason.into() }
    }

    // Any NaN/Inf surfacing inside the hot loop is a DomainError, not a panic.
    pub fn check_finite(value: f64, what: &str) -> Result<f64, Self> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(Self::domain(format!("{what} is not finite: {value}")))
        }
    }
}

pub type Result<T> = std::result::Result<T, TransportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_finite() {
        assert!(TransportError::check_finite(1.0, "x").is_ok());
        assert!(TransportError::check_finite(f64::NAN, "x").is_err());
        assert!(TransportError::check_finite(f64::INFINITY, "x").is_err());
    }

    #[test]
    fn test_display() {
        let e = TransportError::unsupported_law(18, 999);
        assert_eq!(format!("{e}"), "unsupported law 999 for MT=18");
    }
}
