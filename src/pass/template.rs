//! Predefined password policies for common compliance standards.

use crate::error::{Error, Result};

/// A named policy bundling length, per-class minimums, and charset filters.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub name: &'static str,
    pub length: usize,
    pub min_upper: usize,
    pub min_lower: usize,
    pub min_digit: usize,
    pub min_special: usize,
    /// `None` leaves the caller's similar-character choice untouched.
    pub no_similar: Option<bool>,
    /// Characters the policy removes on top of the class defaults.
    pub exclude: Option<&'static str>,
    pub description: &'static str,
}

pub const TEMPLATES: [Template; 7] = [
    Template {
        name: "nist-800-63b",
        length: 12,
        min_upper: 1,
        min_lower: 1,
        min_digit: 1,
        min_special: 1,
        no_similar: Some(true),
        exclude: None,
        description: "NIST 800-63B standard - US federal systems, enterprise compliance",
    },
    Template {
        name: "pci-dss",
        length: 12,
        min_upper: 1,
        min_lower: 1,
        min_digit: 1,
        min_special: 1,
        no_similar: Some(false),
        exclude: None,
        description: "PCI DSS standard - Payment systems, credit card processing",
    },
    Template {
        name: "owasp",
        length: 14,
        min_upper: 2,
        min_lower: 2,
        min_digit: 2,
        min_special: 2,
        no_similar: Some(true),
        exclude: None,
        description: "OWASP guidelines - Web applications, API authentication",
    },
    Template {
        name: "high-security",
        length: 20,
        min_upper: 3,
        min_lower: 3,
        min_digit: 3,
        min_special: 3,
        no_similar: Some(true),
        exclude: None,
        description: "Maximum security - Admin accounts, root passwords, master keys",
    },
    Template {
        name: "user-friendly",
        length: 12,
        min_upper: 1,
        min_lower: 1,
        min_digit: 1,
        min_special: 0,
        no_similar: Some(true),
        exclude: Some("!@#$%^&*()_+-=[]{}|;:,.<>?"),
        description: "Easy to type - End users, temporary accounts, shared devices",
    },
    Template {
        name: "database",
        length: 16,
        min_upper: 2,
        min_lower: 2,
        min_digit: 2,
        min_special: 1,
        no_similar: None,
        exclude: Some("\"'\\`"),
        description: "SQL-safe - Database connections, avoids quotes/backslashes",
    },
    Template {
        name: "wifi",
        length: 16,
        min_upper: 2,
        min_lower: 2,
        min_digit: 2,
        min_special: 0,
        no_similar: Some(true),
        exclude: Some("!@#$%^&*()_+-=[]{}|;:,.<>?"),
        description: "WiFi networks - Easy to type on phones, no special characters",
    },
];

/// Look up a template by name. The error lists every known name so the
/// caller can print it verbatim.
pub fn resolve(name: &str) -> Result<&'static Template> {
    TEMPLATES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| Error::UnknownTemplate {
            name: name.to_string(),
            available: TEMPLATES
                .iter()
                .map(|t| t.name)
                .collect::<Vec<_>>()
                .join(", "),
        })
}

impl Template {
    /// Short requirements line for template listings, e.g.
    /// `2+ uppercase, 2+ lowercase, 2+ digits`.
    pub fn requirements_summary(&self) -> String {
        let mut reqs: Vec<String> = Vec::new();
        if self.min_upper > 0 {
            reqs.push(format!("{}+ uppercase", self.min_upper));
        }
        if self.min_lower > 0 {
            reqs.push(format!("{}+ lowercase", self.min_lower));
        }
        if self.min_digit > 0 {
            reqs.push(format!("{}+ digits", self.min_digit));
        }
        if self.min_special > 0 {
            reqs.push(format!("{}+ special", self.min_special));
        }
        if reqs.is_empty() {
            "flexible".to_string()
        } else {
            reqs.join(", ")
        }
    }
}
