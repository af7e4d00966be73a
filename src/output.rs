//! Batch output encodings.
//!
//! Values are embedded verbatim; none of the encodings escape quotes or
//! shell metacharacters inside a password.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{Error, Result};

/// Wire format selected with `-f/--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Plain,
    Json,
    Csv,
    Env,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Env => "env",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "plain" => Ok(OutputFormat::Plain),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "env" => Ok(OutputFormat::Env),
            other => Err(Error::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Serialize)]
struct PasswordRecord<'a> {
    id: usize,
    password: &'a str,
}

/// Encode a batch for output. `key_names` pairs each password with a
/// name; when present it must be at least as long as `passwords`.
///
/// The separator only applies to unnamed plain output. Named plain
/// output is always one `name: value` line per password.
pub fn format(
    passwords: &[String],
    format: OutputFormat,
    separator: &str,
    key_names: Option<&[String]>,
) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(match key_names {
            Some(names) => passwords
                .iter()
                .zip(names)
                .map(|(pwd, name)| format!("{name}: {pwd}"))
                .collect::<Vec<_>>()
                .join("\n"),
            None => passwords.join(separator),
        }),
        OutputFormat::Json => match key_names {
            Some(names) => {
                let mut data = serde_json::Map::new();
                for (pwd, name) in passwords.iter().zip(names) {
                    data.insert(name.clone(), serde_json::Value::String(pwd.clone()));
                }
                Ok(serde_json::to_string_pretty(&data)?)
            }
            None => {
                let records: Vec<PasswordRecord> = passwords
                    .iter()
                    .enumerate()
                    .map(|(i, pwd)| PasswordRecord {
                        id: i + 1,
                        password: pwd,
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&records)?)
            }
        },
        OutputFormat::Csv => {
            let mut lines: Vec<String> = Vec::with_capacity(passwords.len() + 1);
            match key_names {
                Some(names) => {
                    lines.push("key,value".to_string());
                    for (pwd, name) in passwords.iter().zip(names) {
                        lines.push(format!("\"{name}\",\"{pwd}\""));
                    }
                }
                None => {
                    lines.push("id,password".to_string());
                    for (i, pwd) in passwords.iter().enumerate() {
                        lines.push(format!("{},\"{}\"", i + 1, pwd));
                    }
                }
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Env => {
            let lines: Vec<String> = match key_names {
                Some(names) => passwords
                    .iter()
                    .zip(names)
                    .map(|(pwd, name)| format!("{name}=\"{pwd}\""))
                    .collect(),
                None => passwords
                    .iter()
                    .enumerate()
                    .map(|(i, pwd)| format!("PASSWORD_{}=\"{}\"", i + 1, pwd))
                    .collect(),
            };
            Ok(lines.join("\n"))
        }
    }
}
