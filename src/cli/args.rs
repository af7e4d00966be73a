//! Command-line surface.

use std::path::PathBuf;

use clap::Parser;

use crate::output::OutputFormat;
use crate::pass::charset::DEFAULT_SPECIAL;
use crate::pass::generate::{MAX_LENGTH, MIN_LENGTH};
use crate::pass::{ApiKeyFormat, PasswordClass};

const EXAMPLES: &str = "\
Examples:
  passmint                                 Generate a 16-char secure password
  passmint -l 24 -c 5                      Five 24-char passwords
  passmint --template owasp                OWASP-compliant password
  passmint -t api-key --api-format hex     Hex API key
  passmint --kv \"DB_PASS,API_KEY\" -f env   Env-style secrets
  passmint --totp --totp-account user@example.com
  passmint --totp-code JBSWY3DPEHPK3PXP";

/// Generate cryptographically secure passwords, API keys, and TOTP secrets.
#[derive(Debug, Parser)]
#[command(name = "passmint", version, after_help = EXAMPLES)]
pub struct Cli {
    /// Password length (8-256)
    #[arg(short, long, default_value_t = 16, value_parser = parse_length)]
    pub length: usize,

    /// Number of passwords to generate
    #[arg(short, long, default_value_t = 1, value_parser = parse_count)]
    pub count: usize,

    /// Password type
    #[arg(short = 't', long = "type", value_enum, default_value = "strong")]
    pub class: PasswordClass,

    /// Custom special characters
    #[arg(short, long, default_value = DEFAULT_SPECIAL)]
    pub special: String,

    /// Exclude specific characters
    #[arg(short = 'x', long, default_value = "")]
    pub exclude: String,

    /// Exclude similar looking characters (il1Lo0O)
    #[arg(long)]
    pub no_similar: bool,

    /// Minimum uppercase letters
    #[arg(long, default_value_t = 0)]
    pub min_upper: usize,

    /// Minimum lowercase letters
    #[arg(long, default_value_t = 0)]
    pub min_lower: usize,

    /// Minimum digits
    #[arg(long, default_value_t = 0)]
    pub min_digit: usize,

    /// Minimum special characters
    #[arg(long, default_value_t = 0)]
    pub min_special: usize,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "plain")]
    pub format: OutputFormat,

    /// Separator for multiple passwords
    #[arg(long, default_value = "\n")]
    pub separator: String,

    /// Copy to clipboard
    #[arg(long)]
    pub copy: bool,

    /// Render the password as a terminal QR code (WiFi sharing etc.)
    #[arg(long)]
    pub qr: bool,

    /// Generate a TOTP secret for 2FA apps (Google Authenticator, Authy)
    #[arg(long)]
    pub totp: bool,

    /// Issuer name shown in the 2FA app (e.g. company name)
    #[arg(long, default_value = "passmint")]
    pub totp_issuer: String,

    /// Account name shown in the 2FA app (e.g. user@example.com)
    #[arg(long)]
    pub totp_account: Option<String>,

    /// Read the current TOTP code from a base32 secret or otpauth:// URI
    #[arg(long, value_name = "SECRET_OR_URI")]
    pub totp_code: Option<String>,

    /// Suppress all output except passwords
    #[arg(short, long)]
    pub quiet: bool,

    /// Show password strength analysis
    #[arg(short, long)]
    pub verbose: bool,

    /// Custom character set (use with --type custom)
    #[arg(long, default_value = "")]
    pub custom_charset: String,

    /// API key format (use with --type api-key)
    #[arg(long, value_enum, default_value = "alphanum")]
    pub api_format: ApiKeyFormat,

    /// Generate key-value pairs (comma-separated names): DB_PASSWORD,API_KEY
    #[arg(long, visible_alias = "key-value", value_name = "NAMES")]
    pub kv: Option<String>,

    /// Save to AWS Secrets Manager (requires AWS credentials)
    #[arg(long)]
    pub save_aws: bool,

    /// AWS secret name (required with --save-aws)
    #[arg(long)]
    pub aws_secret_name: Option<String>,

    /// AWS region
    #[arg(long, default_value = "us-east-1")]
    pub aws_region: String,

    /// AWS profile from ~/.aws/credentials; defaults to env or default profile
    #[arg(long)]
    pub aws_profile: Option<String>,

    /// Save to the OS keychain (macOS/Linux/Windows)
    #[arg(long)]
    pub save_keychain: bool,

    /// Keychain service name
    #[arg(long, default_value = "passmint")]
    pub keychain_service: String,

    /// Keychain account name (required with --save-keychain for single passwords)
    #[arg(long)]
    pub keychain_account: Option<String>,

    /// Save to HashiCorp Vault (token from VAULT_TOKEN)
    #[arg(long)]
    pub save_vault: bool,

    /// Vault KV v2 path (required with --save-vault)
    #[arg(long)]
    pub vault_path: Option<String>,

    /// Vault URL
    #[arg(long, default_value = "http://localhost:8200")]
    pub vault_url: String,

    /// Use a predefined password template/policy
    #[arg(long, value_name = "NAME")]
    pub template: Option<String>,

    /// List available password templates and exit
    #[arg(long)]
    pub list_templates: bool,

    /// Write output to this file instead of stdout
    #[arg(value_name = "OUTPUT_FILE")]
    pub output_file: Option<PathBuf>,
}

fn parse_length(raw: &str) -> Result<usize, String> {
    let value: usize = raw
        .parse()
        .map_err(|_| format!("Length must be between {MIN_LENGTH} and {MAX_LENGTH}"))?;
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&value) {
        return Err(format!(
            "Length must be between {MIN_LENGTH} and {MAX_LENGTH}"
        ));
    }
    Ok(value)
}

fn parse_count(raw: &str) -> Result<usize, String> {
    let value: usize = raw
        .parse()
        .map_err(|_| String::from("Count must be at least 1"))?;
    if value == 0 {
        return Err(String::from("Count must be at least 1"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_match_documented_values() {
        let cli = Cli::try_parse_from(["passmint"]).unwrap();
        assert_eq!(cli.length, 16);
        assert_eq!(cli.count, 1);
        assert_eq!(cli.class, PasswordClass::Strong);
        assert_eq!(cli.special, DEFAULT_SPECIAL);
        assert_eq!(cli.format, OutputFormat::Plain);
        assert_eq!(cli.separator, "\n");
        assert_eq!(cli.api_format, ApiKeyFormat::Alphanum);
        assert_eq!(cli.totp_issuer, "passmint");
        assert_eq!(cli.keychain_service, "passmint");
        assert_eq!(cli.aws_region, "us-east-1");
        assert_eq!(cli.vault_url, "http://localhost:8200");
        assert!(cli.output_file.is_none());
    }

    #[test]
    fn length_outside_range_is_rejected() {
        let err = Cli::try_parse_from(["passmint", "-l", "7"]).unwrap_err();
        assert!(err.to_string().contains("Length must be between 8 and 256"));
        let err = Cli::try_parse_from(["passmint", "-l", "257"]).unwrap_err();
        assert!(err.to_string().contains("Length must be between 8 and 256"));
        assert!(Cli::try_parse_from(["passmint", "-l", "256"]).is_ok());
    }

    #[test]
    fn zero_count_is_rejected() {
        let err = Cli::try_parse_from(["passmint", "-c", "0"]).unwrap_err();
        assert!(err.to_string().contains("Count must be at least 1"));
    }

    #[test]
    fn kv_long_alias_parses() {
        let cli = Cli::try_parse_from(["passmint", "--key-value", "A,B"]).unwrap();
        assert_eq!(cli.kv.as_deref(), Some("A,B"));
    }

    #[test]
    fn type_names_use_kebab_case() {
        let cli = Cli::try_parse_from(["passmint", "-t", "api-key", "--api-format", "url-safe"])
            .unwrap();
        assert_eq!(cli.class, PasswordClass::ApiKey);
        assert_eq!(cli.api_format, ApiKeyFormat::UrlSafe);
    }

    #[test]
    fn positional_output_file_parses() {
        let cli = Cli::try_parse_from(["passmint", "creds.txt"]).unwrap();
        assert_eq!(cli.output_file, Some(PathBuf::from("creds.txt")));
    }
}
