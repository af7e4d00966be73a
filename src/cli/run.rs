//! CLI flow dispatch: template listing, TOTP modes, generation, stores.

use std::process;

use rand::thread_rng;

use super::args::Cli;
use super::{prompts, quiet};
use crate::error::Result;
use crate::output;
use crate::pass::strength::{self, Analysis, Strength};
use crate::pass::{GenerateRequest, PasswordClass, PolicyConstraint, generate_batch, template};
use crate::store::{AwsStore, KeychainStore, SecretStore, VaultStore};
use crate::totp::{self, TotpParams, build_otpauth_uri, current_and_next, parse_otpauth_uri};
use crate::{clipboard, qr};

/// Print a usage error and exit 1.
fn fail(msg: &str) -> ! {
    prompts::error(msg);
    process::exit(1);
}

pub fn run(cli: Cli) -> Result<()> {
    quiet::set(cli.quiet);

    if cli.list_templates {
        list_templates();
        return Ok(());
    }

    if cli.class == PasswordClass::Custom && cli.custom_charset.is_empty() {
        fail("Custom charset must be provided when using --type custom");
    }

    // Template values land on top of the explicit flags.
    let mut length = cli.length;
    let mut policy = PolicyConstraint::new(
        cli.min_upper,
        cli.min_lower,
        cli.min_digit,
        cli.min_special,
    );
    let mut no_similar = cli.no_similar;
    let mut exclude = cli.exclude.clone();

    if let Some(name) = &cli.template {
        let template = template::resolve(name)?;
        length = template.length;
        policy = PolicyConstraint::new(
            template.min_upper,
            template.min_lower,
            template.min_digit,
            template.min_special,
        );
        if let Some(flag) = template.no_similar {
            no_similar = flag;
        }
        if let Some(chars) = template.exclude {
            exclude = chars.to_string();
        }
    }

    let key_names: Option<Vec<String>> = cli.kv.as_deref().and_then(split_key_names);
    let count = key_names.as_ref().map_or(cli.count, Vec::len);

    if cli.save_aws && cli.aws_secret_name.is_none() {
        fail("--aws-secret-name is required when using --save-aws");
    }
    if cli.save_keychain
        && key_names.is_none()
        && cli.keychain_account.is_none()
        && cli.totp_code.is_none()
        && !cli.totp
    {
        fail("--keychain-account is required when using --save-keychain for single passwords");
    }
    if cli.save_vault && cli.vault_path.is_none() {
        fail("--vault-path is required when using --save-vault");
    }

    if cli.totp {
        return totp_setup(&cli);
    }
    if let Some(input) = cli.totp_code.clone() {
        return totp_reader(&cli, &input);
    }

    let request = GenerateRequest {
        length,
        count,
        class: cli.class,
        special_chars: cli.special.clone(),
        exclude_chars: exclude,
        no_similar,
        policy,
        custom_charset: cli.custom_charset.clone(),
        api_format: cli.api_format,
    };

    generate(&cli, &request, key_names.as_deref())
}

/// `--kv` names: comma-separated, whitespace-trimmed, interior empties
/// kept so the count still matches what the user wrote. An empty value
/// turns kv mode off entirely, same as leaving the flag out.
fn split_key_names(kv: &str) -> Option<Vec<String>> {
    if kv.is_empty() {
        return None;
    }
    Some(kv.split(',').map(|name| name.trim().to_string()).collect())
}

fn list_templates() {
    prompts::line_bold(prompts::GREEN, "Available Compliance Templates");
    println!();

    for template in &template::TEMPLATES {
        prompts::line_bold(prompts::CYAN, &format!("  {}", template.name));
        println!("    {}", template.description);
        println!(
            "    Length: {} chars | Requirements: {}",
            template.length,
            template.requirements_summary()
        );
        if template.no_similar == Some(true) {
            println!("    Excludes similar characters (i, l, 1, L, o, 0, O)");
        }
        println!("    Usage: passmint --template {}", template.name);
        println!();
    }
}

fn totp_setup(cli: &Cli) -> Result<()> {
    let Some(account) = cli.totp_account.as_deref() else {
        fail("--totp-account is required when using --totp (e.g., --totp-account user@example.com)");
    };

    prompts::banner("Passmint - TOTP Secret Generator");
    if !quiet::enabled() {
        prompts::line(prompts::CYAN, &format!("Issuer:  {}", cli.totp_issuer));
        prompts::line(prompts::CYAN, &format!("Account: {account}"));
        println!();
    }

    let secret = totp::code::generate_secret(&mut thread_rng());
    let uri = build_otpauth_uri(&cli.totp_issuer, account, &secret);

    if !quiet::enabled() {
        println!("{}", qr::render(&uri)?);
        prompts::success(
            "Scan the QR code above with Google Authenticator, Authy, or any TOTP app",
        );
        println!();
        prompts::line(prompts::YELLOW, "Manual entry (if QR scan fails):");
        println!("  Secret: {secret}");
        println!("  Type: Time-based (TOTP)");
        println!("  Algorithm: SHA1");
        println!("  Digits: 6");
        println!("  Period: 30 seconds");
    }

    if cli.save_keychain {
        save_totp_secret(cli, account, &secret);
    }

    if let Some(path) = &cli.output_file {
        let details = serde_json::json!({
            "issuer": cli.totp_issuer,
            "account": account,
            "secret": secret,
            "uri": uri,
        });
        std::fs::write(path, serde_json::to_string_pretty(&details)?)?;
        prompts::success(&format!("TOTP details saved to {}", path.display()));
    }

    Ok(())
}

fn totp_reader(cli: &Cli, input: &str) -> Result<()> {
    let mut secret = input.to_string();
    let mut issuer = String::new();
    let mut account = String::new();
    let mut params = TotpParams::default();

    if input.starts_with("otpauth://") {
        let parsed = parse_otpauth_uri(input)?;
        secret = parsed.secret;
        issuer = parsed.issuer;
        account = parsed.account;
        params = parsed.params;
    }

    let (current, next) = current_and_next(&secret, &params)?;

    if quiet::enabled() {
        println!("{}", current.code);
    } else {
        prompts::banner("Passmint - TOTP Code Reader");

        if !issuer.is_empty() || !account.is_empty() {
            if !issuer.is_empty() {
                prompts::line(prompts::CYAN, &format!("Issuer:  {issuer}"));
            }
            if !account.is_empty() {
                prompts::line(prompts::CYAN, &format!("Account: {account}"));
            }
            println!();
        }

        prompts::line_bold(prompts::CYAN, &format!("TOTP Code: {}", current.code));
        prompts::line(
            remaining_color(current.remaining),
            &format!("Valid for: {} seconds", current.remaining),
        );
        prompts::line(prompts::BLUE, &format!("Next code: {}", next.code));
    }

    if cli.copy {
        match clipboard::copy(&current.code) {
            Ok(()) => prompts::success("TOTP code copied to clipboard!"),
            Err(err) => fail(&err.to_string()),
        }
    }

    if cli.save_keychain {
        let entry_account = if account.is_empty() {
            cli.keychain_account
                .clone()
                .unwrap_or_else(|| String::from("totp-secret"))
        } else {
            account
        };
        save_totp_secret(cli, &entry_account, &secret);
    }

    Ok(())
}

/// Green while comfortable, yellow when close, red in the last seconds.
fn remaining_color(remaining: u64) -> &'static str {
    if remaining >= 10 {
        prompts::GREEN
    } else if remaining >= 5 {
        prompts::YELLOW
    } else {
        prompts::RED
    }
}

/// Keychain save shared by both TOTP flows. Failures are reported but
/// do not abort; the secret was already shown.
fn save_totp_secret(cli: &Cli, account: &str, secret: &str) {
    let store = KeychainStore::new(&cli.keychain_service, account);
    match store.save(secret) {
        Ok(()) => prompts::success(&format!(
            "TOTP secret saved to keychain: {}/{}",
            store.service(),
            store.account()
        )),
        Err(err) => prompts::error(&format!("Failed to save to keychain: {err}")),
    }
}

fn generate(cli: &Cli, request: &GenerateRequest, key_names: Option<&[String]>) -> Result<()> {
    prompts::banner("Passmint - Enhanced Random Password Generator");

    let passwords = generate_batch(&mut thread_rng(), request)?;
    let rendered = output::format(&passwords, cli.format, &cli.separator, key_names)?;

    if let Some(path) = &cli.output_file {
        std::fs::write(path, &rendered)?;
        prompts::success(&format!("Password(s) saved to {}", path.display()));
    } else {
        // Quiet mode still prints the passwords themselves.
        println!("{rendered}");
    }

    if cli.verbose && !quiet::enabled() {
        for password in &passwords {
            println!("{}", render_analysis(&strength::analyze(password)));
        }
    }

    if cli.copy {
        if passwords.len() > 1 {
            prompts::warn("Multiple passwords generated. Only the first will be copied to clipboard.");
        }
        match clipboard::copy(&passwords[0]) {
            Ok(()) => prompts::success("Password copied to clipboard!"),
            Err(err) => fail(&err.to_string()),
        }
    }

    if cli.qr {
        if passwords.len() > 1 {
            prompts::warn("Multiple passwords generated. Only showing QR code for the first.");
        }
        if !quiet::enabled() {
            prompts::line_bold(prompts::BLUE, "\nQR Code:");
        }
        println!("{}", qr::render(&passwords[0])?);
    }

    if cli.save_aws {
        if let Some(secret_name) = cli.aws_secret_name.as_deref() {
            save_aws(cli, secret_name, &passwords, key_names);
        }
    }
    if cli.save_keychain {
        save_keychain(cli, &passwords, key_names);
    }
    if cli.save_vault {
        if let Some(vault_path) = cli.vault_path.as_deref() {
            save_vault(cli, vault_path, &passwords, key_names);
        }
    }

    Ok(())
}

fn pair_up(names: &[String], passwords: &[String]) -> Vec<(String, String)> {
    names
        .iter()
        .cloned()
        .zip(passwords.iter().cloned())
        .collect()
}

fn save_aws(cli: &Cli, secret_name: &str, passwords: &[String], key_names: Option<&[String]>) {
    let store = match AwsStore::new(secret_name, &cli.aws_region, cli.aws_profile.as_deref()) {
        Ok(store) => store,
        Err(err) => fail(&format!("AWS integration error: {err}")),
    };

    if let Some(names) = key_names.filter(|_| passwords.len() > 1) {
        match store.save_many(&pair_up(names, passwords)) {
            Ok(_) => prompts::success(&format!(
                "Secrets saved to AWS Secrets Manager: {}",
                store.secret_name()
            )),
            Err(err) => {
                log::debug!("aws batch write failed: {err}");
                fail("Failed to save secrets to AWS Secrets Manager");
            }
        }
    } else {
        match store.save(&passwords[0]) {
            Ok(()) => prompts::success(&format!(
                "Secret saved to AWS Secrets Manager: {}",
                store.secret_name()
            )),
            Err(err) => {
                log::debug!("aws write failed: {err}");
                fail("Failed to save secret to AWS Secrets Manager");
            }
        }
    }
}

fn save_keychain(cli: &Cli, passwords: &[String], key_names: Option<&[String]>) {
    if let Some(names) = key_names.filter(|_| passwords.len() > 1) {
        let store = KeychainStore::new(&cli.keychain_service, "");
        match store.save_many(&pair_up(names, passwords)) {
            Ok(written) if written == passwords.len() => {
                prompts::success(&format!(
                    "All {} secrets saved to OS keychain",
                    passwords.len()
                ));
            }
            Ok(written) => {
                fail(&format!(
                    "Only {written}/{} secrets saved to keychain",
                    passwords.len()
                ));
            }
            Err(err) => {
                log::debug!("keychain batch write failed: {err}");
                fail("Failed to save secrets to OS keychain");
            }
        }
    } else {
        // With --kv and a single name the pair name doubles as account.
        let account = cli
            .keychain_account
            .as_deref()
            .or_else(|| key_names.and_then(|names| names.first().map(String::as_str)));
        let Some(account) = account else {
            return;
        };

        let store = KeychainStore::new(&cli.keychain_service, account);
        match store.save(&passwords[0]) {
            Ok(()) => prompts::success(&format!(
                "Secret saved to OS keychain: {}/{}",
                store.service(),
                store.account()
            )),
            Err(err) => {
                log::debug!("keychain write failed: {err}");
                fail("Failed to save secret to OS keychain");
            }
        }
    }
}

fn save_vault(cli: &Cli, vault_path: &str, passwords: &[String], key_names: Option<&[String]>) {
    let token = std::env::var("VAULT_TOKEN").unwrap_or_default();
    if token.is_empty() {
        fail("VAULT_TOKEN environment variable not set. Please set it with: export VAULT_TOKEN=your-token");
    }

    let store = match VaultStore::new(&cli.vault_url, &token, vault_path) {
        Ok(store) => store,
        Err(err) => fail(&format!("Vault integration error: {err}")),
    };

    if let Some(names) = key_names.filter(|_| passwords.len() > 1) {
        match store.save_many(&pair_up(names, passwords)) {
            Ok(_) => prompts::success(&format!("Secrets saved to Vault: {}", store.path())),
            Err(err) => {
                log::debug!("vault batch write failed: {err}");
                fail("Failed to save secrets to Vault");
            }
        }
    } else {
        match store.save(&passwords[0]) {
            Ok(()) => prompts::success(&format!("Secret saved to Vault: {}", store.path())),
            Err(err) => {
                log::debug!("vault write failed: {err}");
                fail("Failed to save secret to Vault");
            }
        }
    }
}

fn render_analysis(analysis: &Analysis) -> String {
    let strength_color = match analysis.strength {
        Strength::VeryStrong | Strength::Strong => prompts::GREEN,
        Strength::Moderate => prompts::YELLOW,
        Strength::Weak => prompts::RED,
    };

    let mut lines = Vec::new();
    lines.push(format!(
        "\n{}{}Password Analysis:{}",
        prompts::BOLD,
        prompts::BLUE,
        prompts::RESET
    ));
    lines.push(format!(
        "\nPassword: {}{}{}",
        prompts::BOLD,
        analysis.password,
        prompts::RESET
    ));
    lines.push(format!(
        "Strength: {}{}{}{} (Score: {}/{})",
        prompts::BOLD,
        strength_color,
        analysis.strength.label(),
        prompts::RESET,
        analysis.score,
        analysis.max_score
    ));
    lines.push(format!("Entropy: {} bits", analysis.entropy_bits));
    lines.push(format!("Length: {} characters", analysis.length));

    let mut types: Vec<&str> = Vec::new();
    if analysis.character_types.lowercase {
        types.push("lowercase");
    }
    if analysis.character_types.uppercase {
        types.push("uppercase");
    }
    if analysis.character_types.digits {
        types.push("digits");
    }
    if analysis.character_types.special {
        types.push("special");
    }
    lines.push(format!("Character types: {}", types.join(", ")));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_names_trim_but_keep_interior_empties() {
        assert_eq!(
            split_key_names(" DB_PASS , API_KEY ,JWT").unwrap(),
            vec!["DB_PASS", "API_KEY", "JWT"]
        );
        assert_eq!(split_key_names("A,,B").unwrap(), vec!["A", "", "B"]);
    }

    #[test]
    fn empty_kv_value_disables_kv_mode() {
        assert_eq!(split_key_names(""), None);
    }

    #[test]
    fn pairing_stops_at_shorter_side() {
        let names = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let passwords = vec!["x".to_string(), "y".to_string()];
        let pairs = pair_up(&names, &passwords);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0], ("A".to_string(), "x".to_string()));
    }

    #[test]
    fn remaining_color_thresholds() {
        assert_eq!(remaining_color(30), prompts::GREEN);
        assert_eq!(remaining_color(10), prompts::GREEN);
        assert_eq!(remaining_color(9), prompts::YELLOW);
        assert_eq!(remaining_color(5), prompts::YELLOW);
        assert_eq!(remaining_color(4), prompts::RED);
        assert_eq!(remaining_color(0), prompts::RED);
    }

    #[test]
    fn analysis_rendering_lists_observed_types() {
        let rendered = render_analysis(&strength::analyze("Tr0ub4dor&3xyz"));
        assert!(rendered.contains("Password Analysis:"));
        assert!(rendered.contains("(Score: "));
        assert!(rendered.contains("/80)"));
        assert!(rendered.contains("Length: 14 characters"));
        assert!(rendered.contains("Character types: lowercase, uppercase, digits, special"));
    }

    #[test]
    fn numeric_only_analysis_has_single_type() {
        let rendered = render_analysis(&strength::analyze("84625917306142"));
        assert!(rendered.contains("Character types: digits"));
        assert!(!rendered.contains("lowercase"));
    }
}
