//! otpauth provisioning URIs in the Google Authenticator key-URI form:
//! `otpauth://totp/ISSUER:ACCOUNT?secret=BASE32&issuer=ISSUER`.

use url::Url;

use crate::error::{Error, Result};
use crate::totp::code::{Algorithm, TotpParams};

/// Everything a provisioning URI carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotpUri {
    pub secret: String,
    /// Empty when neither the label nor the query names an issuer.
    pub issuer: String,
    pub account: String,
    pub params: TotpParams,
}

/// Build the URI an authenticator app enrolls from. Issuer and account
/// are percent-encoded separately around a literal `:` label separator.
pub fn build_otpauth_uri(issuer: &str, account: &str, secret: &str) -> String {
    format!(
        "otpauth://totp/{}:{}?secret={}&issuer={}",
        url_encode(issuer),
        url_encode(account),
        secret,
        url_encode(issuer)
    )
}

/// Parse an otpauth URI back into its parts.
///
/// The label decodes to `issuer:account`; a query `issuer` wins over
/// the label prefix. Unparseable `algorithm`, `digits`, or `period`
/// values fall back to their defaults rather than failing the URI.
pub fn parse_otpauth_uri(uri: &str) -> Result<TotpUri> {
    let url = Url::parse(uri).map_err(|_| Error::InvalidUri(uri.to_string()))?;
    if url.scheme() != "otpauth" || url.host_str() != Some("totp") {
        return Err(Error::InvalidUri(uri.to_string()));
    }

    let path = url.path();
    let label = url_decode(path.strip_prefix('/').unwrap_or(path));

    let mut secret = None;
    let mut issuer = String::new();
    let mut params = TotpParams::default();

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "secret" if !value.is_empty() => secret = Some(value.to_string()),
            "issuer" => issuer = value.to_string(),
            "algorithm" => {
                if let Some(algorithm) = Algorithm::from_name(&value) {
                    params.algorithm = algorithm;
                }
            }
            "digits" => {
                if let Ok(digits) = value.parse::<u32>() {
                    if (6..=8).contains(&digits) {
                        params.digits = digits;
                    }
                }
            }
            "period" => {
                // A zero period would divide by zero at code time.
                if let Ok(period) = value.parse::<u64>() {
                    if period > 0 {
                        params.period = period;
                    }
                }
            }
            _ => {}
        }
    }

    let secret = secret.ok_or(Error::MissingSecret)?;

    let (label_issuer, account) = match label.split_once(':') {
        Some((prefix, rest)) => (Some(prefix.to_string()), rest.to_string()),
        None => (None, label),
    };
    if issuer.is_empty() {
        if let Some(prefix) = label_issuer {
            issuer = prefix;
        }
    }

    Ok(TotpUri {
        secret,
        issuer,
        account,
        params,
    })
}

/// Percent-encode everything but RFC 3986 unreserved characters.
fn url_encode(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for byte in s.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// Decode percent escapes byte-wise so multibyte UTF-8 survives.
/// Malformed escapes pass through literally.
fn url_decode(s: &str) -> String {
    fn hex_val(b: u8) -> Option<u8> {
        match b {
            b'0'..=b'9' => Some(b - b'0'),
            b'a'..=b'f' => Some(b - b'a' + 10),
            b'A'..=b'F' => Some(b - b'A' + 10),
            _ => None,
        }
    }

    let raw = s.as_bytes();
    let mut bytes = Vec::with_capacity(raw.len());
    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' && i + 2 < raw.len() {
            if let (Some(hi), Some(lo)) = (hex_val(raw[i + 1]), hex_val(raw[i + 2])) {
                bytes.push(hi << 4 | lo);
                i += 3;
                continue;
            }
        }
        bytes.push(raw[i]);
        i += 1;
    }
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_encoded_label_and_issuer() {
        let uri = build_otpauth_uri("My Co", "user+test@example.com", "JBSWY3DPEHPK3PXP");
        assert_eq!(
            uri,
            "otpauth://totp/My%20Co:user%2Btest%40example.com?secret=JBSWY3DPEHPK3PXP&issuer=My%20Co"
        );
    }

    #[test]
    fn roundtrips_issuer_account_and_secret() {
        let uri = build_otpauth_uri("My Co", "user+test@example.com", "JBSWY3DPEHPK3PXP");
        let parsed = parse_otpauth_uri(&uri).unwrap();
        assert_eq!(parsed.issuer, "My Co");
        assert_eq!(parsed.account, "user+test@example.com");
        assert_eq!(parsed.secret, "JBSWY3DPEHPK3PXP");
        assert_eq!(parsed.params, TotpParams::default());
    }

    #[test]
    fn query_issuer_wins_over_label_prefix() {
        let uri = "otpauth://totp/LabelCo:alice?secret=ABCDEFGH&issuer=QueryCo";
        let parsed = parse_otpauth_uri(uri).unwrap();
        assert_eq!(parsed.issuer, "QueryCo");
        assert_eq!(parsed.account, "alice");
    }

    #[test]
    fn label_prefix_fills_missing_issuer() {
        let parsed = parse_otpauth_uri("otpauth://totp/Acme:bob?secret=ABCDEFGH").unwrap();
        assert_eq!(parsed.issuer, "Acme");
        assert_eq!(parsed.account, "bob");
    }

    #[test]
    fn bare_label_is_the_account() {
        let parsed = parse_otpauth_uri("otpauth://totp/bob?secret=ABCDEFGH").unwrap();
        assert_eq!(parsed.issuer, "");
        assert_eq!(parsed.account, "bob");
    }

    #[test]
    fn explicit_params_are_honored() {
        let uri = "otpauth://totp/X:y?secret=ABCDEFGH&algorithm=SHA256&digits=8&period=60";
        let parsed = parse_otpauth_uri(uri).unwrap();
        assert_eq!(parsed.params.algorithm, Algorithm::Sha256);
        assert_eq!(parsed.params.digits, 8);
        assert_eq!(parsed.params.period, 60);
    }

    #[test]
    fn unusable_params_fall_back_to_defaults() {
        let uri = "otpauth://totp/X:y?secret=ABCDEFGH&algorithm=MD5&digits=9&period=0";
        let parsed = parse_otpauth_uri(uri).unwrap();
        assert_eq!(parsed.params, TotpParams::default());
    }

    #[test]
    fn rejects_non_otpauth_schemes() {
        let err = parse_otpauth_uri("https://example.com/x?secret=ABCDEFGH").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Not a valid otpauth TOTP URI: https://example.com/x?secret=ABCDEFGH"
        );
    }

    #[test]
    fn rejects_non_totp_hosts() {
        assert!(matches!(
            parse_otpauth_uri("otpauth://hotp/x?secret=ABCDEFGH"),
            Err(Error::InvalidUri(_))
        ));
    }

    #[test]
    fn rejects_unparseable_input() {
        assert!(matches!(
            parse_otpauth_uri("not a uri"),
            Err(Error::InvalidUri(_))
        ));
    }

    #[test]
    fn missing_or_empty_secret_is_its_own_error() {
        let err = parse_otpauth_uri("otpauth://totp/X:y?issuer=X").unwrap_err();
        assert_eq!(err.to_string(), "No secret found in otpauth URI");
        assert!(matches!(
            parse_otpauth_uri("otpauth://totp/X:y?secret="),
            Err(Error::MissingSecret)
        ));
    }

    #[test]
    fn encode_covers_reserved_bytes() {
        assert_eq!(url_encode("plain-text_1.0~"), "plain-text_1.0~");
        assert_eq!(url_encode("a b@c:d/e"), "a%20b%40c%3Ad%2Fe");
    }

    #[test]
    fn decode_handles_multibyte_and_malformed_escapes() {
        assert_eq!(url_decode("caf%C3%A9"), "café");
        assert_eq!(url_decode("50%25"), "50%");
        assert_eq!(url_decode("trailing%4"), "trailing%4");
        assert_eq!(url_decode("%GG"), "%GG");
    }
}
