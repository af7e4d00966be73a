//! Terminal QR rendering for passwords and provisioning URIs.

use qrcode::QrCode;
use qrcode::render::unicode;

/// Render `data` as a half-block unicode QR string. Colors are inverted
/// so the code scans on dark terminal themes.
pub fn render(data: &str) -> crate::error::Result<String> {
    let code = QrCode::new(data)?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .dark_color(unicode::Dense1x2::Light)
        .light_color(unicode::Dense1x2::Dark)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nonempty_block_art() {
        let art = render("otpauth://totp/x:y?secret=JBSWY3DPEHPK3PXP").unwrap();
        assert!(art.lines().count() > 10);
        assert!(art.chars().any(|c| c == '█' || c == '▀' || c == '▄'));
    }

    #[test]
    fn oversized_payload_is_an_error() {
        // Version 40 tops out near 3 KB; 8 KB cannot fit.
        let huge = "x".repeat(8192);
        assert!(render(&huge).is_err());
    }
}
