//! Clipboard hand-off for generated secrets.

use copypasta::{ClipboardContext, ClipboardProvider};
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Copy `text` to the system clipboard.
///
/// The contents are read back once after writing; some providers only
/// commit the selection when it is first requested. The readback copy
/// is wiped immediately.
pub fn copy(text: &str) -> Result<()> {
    let mut ctx = ClipboardContext::new().map_err(|e| Error::Clipboard(e.to_string()))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| Error::Clipboard(e.to_string()))?;
    if let Ok(mut readback) = ctx.get_contents() {
        readback.zeroize();
    }
    Ok(())
}
