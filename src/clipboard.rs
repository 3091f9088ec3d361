use cli_clipboard::{ClipboardContext, ClipboardProvider};
use tracing::debug;

use crate::error::Result;
use crate::translation_error;

/// 把文本写入系统剪贴板
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    if text.is_empty() {
        return Err(translation_error!(clipboard, "nothing to copy"));
    }

    let mut ctx = ClipboardContext::new().map_err(|e| translation_error!(clipboard, e))?;
    ctx.set_contents(text.to_string())
        .map_err(|e| translation_error!(clipboard, e))?;

    debug!("📋 已复制 {} 字符到剪贴板", text.chars().count());
    Ok(())
}
