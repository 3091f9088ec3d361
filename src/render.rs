//! 终端渲染
//!
//! 把会话状态渲染为文本，四种视图任一时刻只渲染其一

use crate::error::{Result, TranslationError};
use crate::formality::TargetLanguage;
use crate::session::{SessionState, View};

pub const PLACEHOLDER: &str = "Your nuanced translation will appear here.";
pub const LOADING: &str = "⏳ Translating...";

/// 渲染当前视图
pub fn render_view(state: &SessionState) -> String {
    match state.view() {
        View::Loading => LOADING.to_string(),
        View::Error(message) => format!("❌ Error: {}", message),
        View::Result(outcome) => format!(
            "Translation Result\n{} - {}\n───────────────────────────────────────\n{}",
            outcome.language, outcome.level.title, outcome.text
        ),
        View::Placeholder => PLACEHOLDER.to_string(),
    }
}

/// 渲染等级列表，当前选中项以 `▶` 标出
pub fn render_levels(language: TargetLanguage, selected: Option<usize>) -> String {
    let mut out = format!("{} (Informal → Formal):\n", language);
    for (index, level) in language.levels().iter().enumerate() {
        let marker = if Some(index) == selected { "▶" } else { " " };
        out.push_str(&format!("{} [{}] {}\n", marker, index, level.title));
        out.push_str(&format!("      {}\n", level.description));
    }
    out
}

/// `--list-levels` 的输出；未指定等级时标出中点，越界等级按错误处理
pub fn render_level_listing(language: TargetLanguage, level: Option<usize>) -> Result<String> {
    let len = language.levels().len();
    let index = level.unwrap_or_else(|| language.default_level_index());
    if index >= len {
        return Err(TranslationError::InvalidFormalityIndex { index, len });
    }
    Ok(render_levels(language, Some(index)))
}

/// 渲染当前选择（语言、等级、待翻译文本）
pub fn render_selection(state: &SessionState) -> String {
    let level = state.selected_level();
    let input = if state.input_text().trim().is_empty() {
        "(empty)"
    } else {
        state.input_text()
    };
    format!(
        "Target language: {}\nStyle: [{}] {}\n  {}\nText: {}",
        state.language(),
        state.formality_index(),
        level.title,
        level.description,
        input
    )
}
