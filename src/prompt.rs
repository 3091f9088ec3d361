use crate::formality::{FormalityLevel, TargetLanguage};

pub use crate::api_constants::prompt_config::SYSTEM_INSTRUCTION;

/// 构建发送给模型的翻译指令
///
/// 指令包含目标语言名称、风格标题、风格说明以及原文
pub fn build_prompt(text: &str, language: TargetLanguage, level: &FormalityLevel) -> String {
    format!(
        "Translate the following text into {language}.\n\
         The desired style is \"{title}\".\n\
         This style is described as: \"{description}\".\n\
         Provide only the translated text as a raw string, without any additional formatting, explanations, or labels.\n\
         \n\
         TEXT: \"{text}\"",
        language = language.name(),
        title = level.title,
        description = level.description,
        text = text,
    )
}
