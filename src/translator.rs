use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{Result, TranslationError};
use crate::formality::{FormalityLevel, TargetLanguage};
use crate::prompt::{build_prompt, SYSTEM_INSTRUCTION};
use crate::utils::preview;

/// 远程文本生成服务
///
/// 对调用方而言是一次同步的请求-响应：没有流式输出，也没有部分结果
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String>;
}

/// 一次翻译请求（不持久化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub target_language: TargetLanguage,
    pub style: FormalityLevel,
}

/// 翻译客户端
#[derive(Clone)]
pub struct NuanceTranslator {
    generator: Arc<dyn TextGenerator>,
}

impl NuanceTranslator {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// 按指定语言和风格翻译文本
    ///
    /// 空白输入在发出任何请求之前就失败；模型只调用一次，返回去除首尾空白的译文
    pub async fn translate(
        &self,
        text: &str,
        language: TargetLanguage,
        style: &FormalityLevel,
    ) -> Result<String> {
        if text.trim().is_empty() {
            return Err(TranslationError::EmptyInput);
        }

        let prompt = build_prompt(text, language, style);
        info!(
            "🌐 翻译 \"{}\" → {} / {}",
            preview(text),
            language,
            style.title
        );

        let raw = match self.generator.generate(&prompt, SYSTEM_INSTRUCTION).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("❌ 调用模型失败: {}", e);
                return Err(TranslationError::wrap_generation(e));
            }
        };

        let translated = raw.trim();
        if translated.is_empty() {
            warn!("⚠️  模型返回了空译文");
            return Err(TranslationError::EmptyResult);
        }

        debug!("✅ 译文长度: {} 字符", translated.chars().count());
        Ok(translated.to_string())
    }

    /// 以请求结构体的形式调用 [`NuanceTranslator::translate`]
    pub async fn translate_request(&self, request: &TranslationRequest) -> Result<String> {
        self.translate(&request.source_text, request.target_language, &request.style)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formality::{ENGLISH_LEVELS, JAPANESE_LEVELS};
    use crate::testing::ScriptedGenerator;

    fn translator(generator: &Arc<ScriptedGenerator>) -> NuanceTranslator {
        NuanceTranslator::new(generator.clone())
    }

    #[tokio::test]
    async fn test_successful_translation_is_trimmed() {
        let generator = ScriptedGenerator::replying("  Please check this by the end of the day.\n");
        let result = translator(&generator)
            .translate(
                "Please review this by EOD",
                TargetLanguage::English,
                &ENGLISH_LEVELS[3],
            )
            .await
            .unwrap();

        assert_eq!(result, "Please check this by the end of the day.");
        let calls = generator.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].0.contains("English"));
        assert!(calls[0].0.contains("\"Standard\""));
        assert_eq!(calls[0].1, SYSTEM_INSTRUCTION);
    }

    #[tokio::test]
    async fn test_blank_input_never_calls_model() {
        let generator = ScriptedGenerator::replying("unused");
        let err = translator(&generator)
            .translate(" \n\t ", TargetLanguage::Japanese, &JAPANESE_LEVELS[3])
            .await
            .unwrap_err();

        assert!(matches!(err, TranslationError::EmptyInput));
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_blank_model_response_is_error() {
        let generator = ScriptedGenerator::replying("   \n ");
        let err = translator(&generator)
            .translate("hello", TargetLanguage::English, &ENGLISH_LEVELS[0])
            .await
            .unwrap_err();

        assert!(matches!(err, TranslationError::EmptyResult));
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_prefixed() {
        let generator = ScriptedGenerator::failing(|| {
            crate::translation_error!(network, "connection reset")
        });
        let err = translator(&generator)
            .translate("hello", TargetLanguage::English, &ENGLISH_LEVELS[4])
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Failed to get translation: network request failed: connection reset"
        );
        assert_eq!(generator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_request_struct_path() {
        let generator = ScriptedGenerator::replying("こんにちは");
        let request = TranslationRequest {
            source_text: "hello".to_string(),
            target_language: TargetLanguage::Japanese,
            style: JAPANESE_LEVELS[4],
        };
        let result = translator(&generator)
            .translate_request(&request)
            .await
            .unwrap();
        assert_eq!(result, "こんにちは");
        assert!(generator.calls()[0].0.contains("丁寧語 (Teineigo)"));
    }
}
