//! 配置管理模块
//!
//! 提供CLI参数解析和翻译配置管理功能

// 标准库导入
use std::time::Duration;

// 第三方crate导入
use clap::Parser;

// 本地模块导入
use crate::api_constants::{api_config, is_valid_api_url, resolve_api_key};
use crate::error::{Result, TranslationError};
use crate::formality::TargetLanguage;
use crate::translation_error;

/// 翻译配置结构体
///
/// 支持Builder模式进行链式配置，启动时构建一次，之后不再修改。
///
/// # Examples
///
/// ```rust
/// use nuance_translator::config::NuanceConfig;
/// use nuance_translator::formality::TargetLanguage;
///
/// let config = NuanceConfig::new()
///     .with_api_key("test-key")
///     .with_model("gemini-2.5-flash")
///     .target_language(TargetLanguage::Japanese)
///     .with_formality_index(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct NuanceConfig {
    /// API基础地址
    api_base: String,
    /// 模型名称
    model: String,
    /// API密钥
    api_key: Option<String>,
    /// 请求超时（None 表示沿用传输层默认值）
    request_timeout: Option<Duration>,
    /// 初始目标语言
    language: TargetLanguage,
    /// 初始正式程度索引（None 表示使用中点）
    formality_index: Option<usize>,
}

impl NuanceConfig {
    /// 创建新的配置实例
    ///
    /// 返回具有默认值的配置实例：
    /// - API地址: Gemini 官方地址
    /// - 模型: gemini-2.5-flash
    /// - API密钥: 未设置
    /// - 超时: 未设置
    /// - 目标语言: 英语，等级为中点
    pub fn new() -> Self {
        Self {
            api_base: api_config::DEFAULT_API_BASE.to_string(),
            model: api_config::DEFAULT_MODEL.to_string(),
            api_key: None,
            request_timeout: None,
            language: TargetLanguage::default(),
            formality_index: None,
        }
    }

    /// 由命令行参数构建配置，API密钥缺失时回退到环境变量
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Self::new()
            .with_api_base(&cli.api_base)
            .with_model(&cli.model)
            .target_language(cli.lang);

        if let Some(key) = resolve_api_key(cli.api_key.as_deref()) {
            config = config.with_api_key(&key);
        }
        if let Some(secs) = cli.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        if let Some(index) = cli.level {
            config = config.with_formality_index(index);
        }

        config.validate()?;
        Ok(config)
    }

    /// 获取API基础地址
    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// 获取模型名称
    pub fn model(&self) -> &str {
        &self.model
    }

    /// 获取API密钥
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout
    }

    pub fn language(&self) -> TargetLanguage {
        self.language
    }

    /// 初始等级索引，未指定时为当前语言等级表的中点
    pub fn formality_index(&self) -> usize {
        self.formality_index
            .unwrap_or_else(|| self.language.default_level_index())
    }

    /// 设置API基础地址
    pub fn with_api_base(mut self, url: &str) -> Self {
        self.api_base = url.trim_end_matches('/').to_string();
        self
    }

    /// 设置模型名称
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// 设置API密钥
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// 设置请求超时
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// 设置初始目标语言
    pub fn target_language(mut self, language: TargetLanguage) -> Self {
        self.language = language;
        self
    }

    /// 设置初始等级索引
    pub fn with_formality_index(mut self, index: usize) -> Self {
        self.formality_index = Some(index);
        self
    }

    /// 校验配置；API密钥是否存在留给客户端创建时检查，以便 --list-levels 等无需密钥
    pub fn validate(&self) -> Result<()> {
        if !is_valid_api_url(&self.api_base) {
            return Err(translation_error!(
                config,
                "api_base",
                format!("not an http(s) URL: {}", self.api_base)
            ));
        }

        if self.model.trim().is_empty() {
            return Err(translation_error!(config, "model", "model name is empty"));
        }

        if let Some(timeout) = self.request_timeout {
            if timeout.is_zero() {
                return Err(translation_error!(config, "timeout", "must be greater than zero"));
            }
        }

        let len = self.language.levels().len();
        if let Some(index) = self.formality_index {
            if index >= len {
                return Err(TranslationError::InvalidFormalityIndex { index, len });
            }
        }

        Ok(())
    }
}

impl Default for NuanceConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// CLI参数结构
#[derive(Parser, Debug)]
#[command(author, version, about = "按语气与正式程度翻译文本 - 基于Gemini生成模型", long_about = None)]
pub struct Cli {
    /// 要翻译的文本（省略时进入交互模式）
    #[arg(value_name = "TEXT")]
    pub text: Option<String>,

    /// 从标准输入读取要翻译的文本
    #[arg(long, conflicts_with = "text")]
    pub stdin: bool,

    /// 目标语言
    #[arg(short, long, value_enum, default_value_t = TargetLanguage::English)]
    pub lang: TargetLanguage,

    /// 正式程度索引 (0 = 最随意, 6 = 最正式，默认为中点)
    #[arg(long, value_name = "INDEX")]
    pub level: Option<usize>,

    /// 列出当前语言的全部正式程度等级
    #[arg(long)]
    pub list_levels: bool,

    /// 翻译成功后复制结果到剪贴板
    #[arg(long)]
    pub copy: bool,

    /// API基础地址
    #[arg(long, env = "GEMINI_API_BASE", default_value = api_config::DEFAULT_API_BASE)]
    pub api_base: String,

    /// 模型名称
    #[arg(long, env = "GEMINI_MODEL", default_value = api_config::DEFAULT_MODEL)]
    pub model: String,

    /// API密钥 (默认读取 GEMINI_API_KEY 或 API_KEY)
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// 请求超时时间（秒），默认不限制
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// 显示请求统计
    #[arg(long)]
    pub stats: bool,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,

    /// 静默模式 (仅输出结果与错误)
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NuanceConfig::new();
        assert_eq!(config.model(), "gemini-2.5-flash");
        assert_eq!(config.language(), TargetLanguage::English);
        assert_eq!(config.formality_index(), 3);
        assert!(config.request_timeout().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_api_base() {
        let config = NuanceConfig::new().with_api_base("not a url");
        assert!(matches!(
            config.validate(),
            Err(TranslationError::Configuration { .. })
        ));
    }

    #[test]
    fn test_invalid_level() {
        let config = NuanceConfig::new().with_formality_index(9);
        assert!(matches!(
            config.validate(),
            Err(TranslationError::InvalidFormalityIndex { index: 9, len: 7 })
        ));
    }

    #[test]
    fn test_from_cli() {
        let cli = Cli::try_parse_from([
            "nuance-translator",
            "--lang",
            "ja",
            "--level",
            "5",
            "--api-key",
            "k",
            "--timeout",
            "20",
            "Please review this by EOD",
        ])
        .unwrap();

        let config = NuanceConfig::from_cli(&cli).unwrap();
        assert_eq!(config.language(), TargetLanguage::Japanese);
        assert_eq!(config.formality_index(), 5);
        assert_eq!(config.api_key(), Some("k"));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(20)));
        assert_eq!(cli.text.as_deref(), Some("Please review this by EOD"));
    }

    #[test]
    fn test_stdin_conflicts_with_text() {
        assert!(Cli::try_parse_from(["nuance-translator", "--stdin", "hello"]).is_err());
    }
}
