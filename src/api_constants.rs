/// 生成模型API配置常量
///
/// 该文件定义了Gemini服务、提示词以及用户可见错误消息的常量配置，方便统一管理和维护

/// 默认生成模型API配置
pub mod api_config {
    /// 默认API基础地址
    pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

    /// API版本路径
    pub const API_VERSION: &str = "v1beta";

    /// 默认模型名称
    pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

    /// API密钥环境变量
    pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

    /// 备用API密钥环境变量
    pub const FALLBACK_API_KEY_ENV: &str = "API_KEY";
}

/// 提示词配置
pub mod prompt_config {
    /// 系统指令：把模型设定为保留语气差异的翻译者，只输出译文
    pub const SYSTEM_INSTRUCTION: &str = "You are an expert linguist and cultural translator, skilled in capturing the nuanced tones of different communication styles. Your task is to provide a single, direct translation for a given text, adhering strictly to the requested language and style. You must only output the translated text.";

    /// 日志中原文预览的最大字符数
    pub const LOG_PREVIEW_CHARS: usize = 40;
}

/// 错误消息常量
pub mod error_messages {
    /// 输入为空
    pub const EMPTY_INPUT: &str = "Input text cannot be empty.";

    /// 模型返回空译文
    pub const EMPTY_RESULT: &str = "The API returned an empty translation.";

    /// 翻译失败前缀
    pub const FAILED_PREFIX: &str = "Failed to get translation";

    /// 无法识别的错误
    pub const UNKNOWN_ERROR: &str = "An unknown error occurred while fetching the translation.";

    /// 翻译任务异常终止
    pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";
}

/// 实用工具函数
/// 获取API密钥，命令行参数优先，其次依次读取环境变量
pub fn resolve_api_key(cli_key: Option<&str>) -> Option<String> {
    if let Some(key) = cli_key {
        if !key.trim().is_empty() {
            return Some(key.trim().to_string());
        }
    }

    [api_config::API_KEY_ENV, api_config::FALLBACK_API_KEY_ENV]
        .iter()
        .filter_map(|name| std::env::var(name).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

/// 验证API地址是否有效
pub fn is_valid_api_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => parsed.scheme() == "http" || parsed.scheme() == "https",
        Err(_) => false,
    }
}
