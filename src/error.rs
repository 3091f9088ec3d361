//! 统一错误处理模块
//!
//! 提供Nuance Translator项目的统一错误类型定义和处理机制

// 标准库导入
use std::fmt;

// 第三方crate导入
use anyhow::Error as AnyhowError;

// 本地模块导入
use crate::api_constants::error_messages;

/// Nuance Translator 统一错误类型
///
/// 前四个变体是直接展示给用户的翻译结果错误，其余变体来自传输层、配置和剪贴板
#[derive(Debug)]
pub enum TranslationError {
    /// 输入文本为空（在任何网络请求之前）
    EmptyInput,

    /// 模型返回了空白译文
    EmptyResult,

    /// 调用模型失败（已带统一前缀）
    Failed {
        /// 底层错误信息
        message: String,
    },

    /// 无法识别的错误形态
    Unknown,

    /// 网络请求相关错误
    Network {
        /// 错误消息
        message: String,
        /// HTTP状态码（如果适用）
        status_code: Option<u16>,
    },

    /// 模型API返回的错误
    ModelApi {
        /// API响应状态码
        status_code: u16,
        /// 错误消息
        message: String,
        /// API地址（不含密钥）
        api_url: String,
    },

    /// 配置相关错误
    Configuration {
        /// 配置项名称
        field: String,
        /// 错误原因
        reason: String,
    },

    /// 正式程度索引越界
    InvalidFormalityIndex {
        /// 请求的索引
        index: usize,
        /// 当前表的长度
        len: usize,
    },

    /// 剪贴板操作错误
    Clipboard {
        /// 错误详情
        details: String,
    },

    /// 内部处理错误（包装anyhow::Error）
    Internal {
        /// 包装的错误
        source: AnyhowError,
    },
}

impl TranslationError {
    /// 把生成器返回的任意错误包装为统一的翻译失败错误
    ///
    /// 没有可用消息的错误会归一为 [`TranslationError::Unknown`]
    pub fn wrap_generation(error: TranslationError) -> Self {
        match error {
            TranslationError::EmptyInput
            | TranslationError::EmptyResult
            | TranslationError::Failed { .. }
            | TranslationError::Unknown => error,
            other => {
                let message = other.to_string();
                if message.trim().is_empty() {
                    TranslationError::Unknown
                } else {
                    TranslationError::Failed { message }
                }
            }
        }
    }
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::EmptyInput => write!(f, "{}", error_messages::EMPTY_INPUT),
            TranslationError::EmptyResult => write!(
                f,
                "{}: {}",
                error_messages::FAILED_PREFIX,
                error_messages::EMPTY_RESULT
            ),
            TranslationError::Failed { message } => {
                write!(f, "{}: {}", error_messages::FAILED_PREFIX, message)
            }
            TranslationError::Unknown => write!(f, "{}", error_messages::UNKNOWN_ERROR),
            TranslationError::Network {
                message,
                status_code,
            } => {
                if let Some(code) = status_code {
                    write!(f, "network request failed [{}]: {}", code, message)
                } else {
                    write!(f, "network request failed: {}", message)
                }
            }
            TranslationError::ModelApi {
                status_code,
                message,
                api_url,
            } => {
                write!(f, "model API error [{}] {}: {}", status_code, api_url, message)
            }
            TranslationError::Configuration { field, reason } => {
                write!(f, "configuration error [{}]: {}", field, reason)
            }
            TranslationError::InvalidFormalityIndex { index, len } => {
                write!(
                    f,
                    "formality level {} is out of range (0..={})",
                    index,
                    len.saturating_sub(1)
                )
            }
            TranslationError::Clipboard { details } => {
                write!(f, "clipboard operation failed: {}", details)
            }
            TranslationError::Internal { source } => write!(f, "{}", source),
        }
    }
}

impl std::error::Error for TranslationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TranslationError::Internal { source } => Some(source.as_ref()),
            _ => None,
        }
    }
}

/// Nuance Translator 结果类型别名
pub type Result<T> = std::result::Result<T, TranslationError>;

/// 便捷的错误创建宏
#[macro_export]
macro_rules! translation_error {
    (failed, $msg:expr) => {
        $crate::error::TranslationError::Failed {
            message: $msg.to_string(),
        }
    };
    (network, $msg:expr) => {
        $crate::error::TranslationError::Network {
            message: $msg.to_string(),
            status_code: None,
        }
    };
    (network, $msg:expr, $code:expr) => {
        $crate::error::TranslationError::Network {
            message: $msg.to_string(),
            status_code: Some($code),
        }
    };
    (model_api, $code:expr, $msg:expr, $url:expr) => {
        $crate::error::TranslationError::ModelApi {
            status_code: $code,
            message: $msg.to_string(),
            api_url: $url.to_string(),
        }
    };
    (config, $field:expr, $reason:expr) => {
        $crate::error::TranslationError::Configuration {
            field: $field.to_string(),
            reason: $reason.to_string(),
        }
    };
    (clipboard, $details:expr) => {
        $crate::error::TranslationError::Clipboard {
            details: $details.to_string(),
        }
    };
}

/// 从anyhow::Error转换为TranslationError
impl From<AnyhowError> for TranslationError {
    fn from(error: AnyhowError) -> Self {
        TranslationError::Internal { source: error }
    }
}

/// 从reqwest::Error转换为TranslationError
impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        let status_code = error.status().map(|s| s.as_u16());
        // 去掉URL，避免把查询参数里的密钥带进错误消息
        TranslationError::Network {
            message: error.without_url().to_string(),
            status_code,
        }
    }
}
