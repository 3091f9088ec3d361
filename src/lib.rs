//! Nuance Translator - 按语气与正式程度改写的翻译工具库
//!
//! 这个库提供了正式程度等级表、提示词构建、Gemini客户端、会话状态控制器和终端交互等核心功能。

pub mod api_constants;
pub mod error;
pub mod formality;
pub mod prompt;
pub mod translator;
pub mod gemini;
pub mod stats;
pub mod session;
pub mod config;
pub mod render;
pub mod clipboard;
pub mod repl;
pub mod utils;

#[cfg(test)]
mod testing;
