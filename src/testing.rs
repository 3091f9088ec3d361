//! 测试用的脚本化文本生成器

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::error::{Result, TranslationError};
use crate::translator::TextGenerator;

type ReplyFn = Box<dyn Fn(usize) -> Result<String> + Send + Sync>;

/// 记录每次调用的 (prompt, system_instruction)，并按脚本返回结果
pub(crate) struct ScriptedGenerator {
    reply: ReplyFn,
    calls: Mutex<Vec<(String, String)>>,
    gate: Option<Arc<Notify>>,
    started: Arc<Notify>,
}

impl ScriptedGenerator {
    fn build(reply: ReplyFn, gate: Option<Arc<Notify>>) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
            gate,
            started: Arc::new(Notify::new()),
        })
    }

    pub(crate) fn replying(text: &str) -> Arc<Self> {
        let text = text.to_string();
        Self::build(Box::new(move |_| Ok(text.clone())), None)
    }

    /// 第n次调用返回 `replies[n]`
    pub(crate) fn sequence(replies: &[&str]) -> Arc<Self> {
        let replies: Vec<String> = replies.iter().map(|s| s.to_string()).collect();
        Self::build(
            Box::new(move |n| Ok(replies.get(n).cloned().unwrap_or_default())),
            None,
        )
    }

    pub(crate) fn failing<F>(error: F) -> Arc<Self>
    where
        F: Fn() -> TranslationError + Send + Sync + 'static,
    {
        Self::build(Box::new(move |_| Err(error())), None)
    }

    /// 每次调用都要等待 `gate` 放行一次才返回
    pub(crate) fn gated(replies: &[&str]) -> (Arc<Self>, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let replies: Vec<String> = replies.iter().map(|s| s.to_string()).collect();
        let generator = Self::build(
            Box::new(move |n| Ok(replies.get(n).cloned().unwrap_or_default())),
            Some(gate.clone()),
        );
        (generator, gate)
    }

    /// 等待下一次调用进入生成器
    pub(crate) async fn wait_started(&self) {
        self.started.notified().await;
    }

    pub(crate) fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, system_instruction: &str) -> Result<String> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push((prompt.to_string(), system_instruction.to_string()));
            calls.len() - 1
        };
        self.started.notify_one();

        if let Some(gate) = &self.gate {
            gate.notified().await;
        }

        (self.reply)(index)
    }
}
