//! 会话状态与翻译控制器
//!
//! [`SessionState`] 只包含纯状态转换；[`TranslationController`] 负责把状态与翻译客户端串起来。
//! 同一时刻最多只有一个请求在途，请求期间的再次提交会被忽略。
//! 每个请求携带一个票据，输入在请求期间发生变化时，迟到的结果会被丢弃。

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use crate::api_constants::error_messages;
use crate::error::{Result, TranslationError};
use crate::formality::{FormalityLevel, TargetLanguage};
use crate::stats::RequestStats;
use crate::translator::{NuanceTranslator, TranslationRequest};

/// 一次成功翻译的结果，连同产生它的语言和等级
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationOutcome {
    pub text: String,
    pub language: TargetLanguage,
    pub level: FormalityLevel,
    pub stats: RequestStats,
}

/// 当前应当显示的唯一视图
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Loading,
    Error(&'a str),
    Result(&'a TranslationOutcome),
    Placeholder,
}

/// 请求票据：记录请求编号以及发起时的输入版本
#[derive(Debug, Clone)]
pub struct Ticket {
    request_id: u64,
    revision: u64,
    request: TranslationRequest,
    started: Instant,
}

impl Ticket {
    pub fn request(&self) -> &TranslationRequest {
        &self.request
    }
}

/// 请求结束后状态的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Discarded,
}

/// 一次提交的最终结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 输入为空或已有请求在途
    Ignored,
    Succeeded,
    Failed,
    /// 请求期间输入发生了变化，结果被丢弃
    Discarded,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    input_text: String,
    language: TargetLanguage,
    formality_index: usize,
    error: Option<String>,
    result: Option<TranslationOutcome>,
    in_flight: Option<u64>,
    next_request_id: u64,
    revision: u64,
}

impl SessionState {
    /// 以指定语言的中点等级创建空会话
    pub fn new(language: TargetLanguage) -> Self {
        Self {
            input_text: String::new(),
            language,
            formality_index: language.default_level_index(),
            error: None,
            result: None,
            in_flight: None,
            next_request_id: 0,
            revision: 0,
        }
    }

    pub fn input_text(&self) -> &str {
        &self.input_text
    }

    pub fn language(&self) -> TargetLanguage {
        self.language
    }

    pub fn formality_index(&self) -> usize {
        self.formality_index
    }

    pub fn levels(&self) -> &'static [FormalityLevel] {
        self.language.levels()
    }

    pub fn selected_level(&self) -> &'static FormalityLevel {
        // 索引只能通过 set_formality_index / set_language 修改，二者都保证在范围内
        &self.levels()[self.formality_index]
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&TranslationOutcome> {
        self.result.as_ref()
    }

    pub fn view(&self) -> View<'_> {
        if self.is_loading() {
            View::Loading
        } else if let Some(message) = &self.error {
            View::Error(message)
        } else if let Some(outcome) = &self.result {
            View::Result(outcome)
        } else {
            View::Placeholder
        }
    }

    pub fn set_input_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.input_text {
            self.input_text = text;
            self.revision += 1;
        }
    }

    /// 切换语言：等级重置为新表的中点，并清除已有结果
    pub fn set_language(&mut self, language: TargetLanguage) {
        self.language = language;
        self.formality_index = language.default_level_index();
        self.result = None;
        self.revision += 1;
    }

    pub fn set_formality_index(&mut self, index: usize) -> Result<()> {
        let len = self.levels().len();
        if index >= len {
            return Err(TranslationError::InvalidFormalityIndex { index, len });
        }
        if index != self.formality_index {
            self.formality_index = index;
            self.revision += 1;
        }
        Ok(())
    }

    /// 开始一个请求；输入为空或已有请求在途时返回 `None` 且不修改状态
    pub fn begin_request(&mut self) -> Option<Ticket> {
        if self.is_loading() || self.input_text.trim().is_empty() {
            return None;
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.in_flight = Some(request_id);
        self.error = None;
        self.result = None;

        Some(Ticket {
            request_id,
            revision: self.revision,
            request: TranslationRequest {
                source_text: self.input_text.clone(),
                target_language: self.language,
                style: *self.selected_level(),
            },
            started: Instant::now(),
        })
    }

    /// 结束请求，成功时设置结果、失败时设置错误，二者只取其一
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: std::result::Result<String, String>,
        completed_at: DateTime<Local>,
    ) -> Completion {
        if self.in_flight != Some(ticket.request_id) {
            return Completion::Discarded;
        }
        self.in_flight = None;

        if ticket.revision != self.revision {
            return Completion::Discarded;
        }

        match outcome {
            Ok(text) => {
                let stats = RequestStats {
                    source_chars: ticket.request.source_text.chars().count(),
                    result_chars: text.chars().count(),
                    elapsed: elapsed_since(ticket.started),
                    completed_at,
                };
                self.result = Some(TranslationOutcome {
                    text,
                    language: ticket.request.target_language,
                    level: ticket.request.style,
                    stats,
                });
                self.error = None;
            }
            Err(message) => {
                self.error = Some(message);
                self.result = None;
            }
        }
        Completion::Applied
    }
}

fn elapsed_since(started: Instant) -> Duration {
    Instant::now().saturating_duration_since(started)
}

/// 翻译控制器
///
/// 状态锁不会跨越网络调用持有
pub struct TranslationController {
    state: Arc<Mutex<SessionState>>,
    translator: NuanceTranslator,
}

impl TranslationController {
    pub fn new(translator: NuanceTranslator, language: TargetLanguage) -> Self {
        Self {
            state: Arc::new(Mutex::new(SessionState::new(language))),
            translator,
        }
    }

    /// 当前状态的快照
    pub async fn snapshot(&self) -> SessionState {
        self.state.lock().await.clone()
    }

    pub async fn set_input_text(&self, text: impl Into<String>) {
        self.state.lock().await.set_input_text(text);
    }

    pub async fn set_language(&self, language: TargetLanguage) {
        let mut state = self.state.lock().await;
        state.set_language(language);
        debug!(
            "🔤 目标语言: {}，等级重置为 {}",
            language,
            state.selected_level().title
        );
    }

    pub async fn set_formality_index(&self, index: usize) -> Result<()> {
        self.state.lock().await.set_formality_index(index)
    }

    /// 提交当前输入进行翻译
    pub async fn translate(&self) -> SubmitOutcome {
        let ticket = {
            let mut state = self.state.lock().await;
            match begin_or_ignore(&mut state) {
                Some(ticket) => ticket,
                None => return SubmitOutcome::Ignored,
            }
        };
        self.drive(ticket).await
    }

    /// 设置文本并提交；已有请求在途时直接忽略，不改动输入
    pub async fn translate_text(&self, text: impl Into<String>) -> SubmitOutcome {
        let ticket = {
            let mut state = self.state.lock().await;
            if state.is_loading() {
                info!("⏳ 已有请求在进行中，忽略本次输入");
                return SubmitOutcome::Ignored;
            }
            state.set_input_text(text);
            match begin_or_ignore(&mut state) {
                Some(ticket) => ticket,
                None => return SubmitOutcome::Ignored,
            }
        };
        self.drive(ticket).await
    }

    /// 在独立任务中完成请求并写回状态
    ///
    /// 调用方放弃等待时任务照常结束，票据总会被结算
    async fn drive(&self, ticket: Ticket) -> SubmitOutcome {
        let state = self.state.clone();
        let translator = self.translator.clone();

        let driver = tokio::spawn(async move {
            let request = ticket.request().clone();
            let joined =
                tokio::spawn(async move { translator.translate_request(&request).await }).await;

            let outcome = match joined {
                Ok(Ok(text)) => Ok(text),
                Ok(Err(e)) => Err(e.to_string()),
                Err(join_error) => {
                    error!("❌ 翻译任务异常终止: {}", join_error);
                    Err(error_messages::UNEXPECTED_ERROR.to_string())
                }
            };
            let succeeded = outcome.is_ok();

            let mut state = state.lock().await;
            match state.complete(ticket, outcome, Local::now()) {
                Completion::Applied if succeeded => SubmitOutcome::Succeeded,
                Completion::Applied => SubmitOutcome::Failed,
                Completion::Discarded => {
                    info!("🗑️  输入已变化，丢弃过期的翻译结果");
                    SubmitOutcome::Discarded
                }
            }
        });

        match driver.await {
            Ok(outcome) => outcome,
            Err(join_error) => {
                error!("❌ 翻译任务异常终止: {}", join_error);
                SubmitOutcome::Failed
            }
        }
    }
}

fn begin_or_ignore(state: &mut SessionState) -> Option<Ticket> {
    let ticket = state.begin_request();
    if ticket.is_none() {
        if state.is_loading() {
            info!("⏳ 已有请求在进行中，忽略本次提交");
        } else {
            debug!("输入为空，忽略本次提交");
        }
    }
    ticket
}
