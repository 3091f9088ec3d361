//! 交互模式
//!
//! 逐行读取命令；翻译请求在后台任务中执行，期间仍可继续输入命令

use std::sync::Arc;

use anyhow::{Context, Result};
use futures::future::OptionFuture;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::clipboard::copy_to_clipboard;
use crate::formality::TargetLanguage;
use crate::render::{render_levels, render_selection, render_view};
use crate::session::{SubmitOutcome, TranslationController};
use crate::stats::print_request_stats;

pub const HELP: &str = "\
Commands:
  <text>          set the text and translate it
  :text <text>    set the text without translating
  :go             translate the current text
  :lang <en|ja>   switch target language (resets the style to the midpoint)
  :level <n>      choose a style from the current language's table
  :levels         list the styles of the current language
  :show           show the current selection and view
  :copy           copy the last translation to the clipboard
  :help           show this help
  :quit           exit";

/// 交互命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Translate(String),
    SetText(String),
    Submit,
    SetLanguage(TargetLanguage),
    SetLevel(usize),
    Levels,
    Show,
    Copy,
    Help,
    Quit,
    Empty,
}

/// 解析一行输入
pub fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Command::Empty);
    }
    if !trimmed.starts_with(':') {
        return Ok(Command::Translate(line.trim_end_matches(['\r', '\n']).to_string()));
    }

    let (name, arg) = match trimmed[1..].split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (&trimmed[1..], ""),
    };

    match name {
        "text" => Ok(Command::SetText(arg.to_string())),
        "go" => Ok(Command::Submit),
        "lang" => arg.parse().map(Command::SetLanguage),
        "level" => arg
            .parse()
            .map(Command::SetLevel)
            .map_err(|_| format!("expected a style number, got: {}", arg)),
        "levels" => Ok(Command::Levels),
        "show" => Ok(Command::Show),
        "copy" => Ok(Command::Copy),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command: :{} (try :help)", other)),
    }
}

/// 运行交互会话，直到 `:quit` 或输入结束
pub async fn run_interactive(
    controller: Arc<TranslationController>,
    model: &str,
    show_stats: bool,
) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut pending: Option<JoinHandle<SubmitOutcome>> = None;

    println!("{}\n", HELP);
    println!("{}\n", render_selection(&controller.snapshot().await));

    loop {
        tokio::select! {
            Some(joined) = OptionFuture::from(pending.as_mut()) => {
                pending = None;
                let outcome = joined.context("翻译任务异常终止")?;
                report_outcome(&controller, outcome, model, show_stats).await;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("读取标准输入失败")? else {
                    break;
                };

                let command = match parse_command(&line) {
                    Ok(command) => command,
                    Err(message) => {
                        println!("{}", message);
                        continue;
                    }
                };

                match command {
                    Command::Empty => {}
                    Command::Quit => break,
                    Command::Help => println!("{}", HELP),
                    Command::Levels => {
                        let state = controller.snapshot().await;
                        print!("{}", render_levels(state.language(), Some(state.formality_index())));
                    }
                    Command::Show => {
                        let state = controller.snapshot().await;
                        println!("{}\n\n{}", render_selection(&state), render_view(&state));
                    }
                    Command::SetText(text) => controller.set_input_text(text).await,
                    Command::SetLanguage(language) => {
                        controller.set_language(language).await;
                        println!("{}", render_selection(&controller.snapshot().await));
                    }
                    Command::SetLevel(index) => match controller.set_formality_index(index).await {
                        Ok(()) => println!("{}", render_selection(&controller.snapshot().await)),
                        Err(e) => println!("{}", e),
                    },
                    Command::Copy => copy_result(&controller).await,
                    Command::Translate(text) => submit(&controller, &mut pending, Some(text)).await,
                    Command::Submit => submit(&controller, &mut pending, None).await,
                }
            }
        }
    }

    if let Some(handle) = pending.take() {
        info!("⏳ 等待进行中的翻译完成");
        let outcome = handle.await.context("翻译任务异常终止")?;
        report_outcome(&controller, outcome, model, show_stats).await;
    }

    Ok(())
}

/// 提交翻译；`text` 为 `Some` 时先替换输入。已有请求在途时输入保持不变
async fn submit(
    controller: &Arc<TranslationController>,
    pending: &mut Option<JoinHandle<SubmitOutcome>>,
    text: Option<String>,
) {
    if pending.is_some() {
        println!("⏳ A translation is already in progress; input ignored.");
        return;
    }

    let blank = match &text {
        Some(text) => text.trim().is_empty(),
        None => controller.snapshot().await.input_text().trim().is_empty(),
    };
    if blank {
        return;
    }

    println!("{}", crate::render::LOADING);
    let controller = controller.clone();
    *pending = Some(tokio::spawn(async move {
        match text {
            Some(text) => controller.translate_text(text).await,
            None => controller.translate().await,
        }
    }));
}

async fn report_outcome(
    controller: &TranslationController,
    outcome: SubmitOutcome,
    model: &str,
    show_stats: bool,
) {
    let state = controller.snapshot().await;
    match outcome {
        SubmitOutcome::Discarded => {
            println!("(the selection changed while translating; result discarded)");
        }
        SubmitOutcome::Ignored => {}
        SubmitOutcome::Succeeded | SubmitOutcome::Failed => {
            println!("{}\n", render_view(&state));
            if show_stats {
                if let Some(result) = state.result() {
                    print_request_stats(&result.stats, model);
                }
            }
        }
    }
}

async fn copy_result(controller: &TranslationController) {
    let state = controller.snapshot().await;
    match state.result() {
        Some(result) => match copy_to_clipboard(&result.text) {
            Ok(()) => println!("📋 Copied!"),
            Err(e) => {
                warn!("❌ 复制失败: {}", e);
                println!("{}", e);
            }
        },
        None => println!("Nothing to copy yet."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_translates() {
        assert_eq!(
            parse_command("Please review this by EOD\n"),
            Ok(Command::Translate("Please review this by EOD".to_string()))
        );
    }

    #[test]
    fn test_blank_line_is_empty() {
        assert_eq!(parse_command("   "), Ok(Command::Empty));
    }

    #[test]
    fn test_language_command() {
        assert_eq!(
            parse_command(":lang ja"),
            Ok(Command::SetLanguage(TargetLanguage::Japanese))
        );
        assert!(parse_command(":lang fr").is_err());
    }

    #[test]
    fn test_level_command() {
        assert_eq!(parse_command(":level 5"), Ok(Command::SetLevel(5)));
        assert!(parse_command(":level high").is_err());
    }

    #[test]
    fn test_text_command_keeps_inner_spacing() {
        assert_eq!(
            parse_command(":text  hello   world "),
            Ok(Command::SetText("hello   world".to_string()))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_command(":go"), Ok(Command::Submit));
        assert_eq!(parse_command(":levels"), Ok(Command::Levels));
        assert_eq!(parse_command(":show"), Ok(Command::Show));
        assert_eq!(parse_command(":copy"), Ok(Command::Copy));
        assert_eq!(parse_command(":q"), Ok(Command::Quit));
        assert_eq!(parse_command(":?"), Ok(Command::Help));
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(
            parse_command(":frobnicate"),
            Err("unknown command: :frobnicate (try :help)".to_string())
        );
    }
}
