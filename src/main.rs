use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::AsyncReadExt;
use tracing::{error, info};

use nuance_translator::api_constants::error_messages;
use nuance_translator::clipboard::copy_to_clipboard;
use nuance_translator::config::{Cli, NuanceConfig};
use nuance_translator::gemini::GeminiClient;
use nuance_translator::render::render_level_listing;
use nuance_translator::repl::run_interactive;
use nuance_translator::session::{SubmitOutcome, TranslationController};
use nuance_translator::stats::{format_duration, print_request_stats};
use nuance_translator::translator::NuanceTranslator;
use nuance_translator::utils::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    if cli.list_levels {
        let listing = render_level_listing(cli.lang, cli.level).context("正式程度设置无效")?;
        print!("{}", listing);
        return Ok(());
    }

    let config = NuanceConfig::from_cli(&cli).context("配置无效")?;
    let client = GeminiClient::new(&config).context("创建Gemini客户端失败")?;
    let model = client.model().to_string();

    let controller = Arc::new(TranslationController::new(
        NuanceTranslator::new(Arc::new(client)),
        config.language(),
    ));
    controller
        .set_formality_index(config.formality_index())
        .await
        .context("正式程度设置无效")?;

    let text = if cli.stdin {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("读取标准输入失败")?;
        Some(buffer)
    } else {
        cli.text.clone()
    };

    match text {
        Some(text) => translate_once(&cli, &controller, &model, text).await,
        None => run_interactive(controller, &model, cli.stats).await,
    }
}

/// 单次翻译：结果写到标准输出，失败时以非零状态码退出
async fn translate_once(
    cli: &Cli,
    controller: &TranslationController,
    model: &str,
    text: String,
) -> Result<()> {
    controller.set_input_text(text).await;

    let state = controller.snapshot().await;
    if !cli.quiet {
        info!("🚀 启动翻译 - 模型: {}", model);
        info!("🌐 目标语言: {}", state.language());
        info!("🎚️  风格: {}", state.selected_level().title);
    }

    let start = Instant::now();
    let outcome = controller.translate().await;
    let state = controller.snapshot().await;

    match outcome {
        SubmitOutcome::Succeeded => {
            let Some(result) = state.result() else {
                anyhow::bail!(error_messages::UNEXPECTED_ERROR);
            };

            if !cli.quiet {
                info!("✅ 翻译完成！总耗时: {}", format_duration(start.elapsed()));
            }
            println!("{}", result.text);

            if cli.copy {
                match copy_to_clipboard(&result.text) {
                    Ok(()) => info!("📋 已复制到剪贴板"),
                    Err(e) => error!("❌ 复制失败: {}", e),
                }
            }
            if cli.stats || cli.verbose {
                print_request_stats(&result.stats, model);
            }
            Ok(())
        }
        SubmitOutcome::Ignored => {
            eprintln!("Error: {}", error_messages::EMPTY_INPUT);
            std::process::exit(1);
        }
        SubmitOutcome::Failed | SubmitOutcome::Discarded => {
            let message = state.error().unwrap_or(error_messages::UNEXPECTED_ERROR);
            error!("❌ 翻译失败: {}", message);
            eprintln!("Error: {}", message);
            std::process::exit(1);
        }
    }
}
