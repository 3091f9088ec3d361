use crate::api_constants::prompt_config::LOG_PREVIEW_CHARS;

/// 初始化日志系统
pub fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .init();
}

/// 日志用的原文预览：单行化并按字符截断
pub fn preview(text: &str) -> String {
    let single_line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if single_line.chars().count() <= LOG_PREVIEW_CHARS {
        single_line
    } else {
        let truncated: String = single_line.chars().take(LOG_PREVIEW_CHARS).collect();
        format!("{}…", truncated)
    }
}
