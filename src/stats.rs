use std::time::Duration;

use chrono::{DateTime, Local};

/// 单次请求统计
#[derive(Debug, Clone, PartialEq)]
pub struct RequestStats {
    pub source_chars: usize,
    pub result_chars: usize,
    pub elapsed: Duration,
    pub completed_at: DateTime<Local>,
}

/// 生成请求统计报告
pub fn format_request_stats(stats: &RequestStats, model: &str) -> String {
    let mut report = String::new();
    report.push_str("\n📊 请求统计报告:\n");
    report.push_str("═══════════════════════════════════════\n");
    report.push_str(&format!("   模型: {}\n", model));
    report.push_str(&format!("   原文长度: {} 字符\n", stats.source_chars));
    report.push_str(&format!("   译文长度: {} 字符\n", stats.result_chars));
    report.push_str(&format!("   请求耗时: {}\n", format_duration(stats.elapsed)));
    report.push_str(&format!(
        "   完成时间: {}\n",
        stats.completed_at.format("%Y-%m-%d %H:%M:%S")
    ));
    report
}

/// 打印请求统计
pub fn print_request_stats(stats: &RequestStats, model: &str) {
    print!("{}", format_request_stats(stats, model));
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
