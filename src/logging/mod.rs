use anyhow::{Context, Result};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{self, FormatEvent, FormatFields, format::Writer},
    layer::{Layer, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// EnvFilter 指令, 如 `"info"` 或 `"info,nalkit_codec=trace"`
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_true")]
    pub with_ansi: bool,
    /// 输出事件 target (模块路径) 而不是源文件位置
    #[serde(default)]
    pub with_target: bool,
}

impl LoggingConfig {
    /// 从 JSON 文本加载, 缺省字段取默认值
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("解析日志配置失败")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            with_ansi: true,
            with_target: false,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

/// 安装全局控制台日志订阅器
///
/// `log` 记录 (各 nalkit crate 的输出) 经 tracing-log 桥接一并输出.
/// 全局订阅器只能安装一次, 重复调用返回错误.
pub fn init(config: LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.level)
        .with_context(|| format!("无效的日志级别, level={}", config.level))?;

    let console_layer = fmt::Layer::default()
        .with_writer(std::io::stdout)
        .with_ansi(config.with_ansi)
        .event_format(ConsoleFormatter {
            with_ansi: config.with_ansi,
            with_target: config.with_target,
        })
        .with_filter(filter);

    Registry::default()
        .with(console_layer)
        .try_init()
        .context("日志系统已初始化")?;

    Ok(())
}

fn format_timestamp(now: &NaiveDateTime) -> String {
    format!(
        "[{:02}-{:02} {:02}:{:02}:{:02}.{:03}]",
        now.month(),
        now.day(),
        now.hour(),
        now.minute(),
        now.second(),
        now.nanosecond() / 1_000_000 % 1000
    )
}

fn level_color(level: &tracing::Level) -> &'static str {
    match *level {
        tracing::Level::ERROR => "\x1b[31m",
        tracing::Level::WARN => "\x1b[33m",
        tracing::Level::INFO => "\x1b[32m",
        _ => "\x1b[34m",
    }
}

struct ConsoleFormatter {
    with_ansi: bool,
    with_target: bool,
}

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write!(writer, "{} ", format_timestamp(&Local::now().naive_local()))?;

        let level = meta.level().to_string();
        if self.with_ansi {
            write!(writer, "{}{:5}\x1b[0m ", level_color(meta.level()), level)?;
        } else {
            write!(writer, "{:5} ", level)?;
        }

        if self.with_target {
            write!(writer, "{} > ", meta.target())?;
        } else {
            write!(
                writer,
                "{}:{} > ",
                meta.file().unwrap_or("unknown"),
                meta.line().unwrap_or(0)
            )?;
        }
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_timestamp() {
        let time = NaiveDate::from_ymd_opt(2026, 2, 6)
            .and_then(|d| d.and_hms_milli_opt(9, 5, 3, 42));
        match time {
            Some(time) => assert_eq!(format_timestamp(&time), "[02-06 09:05:03.042]"),
            None => panic!("测试时间初始化失败"),
        }
    }

    #[test]
    fn test_level_color() {
        assert_eq!(level_color(&tracing::Level::WARN), "\x1b[33m");
        assert_eq!(level_color(&tracing::Level::TRACE), "\x1b[34m");
    }

    #[test]
    fn test_config_defaults_from_json() {
        let config = LoggingConfig::from_json("{}").unwrap();
        assert_eq!(config, LoggingConfig::default());
        assert_eq!(config.level, "info");
        assert!(config.with_ansi);
        assert!(!config.with_target);
    }

    #[test]
    fn test_config_from_json() {
        let config =
            LoggingConfig::from_json(r#"{"level":"nalkit_codec=trace","with_ansi":false}"#)
                .unwrap();
        assert_eq!(config.level, "nalkit_codec=trace");
        assert!(!config.with_ansi);
        assert!(LoggingConfig::from_json("{\"level\": 3}").is_err());
    }
}
