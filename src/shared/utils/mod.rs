//! 工具函数模块

/// HTML 转义（& < > " '）
///
/// 所有用户提交的文本在进入下游调用或页面回显之前都必须经过这里
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// 格式化金额（Monzo 金额以最小货币单位表示）
pub fn format_amount(minor_units: i64, currency: &str) -> String {
    let sign = if minor_units < 0 { "-" } else { "" };
    let abs = minor_units.unsigned_abs();
    format!("{}{}.{:02} {}", sign, abs / 100, abs % 100, currency)
}

/// 解析表单中的布尔开关
///
/// 字段缺失时使用默认值；"false"/"0"/"off"/"no"/空字符串视为 false
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        None => default,
        Some(v) => !matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "" | "false" | "0" | "off" | "no"
        ),
    }
}

/// 时间工具
pub mod time {
    use chrono::{DateTime, Duration, Utc};

    /// 获取当前UTC时间
    pub fn now_utc() -> DateTime<Utc> {
        Utc::now()
    }

    /// 获取N天前的时间
    pub fn days_ago(days: i64) -> DateTime<Utc> {
        Utc::now() - Duration::days(days)
    }

    /// N秒后的时间
    pub fn seconds_from_now(seconds: i64) -> DateTime<Utc> {
        Utc::now() + Duration::seconds(seconds)
    }

    /// 检查时间是否过期
    pub fn is_expired(datetime: DateTime<Utc>) -> bool {
        datetime <= Utc::now()
    }
}
