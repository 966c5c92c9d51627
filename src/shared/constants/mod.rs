//! 常量定义模块

/// 路由路径
pub mod routes {
    pub const INDEX: &str = "/";
    pub const ACCOUNTS: &str = "/accounts";
    pub const FEED_ITEM: &str = "/feed_item";
    pub const TRANSACTIONS: &str = "/transactions";
    pub const RAW_REQUEST: &str = "/raw_request";
    pub const SETUP: &str = "/setup/";
    pub const SETUP_CALLBACK: &str = "/setup/callback/";
}

/// 账号相关常量
pub mod accounts {
    /// 无法返回交易记录的账号类型（按显示名称匹配）
    pub const EXCLUDED_ACCOUNT_TYPES: [&str; 2] = ["Loan (Flex)", "Loan"];

    /// 下拉框中的占位选项
    pub const PLACEHOLDER: &str = "Please Select";
}

/// 交易查询相关常量
pub mod transactions {
    /// 查询最近多少天的交易
    pub const WINDOW_DAYS: i64 = 30;

    /// 默认展开的字段
    pub const EXPAND: [&str; 1] = ["merchant"];
}

/// Feed item 相关常量
pub mod feed_item {
    pub const FEED_TYPE_BASIC: &str = "basic";

    /// 可选参数（表单字段名与 API 参数名一致）
    pub const OPTIONAL_PARAMETERS: [&str; 5] = [
        "body",
        "title_color",
        "body_color",
        "background_color",
        "image_url",
    ];
}

/// OAuth 相关常量
pub mod oauth {
    pub const TOKEN_PATH: &str = "/oauth2/token";
    pub const STATE_LENGTH: usize = 32;
}
