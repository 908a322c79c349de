//! 回答服务类型定义

/// 回答服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum AnswerError {
    /// HTTP 请求错误
    #[error("HTTP 请求失败: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API 返回错误
    #[error("API 错误 ({status}): {message}")]
    ApiError { status: u16, message: String },

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 回答内容为空
    #[error("回答内容为空")]
    EmptyAnswer,
}
