//! 回答服务模块
//!
//! 定义外部回答服务的统一抽象，并提供基于 OpenAI 兼容 API 的实现。

mod karma;
mod types;

pub use karma::KarmaClient;
pub use types::AnswerError;

use async_trait::async_trait;

/// 外部回答服务抽象
///
/// 单一方法：输入问题文本，返回回答文本。生产环境使用 KarmaClient，
/// 测试中替换为桩实现。
#[async_trait]
pub trait AnswerProvider: Send + Sync {
    /// 获取问题的回答
    async fn answer(&self, question: &str) -> Result<String, AnswerError>;
}
