//! 应用状态管理
//!
//! 定义在请求处理器之间共享的状态。

use std::sync::Arc;

use crate::answer::AnswerProvider;

/// 应用共享状态
///
/// 使用 Arc 包裹以便在多个处理器之间安全共享
#[derive(Clone)]
pub struct AppState {
    /// 外部回答服务
    pub provider: Arc<dyn AnswerProvider>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(provider: Arc<dyn AnswerProvider>) -> Self {
        Self { provider }
    }
}

/// 创建可共享的应用状态
pub fn create_shared_state(provider: Arc<dyn AnswerProvider>) -> Arc<AppState> {
    Arc::new(AppState::new(provider))
}
