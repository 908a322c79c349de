//! REST API 请求/响应模型

use serde::{Deserialize, Serialize};

/// 问题请求
///
/// question 字段缺失或非文本时由 Json 提取器在处理器之前拒绝
#[derive(Debug, Deserialize)]
pub struct QuestionRequest {
    pub question: String,
}

/// 回答响应
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub answer: String,
}
