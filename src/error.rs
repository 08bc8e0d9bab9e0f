use hyper::StatusCode;
use thiserror::Error;

/// 题库服务错误类型
#[derive(Debug, Error)]
pub enum BankError {
    /// 资源不存在（空页、未知路由、未知分类）
    #[error("资源不存在: {0}")]
    NotFound(String),

    /// 请求无法处理（删除不存在的题目、创建参数不完整等）
    #[error("无法处理的请求: {0}")]
    Unprocessable(String),

    /// 该范围内已没有未出过的题目
    #[error("分类 {category} 中的题目已全部出过")]
    Exhausted { category: i64 },

    /// 请求体 JSON 解析失败
    #[error("请求体解析失败: {0}")]
    InvalidBody(#[from] serde_json::Error),

    /// 存储层读写失败
    #[error("存储不可用: {0}")]
    StoreUnavailable(String),
}

impl BankError {
    /// 对应的 HTTP 状态码
    pub fn status(&self) -> StatusCode {
        match self {
            BankError::NotFound(_) => StatusCode::NOT_FOUND,
            BankError::Unprocessable(_)
            | BankError::Exhausted { .. }
            | BankError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BankError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// 返回给客户端的固定错误信息
    pub fn public_message(&self) -> &'static str {
        match self.status() {
            StatusCode::NOT_FOUND => "resource not found",
            StatusCode::UNPROCESSABLE_ENTITY => "Unprocessable Entity",
            _ => "service unavailable",
        }
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        BankError::NotFound(what.into())
    }

    pub fn unprocessable(why: impl Into<String>) -> Self {
        BankError::Unprocessable(why.into())
    }
}

/// 存储层错误
#[derive(Debug, Error)]
#[error("存储操作 {operation} 失败: {reason}")]
pub struct StoreError {
    pub operation: &'static str,
    pub reason: String,
}

impl StoreError {
    pub fn new(operation: &'static str, reason: impl Into<String>) -> Self {
        Self {
            operation,
            reason: reason.into(),
        }
    }
}

impl From<StoreError> for BankError {
    fn from(err: StoreError) -> Self {
        BankError::StoreUnavailable(err.to_string())
    }
}

/// 题库服务结果类型
pub type BankResult<T> = Result<T, BankError>;
