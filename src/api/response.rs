//! 各接口的响应格式
//!
//! 字段命名沿用既有前端的约定，不同接口之间 snake_case 与 camelCase 混用

use crate::error::BankError;
use crate::models::Question;
use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::{Body, Response, StatusCode};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::error;

/// GET /categories
#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: BTreeMap<i64, String>,
}

/// GET /questions
#[derive(Debug, Serialize)]
pub struct QuestionsResponse<'a> {
    pub success: bool,
    pub categories: BTreeMap<i64, String>,
    pub questions: &'a [Question],
    pub current_category: Option<i64>,
    pub total_questions: usize,
}

/// DELETE /questions/{id}
#[derive(Debug, Serialize)]
pub struct DeleteResponse<'a> {
    pub success: bool,
    pub deleted: i64,
    pub current_questions: &'a [Question],
}

/// POST /questions（新建）
#[derive(Debug, Serialize)]
pub struct CreateResponse<'a> {
    pub success: bool,
    pub created: i64,
    pub total_questions: usize,
    pub questions: &'a [Question],
}

/// POST /questions（搜索）
#[derive(Debug, Serialize)]
pub struct SearchResponse<'a> {
    pub success: bool,
    pub questions: &'a [Question],
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
    #[serde(rename = "currentCategory")]
    pub current_category: Option<String>,
}

/// GET /categories/{id}/questions
#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse<'a> {
    pub success: bool,
    pub questions: &'a [Question],
    #[serde(rename = "totalQuestions")]
    pub total_questions: usize,
    #[serde(rename = "currentCategory")]
    pub current_category: String,
}

/// POST /quizzes
#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Question,
}

/// 错误响应
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: u16,
    pub message: &'static str,
}

impl From<&BankError> for ErrorResponse {
    fn from(err: &BankError) -> Self {
        Self {
            success: false,
            error: err.status().as_u16(),
            message: err.public_message(),
        }
    }
}

/// 构建 JSON 响应
pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response<Body> {
    let payload = match serde_json::to_vec(body) {
        Ok(payload) => payload,
        Err(e) => {
            error!("响应序列化失败: {}", e);
            return empty(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    let mut response = Response::new(Body::from(payload));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// 错误信封
pub fn error(err: &BankError) -> Response<Body> {
    json(err.status(), &ErrorResponse::from(err))
}

/// 无响应体
pub fn empty(status: StatusCode) -> Response<Body> {
    let mut response = Response::new(Body::empty());
    *response.status_mut() = status;
    response
}
