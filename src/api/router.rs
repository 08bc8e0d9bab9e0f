//! 路由与请求处理

use super::request::{PageParams, QuestionsBody, QuizBody};
use super::response::{
    self, CategoriesResponse, CategoryQuestionsResponse, CreateResponse, DeleteResponse,
    QuestionsResponse, QuizResponse, SearchResponse,
};
use crate::error::{BankError, BankResult};
use crate::services::{category_label, category_map, compose, next_question, paginate, QuestionQuery};
use crate::store::RecordStore;
use hyper::header::{
    HeaderValue, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};
use hyper::body::HttpBody;
use hyper::{Body, Method, Request, Response, StatusCode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::DeserializeOwned;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// 请求体大小上限
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// 请求处理共享的状态
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub questions_per_page: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, questions_per_page: usize) -> Self {
        Self {
            store,
            questions_per_page,
        }
    }

    fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}

/// hyper 服务入口，所有错误都转换为 JSON 错误信封
pub async fn handle_request(
    state: Arc<AppState>,
    req: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let mut response = match route(&state, req).await {
        Ok(response) => response,
        Err(err) => {
            warn!("{} {} 处理失败: {}", method, path, err);
            response::error(&err)
        }
    };

    apply_cors(&mut response);
    info!("{} {} -> {}", method, path, response.status().as_u16());
    Ok(response)
}

async fn route(state: &AppState, req: Request<Body>) -> BankResult<Response<Body>> {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let params = PageParams::from_query(req.uri().query());
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    match (&method, segments.as_slice()) {
        (&Method::OPTIONS, _) => Ok(response::empty(StatusCode::NO_CONTENT)),
        (&Method::GET, ["categories"]) => get_categories(state).await,
        (&Method::GET, ["questions"]) => get_questions(state, params).await,
        (&Method::POST, ["questions"]) => {
            let body: QuestionsBody = read_json(req).await?;
            post_questions(state, params, body).await
        }
        (&Method::DELETE, ["questions", id]) => {
            delete_question(state, params, parse_id(id)?).await
        }
        (&Method::GET, ["categories", id, "questions"]) => {
            get_category_questions(state, params, parse_id(id)?).await
        }
        (&Method::POST, ["quizzes"]) => {
            let body: QuizBody = read_json(req).await?;
            post_quiz(state, body).await
        }
        _ => Err(BankError::not_found(format!("路由 {} {}", method, path))),
    }
}

/// 路径中的 ID 不是整数时视为路由不存在
fn parse_id(raw: &str) -> BankResult<i64> {
    raw.parse()
        .map_err(|_| BankError::not_found(format!("无效的 ID: {}", raw)))
}

/// 读取并解析 JSON 请求体，超过 `MAX_BODY_BYTES` 时拒绝
async fn read_json<T: DeserializeOwned>(req: Request<Body>) -> BankResult<T> {
    let too_large = || BankError::unprocessable(format!("请求体超过 {} 字节", MAX_BODY_BYTES));

    let mut body = req.into_body();
    // Content-Length 已知时直接拒绝
    if body.size_hint().lower() > MAX_BODY_BYTES as u64 {
        return Err(too_large());
    }

    let mut bytes = Vec::new();
    while let Some(chunk) = body.data().await {
        let chunk =
            chunk.map_err(|e| BankError::unprocessable(format!("读取请求体失败: {}", e)))?;
        if bytes.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(too_large());
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

fn apply_cors(response: &mut Response<Body>) {
    let headers = response.headers_mut();
    headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PATCH, DELETE, OPTIONS"),
    );
}

async fn get_categories(state: &AppState) -> BankResult<Response<Body>> {
    let categories = category_map(state.store()).await?;
    Ok(response::json(
        StatusCode::OK,
        &CategoriesResponse {
            success: true,
            categories,
        },
    ))
}

async fn get_questions(state: &AppState, params: PageParams) -> BankResult<Response<Body>> {
    let query = QuestionQuery {
        search_term: None,
        category: params.category,
    };
    let (matches, total) = compose(state.store(), &query).await?;
    let page = paginate(&matches, params.page, state.questions_per_page);

    if page.is_empty() {
        return Err(BankError::not_found(format!(
            "第 {} 页没有题目 (共 {} 道)",
            params.page, total
        )));
    }

    debug!(
        "第 {} 页, 每页 {} 道, 本页 {} 道 / 共 {} 道",
        page.page,
        page.page_size,
        page.len(),
        page.total
    );

    let categories = category_map(state.store()).await?;
    Ok(response::json(
        StatusCode::OK,
        &QuestionsResponse {
            success: true,
            categories,
            questions: page.items,
            current_category: params.category,
            total_questions: total,
        },
    ))
}

async fn delete_question(
    state: &AppState,
    params: PageParams,
    id: i64,
) -> BankResult<Response<Body>> {
    if !state.store().delete_question(id).await? {
        return Err(BankError::unprocessable(format!("题目 {} 不存在", id)));
    }
    debug!("已删除题目 {}", id);

    let (remaining, _) = compose(state.store(), &QuestionQuery::all()).await?;
    let page = paginate(&remaining, params.page, state.questions_per_page);
    Ok(response::json(
        StatusCode::OK,
        &DeleteResponse {
            success: true,
            deleted: id,
            current_questions: page.items,
        },
    ))
}

async fn post_questions(
    state: &AppState,
    params: PageParams,
    body: QuestionsBody,
) -> BankResult<Response<Body>> {
    if let Some(term) = body.search_term() {
        let query = QuestionQuery {
            search_term: Some(term.to_string()),
            category: body.category,
        };
        let (matches, total) = compose(state.store(), &query).await?;
        let page = paginate(&matches, params.page, state.questions_per_page);

        let current_category = match body.category {
            Some(id) => state.store().get_category(id).await?.map(|c| c.label),
            None => None,
        };

        return Ok(response::json(
            StatusCode::OK,
            &SearchResponse {
                success: true,
                questions: page.items,
                total_questions: total,
                current_category,
            },
        ));
    }

    let created = state
        .store()
        .insert_question(body.into_new_question()?)
        .await?;
    info!("新建题目 {}", created);

    let (all, total) = compose(state.store(), &QuestionQuery::all()).await?;
    let page = paginate(&all, params.page, state.questions_per_page);
    Ok(response::json(
        StatusCode::OK,
        &CreateResponse {
            success: true,
            created: created.id,
            total_questions: total,
            questions: page.items,
        },
    ))
}

async fn get_category_questions(
    state: &AppState,
    params: PageParams,
    category: i64,
) -> BankResult<Response<Body>> {
    let label = category_label(state.store(), category).await?;
    let (matches, total) = compose(state.store(), &QuestionQuery::in_category(category)).await?;
    let page = paginate(&matches, params.page, state.questions_per_page);

    Ok(response::json(
        StatusCode::OK,
        &CategoryQuestionsResponse {
            success: true,
            questions: page.items,
            total_questions: total,
            current_category: label,
        },
    ))
}

async fn post_quiz(state: &AppState, body: QuizBody) -> BankResult<Response<Body>> {
    if let Some(label) = body.quiz_category.as_ref().and_then(|c| c.label.as_deref()) {
        debug!("测验分类: {}", label);
    }
    let (category, asked) = body.into_parts()?;
    debug!("分类 {} 已出 {} 道题", category, asked.len());
    let mut rng = StdRng::from_entropy();
    let question = next_question(state.store(), category, &asked, &mut rng).await?;

    Ok(response::json(
        StatusCode::OK,
        &QuizResponse {
            success: true,
            question,
        },
    ))
}
