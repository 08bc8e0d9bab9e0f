//! # Trivia Bank
//!
//! 问答游戏的题库服务：题目的列表、搜索、分类过滤、新建、删除，以及测验出题
//!
//! ## 分层
//!
//! ### ① 存储层（Store）
//! - `store/` - `RecordStore` 接口与内存实现 `MemoryStore`
//!
//! ### ② 业务能力层（Services）
//! - `pager` - 分页
//! - `query_composer` - 按搜索词 / 分类组合查询
//! - `quiz_selector` - 随机抽取本轮未出过的题目
//!
//! ### ③ 接口层（Api）
//! - `api/` - 路由、参数解析、响应格式、CORS
//!
//! ### ④ 应用层
//! - `app` - 加载种子数据、启动 HTTP 服务
//!
//! 业务层不持有任何状态，存储通过参数传入；测验的已出题集合由调用方每次提供。

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod store;

#[cfg(test)]
mod test_support;

// 重新导出常用类型
pub use api::AppState;
pub use app::{serve, App};
pub use config::Config;
pub use error::{BankError, BankResult, StoreError};
pub use models::{Category, NewQuestion, Page, Question};
pub use store::{MemoryStore, RecordStore};
