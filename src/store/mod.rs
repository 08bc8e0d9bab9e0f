//! 存储层
//!
//! 题库的持久化细节不在本服务范围内，业务层只通过 `RecordStore` 访问数据。
//! 所有返回列表的方法都按 ID 升序返回。

pub mod memory;

pub use memory::MemoryStore;

use crate::error::StoreError;
use crate::models::{Category, NewQuestion, Question};
use async_trait::async_trait;

/// 题目与分类的存储接口
///
/// 每个方法单独保证原子性，调用方不需要额外加锁
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// 全部题目
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError>;

    /// 指定分类下的题目
    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, StoreError>;

    /// 题干包含 `term`（不区分大小写）的题目
    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError>;

    /// 插入题目并返回分配了 ID 的记录
    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError>;

    /// 删除题目，题目不存在时返回 `false`
    async fn delete_question(&self, id: i64) -> Result<bool, StoreError>;

    /// 全部分类
    async fn list_categories(&self) -> Result<Vec<Category>, StoreError>;

    async fn get_category(&self, id: i64) -> Result<Option<Category>, StoreError>;
}
