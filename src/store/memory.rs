//! 内存存储实现

use super::RecordStore;
use crate::error::StoreError;
use crate::models::{Category, NewQuestion, Question, SeedData};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::debug;

#[derive(Debug, Default)]
struct Tables {
    questions: BTreeMap<i64, Question>,
    categories: BTreeMap<i64, Category>,
    /// 下一个可分配的题目 ID，删除后不回收；`None` 表示 ID 已用尽
    next_id: Option<i64>,
}

/// 基于 `BTreeMap` 的内存题库，按 ID 有序
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// 创建空题库
    pub fn new() -> Self {
        Self::from_seed(SeedData::default())
    }

    /// 使用种子数据创建题库
    pub fn from_seed(seed: SeedData) -> Self {
        let next_id = seed
            .questions
            .iter()
            .map(|q| q.id)
            .max()
            .unwrap_or(0)
            .checked_add(1);
        let tables = Tables {
            questions: seed.questions.into_iter().map(|q| (q.id, q)).collect(),
            categories: seed.categories.into_iter().map(|c| (c.id, c)).collect(),
            next_id,
        };
        Self {
            tables: RwLock::new(tables),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.questions.values().cloned().collect())
    }

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        let needle = term.to_lowercase();
        let tables = self.tables.read().await;
        Ok(tables
            .questions
            .values()
            .filter(|q| q.text.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        let mut tables = self.tables.write().await;
        let id = tables
            .next_id
            .ok_or_else(|| StoreError::new("insert_question", "题目 ID 已用尽"))?;
        tables.next_id = id.checked_add(1);

        let question = question.with_id(id);
        tables.questions.insert(id, question.clone());
        debug!("插入题目 {}", question);
        Ok(question)
    }

    async fn delete_question(&self, id: i64) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.questions.remove(&id).is_some())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().cloned().collect())
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }
}
