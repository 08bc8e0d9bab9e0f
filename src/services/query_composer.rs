//! 查询组合
//!
//! 根据请求决定题目集合：搜索词优先，其次分类，否则全部题目。
//! 返回结果始终按题目 ID 升序。

use crate::error::{BankError, BankResult};
use crate::models::Question;
use crate::store::RecordStore;
use std::collections::BTreeMap;
use tracing::debug;

/// 题目查询条件
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionQuery {
    /// 搜索词，去掉首尾空白后为空则视为未提供
    pub search_term: Option<String>,
    /// 分类 ID，提供搜索词时忽略
    pub category: Option<i64>,
}

impl QuestionQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            category: None,
        }
    }

    pub fn in_category(category: i64) -> Self {
        Self {
            search_term: None,
            category: Some(category),
        }
    }

    fn effective_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }
}

/// 计算查询匹配的题目
///
/// # 返回
/// 返回 (按 ID 升序的匹配题目, 分页前的匹配总数)
pub async fn compose(
    store: &dyn RecordStore,
    query: &QuestionQuery,
) -> BankResult<(Vec<Question>, usize)> {
    let mut matches = if let Some(term) = query.effective_term() {
        debug!("按搜索词查询: {:?}", term);
        store.search_questions(term).await?
    } else if let Some(category) = query.category {
        debug!("按分类查询: {}", category);
        store.questions_in_category(category).await?
    } else {
        store.list_questions().await?
    };

    // 不依赖存储层的排序
    matches.sort_by_key(|q| q.id);
    let total = matches.len();
    Ok((matches, total))
}

/// 全部分类的 ID → 名称映射
pub async fn category_map(store: &dyn RecordStore) -> BankResult<BTreeMap<i64, String>> {
    let categories = store.list_categories().await?;
    Ok(categories.into_iter().map(|c| (c.id, c.label)).collect())
}

/// 单个分类的名称，分类不存在时返回 `NotFound`
pub async fn category_label(store: &dyn RecordStore, id: i64) -> BankResult<String> {
    store
        .get_category(id)
        .await?
        .map(|c| c.label)
        .ok_or_else(|| BankError::not_found(format!("分类 {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, SeedData};
    use crate::store::MemoryStore;
    use crate::test_support::{question, sample_store, FailingStore, ReversedStore};

    fn ids(questions: &[Question]) -> Vec<i64> {
        questions.iter().map(|q| q.id).collect()
    }

    #[tokio::test]
    async fn test_all_questions_in_id_order() {
        let store = sample_store();
        let (matches, total) = compose(&store, &QuestionQuery::all()).await.unwrap();
        assert_eq!(ids(&matches), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(total, 6);
    }

    #[tokio::test]
    async fn test_category_filter() {
        let store = sample_store();
        let (matches, total) = compose(&store, &QuestionQuery::in_category(1))
            .await
            .unwrap();
        assert_eq!(ids(&matches), vec![1, 2, 6]);
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let store = sample_store();
        let (matches, total) = compose(&store, &QuestionQuery::search("crest"))
            .await
            .unwrap();
        assert_eq!(ids(&matches), vec![3]);
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_search_takes_precedence_over_category() {
        let store = sample_store();
        // 题目 3 属于分类 2，但仍然会被搜索到
        let query = QuestionQuery {
            search_term: Some("Crest".to_string()),
            category: Some(1),
        };
        let (matches, _) = compose(&store, &query).await.unwrap();
        assert_eq!(ids(&matches), vec![3]);
    }

    #[tokio::test]
    async fn test_blank_search_term_falls_back_to_category() {
        let store = sample_store();
        let query = QuestionQuery {
            search_term: Some("   ".to_string()),
            category: Some(3),
        };
        let (matches, total) = compose(&store, &query).await.unwrap();
        assert_eq!(ids(&matches), vec![5]);
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_padded_search_term_keeps_its_spaces() {
        let store = MemoryStore::from_seed(SeedData {
            categories: vec![Category::new(1, "Science")],
            questions: vec![
                question(1, "Theory of relativity?", 1),
                question(2, "What is the answer?", 1),
            ],
        });
        let (matches, total) = compose(&store, &QuestionQuery::search(" the "))
            .await
            .unwrap();
        assert_eq!(ids(&matches), vec![2]);
        assert_eq!(total, 1);
    }

    #[tokio::test]
    async fn test_id_order_does_not_depend_on_store() {
        let store = ReversedStore(sample_store());

        let (matches, _) = compose(&store, &QuestionQuery::all()).await.unwrap();
        assert_eq!(ids(&matches), vec![1, 2, 3, 4, 5, 6]);

        let (matches, _) = compose(&store, &QuestionQuery::in_category(1))
            .await
            .unwrap();
        assert_eq!(ids(&matches), vec![1, 2, 6]);

        let (matches, _) = compose(&store, &QuestionQuery::search("who"))
            .await
            .unwrap();
        assert_eq!(ids(&matches), vec![2, 5]);
    }

    #[tokio::test]
    async fn test_category_map_and_label() {
        let store = sample_store();
        let map = category_map(&store).await.unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map[&2], "Art");

        assert_eq!(category_label(&store, 3).await.unwrap(), "History");
        let missing = category_label(&store, 42).await.unwrap_err();
        assert!(matches!(missing, BankError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let err = category_map(&FailingStore).await.unwrap_err();
        assert!(matches!(err, BankError::StoreUnavailable(_)));

        let err = compose(&FailingStore, &QuestionQuery::all()).await.unwrap_err();
        assert!(matches!(err, BankError::StoreUnavailable(_)));
    }
}
