//! 单元测试共用的题库夹具

use crate::error::StoreError;
use crate::models::{Category, NewQuestion, Question, SeedData};
use crate::store::{MemoryStore, RecordStore};
use async_trait::async_trait;

pub fn question(id: i64, text: &str, category: i64) -> Question {
    NewQuestion {
        text: text.to_string(),
        answer: format!("answer {}", id),
        category,
        difficulty: 1,
    }
    .with_id(id)
}

/// 三个分类，六道题；题目 3 的题干包含 "Crest Toothpaste"，属于分类 2
pub fn sample_store() -> MemoryStore {
    MemoryStore::from_seed(SeedData {
        categories: vec![
            Category::new(1, "Science"),
            Category::new(2, "Art"),
            Category::new(3, "History"),
        ],
        questions: vec![
            question(1, "What is the heaviest organ in the human body?", 1),
            question(2, "Who discovered penicillin?", 1),
            question(3, "Which brand advertised Crest Toothpaste in a painting?", 2),
            question(4, "La Giaconda is better known as what?", 2),
            question(5, "Who invented Peanut Butter?", 3),
            question(6, "What is the largest lake in Africa?", 1),
        ],
    })
}

/// 所有操作都失败的存储
pub struct FailingStore;

#[async_trait]
impl RecordStore for FailingStore {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        Err(StoreError::new("list_questions", "connection refused"))
    }

    async fn questions_in_category(&self, _category: i64) -> Result<Vec<Question>, StoreError> {
        Err(StoreError::new("questions_in_category", "connection refused"))
    }

    async fn search_questions(&self, _term: &str) -> Result<Vec<Question>, StoreError> {
        Err(StoreError::new("search_questions", "connection refused"))
    }

    async fn insert_question(&self, _question: NewQuestion) -> Result<Question, StoreError> {
        Err(StoreError::new("insert_question", "connection refused"))
    }

    async fn delete_question(&self, _id: i64) -> Result<bool, StoreError> {
        Err(StoreError::new("delete_question", "connection refused"))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        Err(StoreError::new("list_categories", "connection refused"))
    }

    async fn get_category(&self, _id: i64) -> Result<Option<Category>, StoreError> {
        Err(StoreError::new("get_category", "connection refused"))
    }
}

/// 按 ID 倒序返回结果的存储，用于验证业务层自行排序
pub struct ReversedStore(pub MemoryStore);

fn reversed(mut questions: Vec<Question>) -> Vec<Question> {
    questions.reverse();
    questions
}

#[async_trait]
impl RecordStore for ReversedStore {
    async fn list_questions(&self) -> Result<Vec<Question>, StoreError> {
        self.0.list_questions().await.map(reversed)
    }

    async fn questions_in_category(&self, category: i64) -> Result<Vec<Question>, StoreError> {
        self.0.questions_in_category(category).await.map(reversed)
    }

    async fn search_questions(&self, term: &str) -> Result<Vec<Question>, StoreError> {
        self.0.search_questions(term).await.map(reversed)
    }

    async fn insert_question(&self, question: NewQuestion) -> Result<Question, StoreError> {
        self.0.insert_question(question).await
    }

    async fn delete_question(&self, id: i64) -> Result<bool, StoreError> {
        self.0.delete_question(id).await
    }

    async fn list_categories(&self) -> Result<Vec<Category>, StoreError> {
        self.0.list_categories().await
    }

    async fn get_category(&self, id: i64) -> Result<Option<Category>, StoreError> {
        self.0.get_category(id).await
    }
}
