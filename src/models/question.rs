use serde::{Deserialize, Serialize};

/// 题目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    /// 题干
    #[serde(rename = "question")]
    pub text: String,
    pub answer: String,
    /// 所属分类 ID（不保证分类存在）
    pub category: i64,
    /// 难度，约定 1-5，不做校验
    pub difficulty: i32,
}

/// 待插入的题目，ID 由存储层分配
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub text: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: i32,
}

impl NewQuestion {
    pub fn with_id(self, id: i64) -> Question {
        Question {
            id,
            text: self.text,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 题干最多显示 80 个字符
        let preview = if self.text.chars().count() > 80 {
            self.text.chars().take(80).collect::<String>() + "..."
        } else {
            self.text.clone()
        };
        write!(f, "#{} [分类 {}] {}", self.id, self.category, preview)
    }
}
