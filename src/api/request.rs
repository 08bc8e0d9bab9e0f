//! 请求参数解析

use crate::error::{BankError, BankResult};
use crate::models::NewQuestion;
use serde::Deserialize;
use std::collections::HashSet;

/// URL 查询参数中的分页与分类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    /// 页码，缺省或无法解析时为 1
    pub page: usize,
    /// 分类过滤，缺省或无法解析时不过滤
    pub category: Option<i64>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: 1,
            category: None,
        }
    }
}

impl PageParams {
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "page" => {
                    if let Ok(page) = value.trim().parse() {
                        params.page = page;
                    }
                }
                "category" => {
                    if let Ok(category) = value.trim().parse() {
                        params.category = Some(category);
                    }
                }
                _ => {}
            }
        }
        params
    }
}

/// POST /questions 的请求体：新建题目或搜索
#[derive(Debug, Default, Deserialize)]
pub struct QuestionsBody {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flexible_int")]
    pub category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_flexible_int")]
    pub difficulty: Option<i64>,
    #[serde(default, rename = "searchTerm")]
    pub search_term: Option<String>,
}

impl QuestionsBody {
    /// 搜索词，全为空白时视为未提供
    pub fn search_term(&self) -> Option<&str> {
        self.search_term
            .as_deref()
            .filter(|t| !t.trim().is_empty())
    }

    /// 校验并转换为待插入的题目
    pub fn into_new_question(self) -> BankResult<NewQuestion> {
        let text = self
            .question
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .ok_or_else(|| BankError::unprocessable("题干不能为空"))?;
        let answer = self
            .answer
            .ok_or_else(|| BankError::unprocessable("缺少答案"))?;
        let category = self
            .category
            .ok_or_else(|| BankError::unprocessable("缺少分类"))?;
        let difficulty = self
            .difficulty
            .ok_or_else(|| BankError::unprocessable("缺少难度"))?;
        let difficulty = i32::try_from(difficulty)
            .map_err(|_| BankError::unprocessable(format!("难度超出范围: {}", difficulty)))?;

        Ok(NewQuestion {
            text,
            answer,
            category,
            difficulty,
        })
    }
}

/// 测验请求中的分类
#[derive(Debug, Deserialize)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "deserialize_flexible_int")]
    pub id: Option<i64>,
    #[serde(default, rename = "type")]
    pub label: Option<String>,
}

/// POST /quizzes 的请求体
#[derive(Debug, Deserialize)]
pub struct QuizBody {
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
    #[serde(default)]
    pub previous_questions: Option<Vec<String>>,
}

impl QuizBody {
    /// 返回 (分类 ID, 已出过的题干)
    pub fn into_parts(self) -> BankResult<(i64, HashSet<String>)> {
        let category = self
            .quiz_category
            .and_then(|c| c.id)
            .ok_or_else(|| BankError::unprocessable("缺少 quiz_category.id"))?;
        let asked = self
            .previous_questions
            .unwrap_or_default()
            .into_iter()
            .collect();
        Ok((category, asked))
    }
}

/// 整数字段既可能是数字也可能是字符串（前端表单提交的是字符串）
fn deserialize_flexible_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{Error, Visitor};
    use std::fmt;

    struct FlexibleIntVisitor;

    impl<'de> Visitor<'de> for FlexibleIntVisitor {
        type Value = Option<i64>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a string containing an integer")
        }

        fn visit_unit<E: Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_i64<E: Error>(self, value: i64) -> Result<Self::Value, E> {
            Ok(Some(value))
        }

        fn visit_u64<E: Error>(self, value: u64) -> Result<Self::Value, E> {
            i64::try_from(value)
                .map(Some)
                .map_err(|_| E::custom(format!("integer out of range: {}", value)))
        }

        fn visit_f64<E: Error>(self, value: f64) -> Result<Self::Value, E> {
            if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                Ok(Some(value as i64))
            } else {
                Err(E::custom(format!("not an integer: {}", value)))
            }
        }

        fn visit_str<E: Error>(self, value: &str) -> Result<Self::Value, E> {
            let value = value.trim();
            if value.is_empty() {
                return Ok(None);
            }
            value
                .parse()
                .map(Some)
                .map_err(|_| E::custom(format!("not an integer: {:?}", value)))
        }
    }

    deserializer.deserialize_any(FlexibleIntVisitor)
}
