use crate::models::{Category, NewQuestion, Question};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use tokio::fs;

/// 种子文件中的一道题，`id` 可省略
#[derive(Debug, Clone, Deserialize)]
struct SeedQuestion {
    #[serde(default)]
    id: Option<i64>,
    question: String,
    answer: String,
    category: i64,
    #[serde(default = "default_difficulty")]
    difficulty: i32,
}

fn default_difficulty() -> i32 {
    1
}

#[derive(Debug, Deserialize)]
struct SeedFile {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    questions: Vec<SeedQuestion>,
}

/// 题库初始数据
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub categories: Vec<Category>,
    pub questions: Vec<Question>,
}

/// 解析 TOML 种子内容
///
/// 未指定 `id` 的题目按出现顺序接在最大显式 ID 之后编号；
/// 加载后必须仍有可分配给新题目的 ID
pub fn parse_seed(content: &str) -> Result<SeedData> {
    let seed: SeedFile = toml::from_str(content).context("无法解析题库种子内容")?;

    let max_id = seed
        .questions
        .iter()
        .filter_map(|q| q.id)
        .max()
        .unwrap_or(0);
    let mut next_id = max_id
        .checked_add(1)
        .with_context(|| format!("题目 ID 超出范围: {}", max_id))?;

    let mut questions = Vec::with_capacity(seed.questions.len());
    for q in seed.questions {
        let id = match q.id {
            Some(id) => id,
            None => {
                let id = next_id;
                next_id = next_id
                    .checked_add(1)
                    .with_context(|| format!("自动分配的题目 ID 超出范围: {}", id))?;
                id
            }
        };
        let new_question = NewQuestion {
            text: q.question,
            answer: q.answer,
            category: q.category,
            difficulty: q.difficulty,
        };
        questions.push(new_question.with_id(id));
    }

    questions.sort_by_key(|q| q.id);
    if let Some(pair) = questions.windows(2).find(|w| w[0].id == w[1].id) {
        anyhow::bail!("题目 ID 重复: {}", pair[0].id);
    }

    Ok(SeedData {
        categories: seed.categories,
        questions,
    })
}

/// 从 TOML 文件加载题库初始数据
pub async fn load_seed_file(path: &Path) -> Result<SeedData> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取种子文件: {}", path.display()))?;

    let seed = parse_seed(&content)
        .with_context(|| format!("无法解析种子文件: {}", path.display()))?;

    tracing::info!(
        "成功加载 {} 个分类, {} 道题目",
        seed.categories.len(),
        seed.questions.len()
    );

    Ok(seed)
}
