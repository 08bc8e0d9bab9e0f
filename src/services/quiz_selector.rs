//! 出题
//!
//! 在分类范围内随机抽取一道本轮测验还没出过的题。
//! 本模块不记录已出过的题目，已出题集合由调用方每次传入。

use crate::error::{BankError, BankResult};
use crate::models::Question;
use crate::store::RecordStore;
use rand::Rng;
use std::collections::HashSet;
use tracing::debug;

/// 表示"任意分类"的分类 ID
pub const QUIZ_ANY_CATEGORY: i64 = 0;

/// 读取候选题目池，按 ID 升序
pub async fn load_pool(store: &dyn RecordStore, category: i64) -> BankResult<Vec<Question>> {
    let mut pool = if category == QUIZ_ANY_CATEGORY {
        store.list_questions().await?
    } else {
        store.questions_in_category(category).await?
    };
    pool.sort_by_key(|q| q.id);
    Ok(pool)
}

/// 从题目池中排除已出过的题干后均匀随机抽取一道
///
/// 按题干文本判断是否出过，题干相同的两道题视为同一道
pub fn pick_unseen<R: Rng + ?Sized>(
    pool: Vec<Question>,
    asked_texts: &HashSet<String>,
    category: i64,
    rng: &mut R,
) -> BankResult<Question> {
    let mut remaining: Vec<Question> = pool
        .into_iter()
        .filter(|q| !asked_texts.contains(&q.text))
        .collect();

    if remaining.is_empty() {
        return Err(BankError::Exhausted { category });
    }

    let index = rng.gen_range(0..remaining.len());
    debug!(
        "分类 {} 剩余 {} 道未出题目，抽中第 {} 道",
        category,
        remaining.len(),
        index + 1
    );
    Ok(remaining.swap_remove(index))
}

/// 抽取下一道题
///
/// # 参数
/// - `store`: 题库
/// - `category`: 分类 ID，`0` 表示任意分类
/// - `asked_texts`: 本轮已出过的题干
/// - `rng`: 随机数来源
///
/// # 返回
/// 返回抽中的题目；没有剩余题目时返回 `Exhausted`
pub async fn next_question<R: Rng + Send + ?Sized>(
    store: &dyn RecordStore,
    category: i64,
    asked_texts: &HashSet<String>,
    rng: &mut R,
) -> BankResult<Question> {
    let pool = load_pool(store, category).await?;
    pick_unseen(pool, asked_texts, category, rng)
}
