//! 分页
//!
//! 页码从 1 开始；超出范围的页返回空结果，是否视为"不存在"由接口层决定

use crate::models::Page;

/// 取出第 `page` 页的数据
///
/// # 参数
/// - `items`: 已排好序的数据
/// - `page`: 页码（从 1 开始，0 视为超出范围）
/// - `page_size`: 每页数量
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let slice = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(page_size).min(items.len());
            let end = start.saturating_add(page_size).min(items.len());
            &items[start..end]
        }
        None => &items[..0],
    };

    Page {
        items: slice,
        page,
        page_size,
        total: items.len(),
    }
}
