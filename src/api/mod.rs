//! HTTP 接口层
//!
//! 只负责路由、参数解析和响应格式，业务逻辑都在 `services` 中

pub mod request;
pub mod response;
pub mod router;

pub use router::{handle_request, AppState};
