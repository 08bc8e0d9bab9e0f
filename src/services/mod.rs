pub mod pager;
pub mod query_composer;
pub mod quiz_selector;

pub use pager::paginate;
pub use query_composer::{category_label, category_map, compose, QuestionQuery};
pub use quiz_selector::{next_question, QUIZ_ANY_CATEGORY};
