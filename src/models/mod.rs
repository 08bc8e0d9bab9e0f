pub mod category;
pub mod loaders;
pub mod page;
pub mod question;

pub use category::Category;
pub use loaders::{load_seed_file, SeedData};
pub use page::Page;
pub use question::{NewQuestion, Question};
