pub mod demo;
pub mod prompt;
pub mod session;

pub use demo::{DemoCase, DEMO_CASES};
pub use session::{run_menu, run_questionnaire, SessionOptions};
