pub mod markdown;
pub mod prompts;
pub mod session;
