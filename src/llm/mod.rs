// LLM abstraction layer

pub mod provider;
pub mod google;

pub use google::GoogleAdapter;
pub use provider::LLMAdapter;
