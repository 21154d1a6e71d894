use async_trait::async_trait;

use crate::cli::ProviderKind;
use crate::errors::Result;
use crate::wire::ChatRequest;

pub mod openai;

/// One blocking round-trip to a chat-completion endpoint, returning the
/// assistant message text.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    async fn complete(&self, req: &ChatRequest, debug: bool) -> Result<String>;
}

pub type DynProvider = Box<dyn ChatProvider + Send + Sync>;

/// The credential is an explicit argument here, never ambient process state.
pub fn make_provider(kind: ProviderKind, api_key: String, timeout_secs: u64) -> DynProvider {
    match kind {
        ProviderKind::OpenAI => Box::new(openai::OpenAIProvider::new(api_key, timeout_secs)),
    }
}
