pub mod openai;

use crate::base::types::Res;
use async_trait::async_trait;
use std::ops::Deref;
use std::sync::Arc;

// Traits.

/// Generic speech synthesis client trait that clients must implement.
#[async_trait]
pub trait GenericSpeechClient: Send + Sync + 'static {
    /// Synthesize the given text into spoken audio, returned as encoded bytes.
    async fn synthesize(&self, text: &str) -> Res<Vec<u8>>;
}

// Structs.

/// Speech synthesis client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct SpeechClient {
    inner: Arc<dyn GenericSpeechClient>,
}

impl SpeechClient {
    /// Create a new speech client from any [`GenericSpeechClient`] implementation.
    pub fn new(inner: Arc<dyn GenericSpeechClient>) -> Self {
        Self { inner }
    }
}

impl Deref for SpeechClient {
    type Target = dyn GenericSpeechClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}
