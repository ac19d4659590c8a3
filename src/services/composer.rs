// src/services/composer.rs
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::{
    classifier::{FoodIntent, TourRoute},
    completion::Completer,
    guide::GuideMode,
};

pub const FOOD_SWITCH_REPLY: &str =
    "I've switched you to our Food Guide! You can ask about restaurants, local dishes, and more.";
pub const APOLOGY_REPLY: &str = "I apologize, but I encountered an error. Please make sure your OpenAI API key is correctly set up.";

pub const PAELLA_REPLY: &str = "For the best paella in Barcelona, you must try 7 Portes! It's a historic restaurant that's been serving traditional paella since 1836.";
pub const TAPAS_REPLY: &str = "For amazing tapas and seafood, check out La Boqueria Market and Cal Pep. La Boqueria is great for casual bites, while Cal Pep offers a more upscale experience.";
pub const TRADITIONAL_REPLY: &str = "For traditional Catalan cuisine, I recommend Cal Pep for tapas and 7 Portes for classic dishes like paella.";
pub const MARKET_REPLY: &str = "La Boqueria Market is a must-visit! It's one of Europe's best food markets with amazing fresh produce and tapas bars.";
pub const FOOD_FALLBACK_REPLY: &str = "You can ask me about paella, tapas, seafood, traditional Catalan cuisine, or food markets. What interests you?";

/// Assistant reply plus an optional request to change the active guide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Composed {
    pub reply: String,
    pub switch_to: Option<GuideMode>,
}

impl Composed {
    pub fn reply(reply: impl Into<String>) -> Self {
        Self { reply: reply.into(), switch_to: None }
    }
}

#[async_trait]
pub trait Composer: Send + Sync {
    type Category: Send + Sync;

    async fn compose(&self, text: &str, category: &Self::Category) -> Composed;
}

pub struct TourComposer {
    completer: Arc<dyn Completer>,
}

impl TourComposer {
    pub fn new(completer: Arc<dyn Completer>) -> Self {
        Self { completer }
    }
}

#[async_trait]
impl Composer for TourComposer {
    type Category = TourRoute;

    async fn compose(&self, text: &str, category: &TourRoute) -> Composed {
        match category {
            TourRoute::SwitchToFood => Composed {
                reply: FOOD_SWITCH_REPLY.to_string(),
                switch_to: Some(GuideMode::Food),
            },
            TourRoute::Landmarks(_) => match self.completer.complete(text).await {
                Ok(answer) => Composed::reply(answer),
                Err(err) => {
                    warn!(error = %err, "tour completion failed");
                    Composed::reply(APOLOGY_REPLY)
                }
            },
        }
    }
}

pub struct FoodComposer;

impl FoodComposer {
    pub fn reply_for(intent: FoodIntent) -> &'static str {
        match intent {
            FoodIntent::Paella => PAELLA_REPLY,
            FoodIntent::TapasSeafood => TAPAS_REPLY,
            FoodIntent::TraditionalCatalan => TRADITIONAL_REPLY,
            FoodIntent::Market => MARKET_REPLY,
            FoodIntent::General => FOOD_FALLBACK_REPLY,
        }
    }
}

#[async_trait]
impl Composer for FoodComposer {
    type Category = FoodIntent;

    async fn compose(&self, _text: &str, category: &FoodIntent) -> Composed {
        Composed::reply(Self::reply_for(*category))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CompletionError, ConfigError};
    use crate::services::completion::UnconfiguredCompleter;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Recording {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Completer for Recording {
        async fn complete(&self, query: &str) -> Result<String, CompletionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(CompletionError::api("boom"))
            } else {
                Ok(format!("about {query}"))
            }
        }
    }

    fn recording(fail: bool) -> Arc<Recording> {
        Arc::new(Recording { calls: AtomicUsize::new(0), fail })
    }

    #[tokio::test]
    async fn tour_forwards_raw_text_verbatim() {
        let completer = recording(false);
        let composer = TourComposer::new(completer.clone());
        let composed = composer
            .compose("Tell me about GAUDI", &TourRoute::Landmarks(None))
            .await;
        assert_eq!(composed, Composed::reply("about Tell me about GAUDI"));
        assert_eq!(completer.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn food_switch_skips_completion() {
        let completer = recording(false);
        let composer = TourComposer::new(completer.clone());
        let composed = composer.compose("food", &TourRoute::SwitchToFood).await;
        assert_eq!(composed.reply, FOOD_SWITCH_REPLY);
        assert_eq!(composed.switch_to, Some(GuideMode::Food));
        assert_eq!(completer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn completion_failure_becomes_apology() {
        let composer = TourComposer::new(recording(true));
        let composed = composer.compose("rambla", &TourRoute::Landmarks(None)).await;
        assert_eq!(composed, Composed::reply(APOLOGY_REPLY));
    }

    #[tokio::test]
    async fn missing_credential_becomes_apology() {
        let completer = UnconfiguredCompleter::new(ConfigError::MissingCredential {
            var: "OPENAI_API_KEY",
        });
        let composer = TourComposer::new(Arc::new(completer));
        let composed = composer
            .compose("Tell me about Parc Güell", &TourRoute::Landmarks(None))
            .await;
        assert_eq!(composed, Composed::reply(APOLOGY_REPLY));
    }

    #[tokio::test]
    async fn food_replies_are_canned() {
        let composed = FoodComposer.compose("best paella in town", &FoodIntent::Paella).await;
        assert_eq!(composed.reply, PAELLA_REPLY);
        assert_eq!(composed.switch_to, None);
    }
}
