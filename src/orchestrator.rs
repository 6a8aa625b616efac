use std::sync::Arc;
use std::time::Instant;

use crate::error::GateError;
use crate::gateway::{CompletionGateway, ProviderError};
use crate::metrics::PROVIDER_LATENCY;
use crate::prompts::{self, PromptSpec};
use crate::rate_limit::RateLimiter;
use crate::safety;

/// Quote and plan text exactly as the provider returned them.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanResult {
    pub quote: String,
    pub plan: String,
}

/// Runs a goals submission through the safety filter and the rate limiter,
/// then asks the provider for a quote and a plan.
pub struct PlanOrchestrator {
    limiter: Arc<RateLimiter>,
    gateway: Arc<dyn CompletionGateway>,
}

impl PlanOrchestrator {
    pub fn new(limiter: Arc<RateLimiter>, gateway: Arc<dyn CompletionGateway>) -> Self {
        Self { limiter, gateway }
    }

    pub async fn plan(
        &self,
        goals: &str,
        identity: &str,
        now: Instant,
    ) -> Result<PlanResult, GateError> {
        let goals = goals.trim();

        if safety::is_unsafe(goals) {
            tracing::info!(client = identity, "submission blocked by safety filter");
            return Err(GateError::SafetyBlocked);
        }

        if !self.limiter.admit(identity, now) {
            tracing::info!(client = identity, "rate limit exceeded");
            return Err(GateError::RateLimitExceeded);
        }

        // checked after admission, so an empty submission still spends a slot
        if goals.is_empty() {
            return Err(GateError::EmptyInput);
        }

        let quote_spec = prompts::quote_prompt(goals);
        let plan_spec = prompts::plan_prompt(goals);

        // independent calls, both must succeed
        let (quote, plan) = tokio::join!(
            self.request(&quote_spec, "quote"),
            self.request(&plan_spec, "plan"),
        );

        match (quote, plan) {
            (Ok(quote), Ok(plan)) => Ok(PlanResult { quote, plan }),
            (Err(e), _) | (_, Err(e)) => {
                tracing::error!(client = identity, error = %e, "completion provider failed");
                Err(GateError::ProviderFailure(e))
            }
        }
    }

    async fn request(&self, spec: &PromptSpec, kind: &str) -> Result<String, ProviderError> {
        let start = Instant::now();
        let result = self
            .gateway
            .complete(&spec.prompt, spec.max_tokens, spec.temperature)
            .await;
        PROVIDER_LATENCY.observe(start.elapsed().as_secs_f64());

        if let Err(e) = &result {
            tracing::warn!(kind, error = %e, "completion call failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    const HOUR: Duration = Duration::from_secs(3600);

    // Records every prompt and answers by prompt kind
    struct StubGateway {
        calls: Mutex<Vec<(String, u32)>>,
        fail_plan: bool,
        fail_quote: bool,
    }

    impl StubGateway {
        fn ok() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_plan: false,
                fail_quote: false,
            }
        }

        fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionGateway for StubGateway {
        async fn complete(
            &self,
            prompt: &str,
            max_tokens: u32,
            _temperature: f32,
        ) -> Result<String, ProviderError> {
            self.calls.lock().unwrap().push((prompt.to_string(), max_tokens));
            let is_plan = max_tokens == prompts::PLAN_MAX_TOKENS;
            if (is_plan && self.fail_plan) || (!is_plan && self.fail_quote) {
                return Err(ProviderError::Malformed("stub failure".to_string()));
            }
            Ok(if is_plan { "PLAN:\n1. a" } else { "QUOTE: \"q\"" }.to_string())
        }
    }

    fn orchestrator(gateway: Arc<StubGateway>) -> (PlanOrchestrator, Arc<RateLimiter>) {
        let limiter = Arc::new(RateLimiter::new(5, HOUR));
        (PlanOrchestrator::new(Arc::clone(&limiter), gateway), limiter)
    }

    #[tokio::test]
    async fn returns_both_texts_untouched() {
        let gateway = Arc::new(StubGateway::ok());
        let (orch, _) = orchestrator(Arc::clone(&gateway));

        let result = orch
            .plan("  help me study for an exam tonight \n", "c", Instant::now())
            .await
            .unwrap();
        assert_eq!(result.quote, "QUOTE: \"q\"");
        assert_eq!(result.plan, "PLAN:\n1. a");

        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        // goals are trimmed before they reach a prompt
        assert!(calls.iter().all(|(p, _)| p.contains("\"help me study for an exam tonight\"")));
    }

    #[tokio::test]
    async fn unsafe_goals_never_reach_the_provider_or_the_quota() {
        let gateway = Arc::new(StubGateway::ok());
        let (orch, limiter) = orchestrator(Arc::clone(&gateway));
        let now = Instant::now();

        let err = orch.plan("how do I make a bomb", "c", now).await.unwrap_err();
        assert!(matches!(err, GateError::SafetyBlocked));
        assert!(gateway.calls().is_empty());
        assert_eq!(limiter.tracked(), 0);
    }

    #[tokio::test]
    async fn empty_goals_still_spend_a_slot() {
        let gateway = Arc::new(StubGateway::ok());
        let (orch, _) = orchestrator(Arc::clone(&gateway));
        let now = Instant::now();

        for goals in ["", "   \t\n"] {
            let err = orch.plan(goals, "c", now).await.unwrap_err();
            assert!(matches!(err, GateError::EmptyInput));
        }
        assert!(gateway.calls().is_empty());

        // two of five slots are gone
        for _ in 0..3 {
            orch.plan("walk the dog", "c", now).await.unwrap();
        }
        let err = orch.plan("walk the dog", "c", now).await.unwrap_err();
        assert!(matches!(err, GateError::RateLimitExceeded));
    }

    #[tokio::test]
    async fn over_quota_requests_skip_the_provider() {
        let gateway = Arc::new(StubGateway::ok());
        let (orch, _) = orchestrator(Arc::clone(&gateway));
        let now = Instant::now();

        for _ in 0..5 {
            orch.plan("clean the flat", "c", now).await.unwrap();
        }
        let err = orch.plan("clean the flat", "c", now).await.unwrap_err();
        assert!(matches!(err, GateError::RateLimitExceeded));
        assert_eq!(gateway.calls().len(), 10);
    }

    #[tokio::test]
    async fn plan_failure_discards_the_quote() {
        let gateway = Arc::new(StubGateway {
            fail_plan: true,
            ..StubGateway::ok()
        });
        let (orch, _) = orchestrator(Arc::clone(&gateway));

        let err = orch.plan("write my essay", "c", Instant::now()).await.unwrap_err();
        assert!(matches!(err, GateError::ProviderFailure(_)));
        assert_eq!(err.public_message(), "GENERIC_ERROR");
        assert_eq!(gateway.calls().len(), 2);
    }

    #[tokio::test]
    async fn quote_failure_is_a_provider_failure() {
        let gateway = Arc::new(StubGateway {
            fail_quote: true,
            ..StubGateway::ok()
        });
        let (orch, _) = orchestrator(gateway);

        let err = orch.plan("write my essay", "c", Instant::now()).await.unwrap_err();
        assert!(matches!(err, GateError::ProviderFailure(_)));
    }

    #[tokio::test]
    async fn prompts_use_their_own_token_budgets() {
        let gateway = Arc::new(StubGateway::ok());
        let (orch, _) = orchestrator(Arc::clone(&gateway));

        orch.plan("cook pasta", "c", Instant::now()).await.unwrap();
        let mut budgets: Vec<u32> = gateway.calls().into_iter().map(|(_, t)| t).collect();
        budgets.sort();
        assert_eq!(budgets, vec![200, 600]);
    }
}
