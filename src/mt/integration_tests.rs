//! End-to-End Integration Tests for the Degradation Pipeline
//!
//! The mock-backed tests always run. The OpenRouter-backed ones are ignored
//! by default and skip themselves when no key is configured.
//!
//! # Running Integration Tests
//!
//! ```bash
//! export OPENROUTER_API_KEY=$(cat .env | grep OPENROUTER_API_KEY | cut -d= -f2)
//! cargo test --lib mt::integration_tests -- --ignored --nocapture
//! ```

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::examples::builtin_examples;
    use crate::leveler::Leveler;
    use std::sync::Arc;
    use std::time::Instant;

    /// Helper to format timing output
    fn format_duration(duration: std::time::Duration) -> String {
        if duration.as_secs() > 0 {
            format!("{:.2}s", duration.as_secs_f64())
        } else if duration.as_millis() > 0 {
            format!("{}ms", duration.as_millis())
        } else {
            format!("{}µs", duration.as_micros())
        }
    }

    /// Skip test if API key not available
    fn require_api_key() -> bool {
        std::env::var("OPENROUTER_API_KEY").is_ok()
    }

    #[tokio::test]
    async fn test_e2e_mock_technical_example_five_hops() {
        let technical = builtin_examples()
            .into_iter()
            .find(|ex| ex.id == 4)
            .unwrap();
        let mock = Arc::new(MockTranslator::new(MockMode::Tag));
        let engine = DegradationEngine::new(mock.clone());

        let first = engine.degrade(&technical.reference, 5, "x", 4).await;
        let second = engine.degrade(&technical.reference, 5, "x", 4).await;

        assert_eq!(first.chain, second.chain);
        assert_eq!(first.chain, vec!["pt", "ar", "fr", "ko", "vi"]);
        assert_eq!(
            first.text,
            format!("[en][vi][en][ko][en][fr][en][ar][en][pt]{}", technical.reference)
        );
        assert_eq!(mock.calls(), 10);

        let stats = engine.stats();
        assert_eq!(stats.translations.entries, 10);
        assert_eq!(stats.round_trips.entries, 5);
        assert_eq!(stats.degradations.entries, 1);
        assert_eq!(stats.degradations.hits, 1);
    }

    #[tokio::test]
    async fn test_e2e_mock_slider_sweep() {
        // Moving a hops slider up one step at a time only pays for the new hop
        let mock = Arc::new(MockTranslator::new(MockMode::Tag));
        let leveler = Leveler::new(mock.clone());

        for hops in 0..=6 {
            leveler.degrade_all(hops, "poc-seed").await;
            assert_eq!(mock.calls(), hops as usize * 2 * 4);
        }
    }

    #[tokio::test]
    async fn test_e2e_mock_partial_failure_report() {
        // Example 1 takes calls 1-4, example 2 fails on its second hop's outbound leg
        let mock = Arc::new(MockTranslator::new(MockMode::FailOnCall {
            call: 7,
            message: "upstream 503".to_string(),
        }));
        let leveler = Leveler::new(mock.clone());

        let report = leveler.degrade_all(2, "poc-seed").await;
        let second = &report.examples[1];

        assert_eq!(second.chain.len(), 2);
        assert!(
            second
                .degraded
                .ends_with("[Translation error at hop 2: Translation error: upstream 503]")
        );
        assert!(!report.examples[0].degraded.contains("Translation error"));
        assert!(!report.examples[2].degraded.contains("Translation error"));
    }

    #[tokio::test]
    #[ignore]
    async fn test_e2e_real_api_two_hops() {
        if !require_api_key() {
            eprintln!("⚠️  Skipping: OPENROUTER_API_KEY not set");
            return;
        }

        let provider = OpenRouterProvider::from_env().expect("provider from env");
        let engine = DegradationEngine::new(Arc::new(provider));

        let start = Instant::now();
        let result = engine
            .degrade("Where is the library?", 2, "poc-seed", 1)
            .await;
        println!("⏱️  First run: {}", format_duration(start.elapsed()));
        println!("Chain: {}", result.chain.join(" → "));
        println!("Degraded: {}", result.text);

        assert_eq!(result.chain, vec!["pl", "sw"]);
        assert!(!result.text.is_empty());

        let start = Instant::now();
        let cached = engine
            .degrade("Where is the library?", 2, "poc-seed", 1)
            .await;
        println!("⏱️  Cached run: {}", format_duration(start.elapsed()));
        assert_eq!(cached, result);
    }

    #[tokio::test]
    #[ignore]
    async fn test_e2e_real_api_round_trip() {
        if !require_api_key() {
            eprintln!("⚠️  Skipping: OPENROUTER_API_KEY not set");
            return;
        }

        let provider = OpenRouterProvider::from_env().expect("provider from env");
        let round_trips = RoundTripTranslator::new(TranslationClient::new(Arc::new(provider)));

        let back = round_trips
            .round_trip("I thank you for your valuable help.", "ja")
            .await
            .expect("round trip");
        println!("ja round trip: {}", back);
        assert!(!back.is_empty());
    }
}
