//! End-to-end checks of a notifier run against in-memory collaborators

use mia_win_notifier::config::{Settings, WinStateStore};
use mia_win_notifier::network::{MiningHistorySource, Notifier};
use mia_win_notifier::{Block, HistorySnapshot, NotifierError, RunOutcome, TriggerEvent, run};
use std::cell::RefCell;
use std::collections::BTreeMap;

const WALLET: &str = "SP1POOL";
const PROD_HOOK: &str = "https://discord.example/prod";
const TEST_HOOK: &str = "https://discord.example/test";

struct FakeSource {
    history: HistorySnapshot,
    current_height: u64,
}

impl MiningHistorySource for FakeSource {
    async fn fetch_history(&self, wallet: &str) -> Result<HistorySnapshot, NotifierError> {
        assert_eq!(wallet, WALLET);
        Ok(self.history.clone())
    }

    async fn fetch_current_height(&self) -> Result<u64, NotifierError> {
        Ok(self.current_height)
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: RefCell<Vec<(String, String)>>,
    fail_on: Option<&'static str>,
}

impl Notifier for RecordingNotifier {
    async fn send(&self, destination: &str, text: &str) -> Result<(), NotifierError> {
        if self.fail_on == Some(destination) {
            return Err(NotifierError::DeliveryError("webhook returned 500".into()));
        }
        self.sent
            .borrow_mut()
            .push((destination.to_string(), text.to_string()));
        Ok(())
    }
}

impl RecordingNotifier {
    fn destinations(&self) -> Vec<String> {
        self.sent.borrow().iter().map(|(d, _)| d.clone()).collect()
    }
}

#[derive(Default)]
struct MemoryState {
    height: Option<u64>,
    writes: usize,
}

impl WinStateStore for MemoryState {
    fn last_win(&self) -> Result<Option<u64>, NotifierError> {
        Ok(self.height)
    }

    fn record_win(&mut self, height: u64) -> Result<(), NotifierError> {
        self.height = Some(height);
        self.writes += 1;
        Ok(())
    }
}

fn config() -> BTreeMap<String, String> {
    [
        ("wallet_address", WALLET),
        ("mining_start_block", "100"),
        ("pool_id", "Test Pool"),
        ("pool_total", "1000"),
        ("discord_webhook", PROD_HOOK),
        ("discord_webhook_test", TEST_HOOK),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn settings() -> Settings {
    Settings::from_provider(&config()).unwrap()
}

fn block(height: u64, bids: &[(&str, u64)], winner: Option<&str>) -> (u64, Block) {
    (
        height,
        Block {
            height,
            participants: bids.iter().map(|(w, b)| (w.to_string(), *b)).collect(),
            winner: winner.map(str::to_string),
        },
    )
}

fn source() -> FakeSource {
    FakeSource {
        history: [
            block(99, &[(WALLET, 1_000_000)], Some(WALLET)),
            block(100, &[(WALLET, 10_000_000), ("SP2", 40_000_000)], Some(WALLET)),
            block(101, &[(WALLET, 5_000_000), ("SP2", 35_000_000)], Some("SP2")),
            block(102, &[(WALLET, 4_000_000)], None),
        ]
        .into_iter()
        .collect(),
        current_height: 102,
    }
}

#[tokio::test]
async fn test_prod_run_posts_twice_and_records() {
    let mut state = MemoryState {
        height: Some(95),
        ..Default::default()
    };
    let notifier = RecordingNotifier::default();

    let outcome = run(
        TriggerEvent { prod: true },
        &settings(),
        &mut state,
        &source(),
        &notifier,
    )
    .await
    .unwrap();

    assert!(matches!(outcome, RunOutcome::Announced { prod: true, .. }));
    assert_eq!(notifier.destinations(), vec![TEST_HOOK, PROD_HOOK]);
    assert_eq!(state.height, Some(100));
    assert_eq!(state.writes, 1);

    let sent = notifier.sent.borrow();
    assert!(sent[0].1.contains("Win Probability 20.00 %"));
    assert_eq!(sent[0].1, sent[1].1);
}

#[tokio::test]
async fn test_dry_run_posts_to_test_only() {
    let mut state = MemoryState::default();
    let notifier = RecordingNotifier::default();

    let outcome = run(
        TriggerEvent { prod: false },
        &settings(),
        &mut state,
        &source(),
        &notifier,
    )
    .await
    .unwrap();

    match outcome {
        RunOutcome::Announced { report, prod } => {
            assert!(!prod);
            assert_eq!(report.height, 100);
            assert_eq!(report.metrics.average_bid, 7.5);
        }
        other => panic!("expected an announcement, got {:?}", other),
    }
    assert_eq!(notifier.destinations(), vec![TEST_HOOK]);
    assert_eq!(state.writes, 0);
    assert_eq!(state.height, None);
}

#[tokio::test]
async fn test_already_announced_sends_nothing() {
    let mut state = MemoryState {
        height: Some(100),
        ..Default::default()
    };
    let notifier = RecordingNotifier::default();

    for _ in 0..2 {
        let outcome = run(
            TriggerEvent { prod: true },
            &settings(),
            &mut state,
            &source(),
            &notifier,
        )
        .await
        .unwrap();
        assert_eq!(outcome, RunOutcome::NothingNew { newest_win: 100 });
    }

    assert!(notifier.sent.borrow().is_empty());
    assert_eq!(state.writes, 0);
    assert_eq!(state.height, Some(100));
}

#[tokio::test]
async fn test_no_wins_aborts() {
    let mut state = MemoryState::default();
    let notifier = RecordingNotifier::default();
    let source = FakeSource {
        history: [block(101, &[(WALLET, 5_000_000)], Some("SP2"))]
            .into_iter()
            .collect(),
        current_height: 102,
    };

    let err = run(
        TriggerEvent { prod: true },
        &settings(),
        &mut state,
        &source,
        &notifier,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, NotifierError::NoWinsFound { examined: 1 }));
    assert!(notifier.sent.borrow().is_empty());
}

#[tokio::test]
async fn test_zero_total_bid_leaves_state_untouched() {
    let mut state = MemoryState::default();
    let notifier = RecordingNotifier::default();
    let source = FakeSource {
        history: [block(100, &[(WALLET, 0)], Some(WALLET))]
            .into_iter()
            .collect(),
        current_height: 100,
    };

    let err = run(
        TriggerEvent { prod: true },
        &settings(),
        &mut state,
        &source,
        &notifier,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, NotifierError::MetricsUnavailable(_)));
    assert_eq!(state.writes, 0);
}

#[tokio::test]
async fn test_prod_delivery_failure_skips_recording() {
    let mut state = MemoryState::default();
    let notifier = RecordingNotifier {
        fail_on: Some(PROD_HOOK),
        ..Default::default()
    };

    let err = run(
        TriggerEvent { prod: true },
        &settings(),
        &mut state,
        &source(),
        &notifier,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, NotifierError::DeliveryError(_)));
    assert_eq!(notifier.destinations(), vec![TEST_HOOK]);
    assert_eq!(state.writes, 0);
}

#[tokio::test]
async fn test_missing_prod_webhook_is_config_error() {
    let mut config = config();
    config.remove("discord_webhook");
    let settings = Settings::from_provider(&config).unwrap();
    let mut state = MemoryState::default();
    let notifier = RecordingNotifier::default();

    let err = run(
        TriggerEvent { prod: true },
        &settings,
        &mut state,
        &source(),
        &notifier,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, NotifierError::ConfigError(_)));
    // Nothing reaches the test channel either, so retries do not repeat it
    assert!(notifier.sent.borrow().is_empty());
    assert_eq!(state.writes, 0);
}
