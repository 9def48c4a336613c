use kitchen_engine::clients::{mock::MockJudge, LogJudge, SubmissionOptions};
use kitchen_engine::clock::{ManualClock, SystemClock};
use kitchen_engine::config::SimulationConfig;
use kitchen_engine::kitchen::{self, KitchenError};
use kitchen_engine::lifecycle::{attempt_pickup, sample_orders, KitchenSystem, PickupTaskOutcome};
use kitchen_engine::model::{ActionKind, OrderDescriptor, Temperature};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

fn fast_config() -> SimulationConfig {
    SimulationConfig {
        rate_ms: 100,
        min_pickup_secs: 1,
        max_pickup_secs: 2,
        poll_interval_ms: 100,
        time_budget_secs: 30,
        ..SimulationConfig::default()
    }
}

fn descriptor(id: &str, temp: Temperature) -> OrderDescriptor {
    OrderDescriptor {
        id: id.to_string(),
        name: "Dish".to_string(),
        temp,
        freshness: 60,
    }
}

/// Full run on paused time: every order is placed once and picked up inside the window.
#[tokio::test(start_paused = true)]
async fn test_simulation_picks_up_every_order() {
    let system = KitchenSystem::new(fast_config(), Arc::new(SystemClock::new()));
    let orders = sample_orders();
    let expected: HashSet<String> = orders.iter().map(|o| o.id.clone()).collect();

    let actions = system.run(orders).await.expect("simulation failed");

    let placed: HashSet<String> = actions
        .iter()
        .filter(|a| a.action == ActionKind::Place)
        .map(|a| a.id.clone())
        .collect();
    let picked: HashSet<String> = actions
        .iter()
        .filter(|a| a.action == ActionKind::Pickup)
        .map(|a| a.id.clone())
        .collect();
    assert_eq!(placed, expected);
    assert_eq!(picked, expected);
    assert!(actions.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    let judge = MockJudge::new();
    judge.expect_submit().return_ok("scored");
    let verdict = system.submit(&judge, actions).await.unwrap();
    assert_eq!(verdict, "scored");
    judge.verify();

    let submissions = judge.submissions();
    assert_eq!(submissions.len(), 1);
    assert_eq!(
        submissions[0].options,
        SubmissionOptions {
            rate: 100_000,
            min: 1_000_000,
            max: 2_000_000,
        }
    );
    submissions[0].validate_sequences().unwrap();

    system.shutdown().await.unwrap();
}

/// When the budget runs out first, pending pickups are cancelled and residents get
/// no terminal action.
#[tokio::test(start_paused = true)]
async fn test_budget_expiry_cancels_pickups() {
    let config = SimulationConfig {
        min_pickup_secs: 5,
        max_pickup_secs: 6,
        time_budget_secs: 2,
        ..fast_config()
    };
    let system = KitchenSystem::new(config, Arc::new(SystemClock::new()));
    let orders = vec![
        descriptor("h1", Temperature::Hot),
        descriptor("c1", Temperature::Cold),
        descriptor("r1", Temperature::Room),
    ];

    let actions = system.run(orders).await.unwrap();

    assert_eq!(actions.len(), 3);
    assert!(actions.iter().all(|a| a.action == ActionKind::Place));

    let occupancy = system.client.occupancy().await.unwrap();
    assert_eq!((occupancy.heater, occupancy.cooler, occupancy.shelf), (1, 1, 1));

    let verdict = system.submit(&LogJudge, actions).await.unwrap();
    assert_eq!(verdict, "accepted: 3 placed, 0 moved, 0 picked up, 0 discarded");

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_arrival_is_skipped() {
    let system = KitchenSystem::new(fast_config(), Arc::new(SystemClock::new()));
    let orders = vec![
        descriptor("a1", Temperature::Hot),
        descriptor("a1", Temperature::Cold),
        descriptor("a2", Temperature::Cold),
    ];

    let actions = system.run(orders).await.unwrap();

    let places = actions.iter().filter(|a| a.action == ActionKind::Place).count();
    assert_eq!(places, 2);

    let judge = MockJudge::new();
    judge.expect_submit().return_err(KitchenError::Submission("judge offline".into()));
    let result = system.submit(&judge, actions).await;
    assert_eq!(result, Err(KitchenError::Submission("judge offline".into())));
    judge.verify();

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_pickup_task_observes_cancellation() {
    let (actor, client) = kitchen::new(&fast_config(), Arc::new(ManualClock::at_micros(0)));
    let actor_handle = tokio::spawn(actor.run());

    let cancel = CancellationToken::new();
    let task = tokio::spawn(attempt_pickup(
        client.clone(),
        "never-placed".to_string(),
        Duration::from_secs(60),
        Duration::from_millis(100),
        cancel.child_token(),
    ));

    tokio::time::sleep(Duration::from_secs(1)).await;
    cancel.cancel();

    let outcome = task.await.unwrap();
    assert_eq!(outcome, Ok(PickupTaskOutcome::Cancelled));
    assert!(client.actions().await.unwrap().is_empty());

    drop(client);
    actor_handle.await.unwrap();
}

#[tokio::test]
async fn test_shutdown_completes() {
    let system = KitchenSystem::new(fast_config(), Arc::new(SystemClock::new()));
    let occupancy = system.client.occupancy().await.unwrap();
    assert_eq!(occupancy.heater + occupancy.cooler + occupancy.shelf, 0);
    assert!(system.shutdown().await.is_ok());
}
