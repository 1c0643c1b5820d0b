// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the juke authors

//! Player performer tests, using small standard utilities as the player.

use super::*;
use crate::performer::Outcome;
use tokio::sync::mpsc;

fn completion_pair() -> (CompletionTx, mpsc::UnboundedReceiver<Outcome>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (CompletionTx::new(tx), rx)
}

#[tokio::test]
async fn natural_exit_reports_finished() {
    let performer = PlayerPerformer::new("true", vec![]);
    let (done, mut rx) = completion_pair();

    let mut action = performer.start("/a.mp3", done).await.unwrap();
    let outcome = rx.recv().await.unwrap();
    action.wait().await;

    assert_eq!(outcome, Outcome::Finished);
    assert!(rx.try_recv().is_err(), "only one outcome may fire");
}

#[tokio::test]
async fn cancel_kills_player_and_reports_cancelled() {
    // `sleep <item>` stands in for a long-running player.
    let performer = PlayerPerformer::new("sleep", vec![]);
    let (done, mut rx) = completion_pair();

    let mut action = performer.start("30", done).await.unwrap();
    action.cancel();
    let outcome = rx.recv().await.unwrap();
    action.wait().await;

    assert_eq!(outcome, Outcome::Cancelled);
    assert!(rx.try_recv().is_err(), "only one outcome may fire");
}

#[tokio::test]
async fn cancel_after_exit_is_harmless() {
    let performer = PlayerPerformer::new("true", vec![]);
    let (done, mut rx) = completion_pair();

    let mut action = performer.start("/a.mp3", done).await.unwrap();
    let outcome = rx.recv().await.unwrap();
    assert_eq!(outcome, Outcome::Finished);

    // The natural outcome already fired; a late cancel must not add another.
    action.cancel();
    action.wait().await;
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn missing_program_fails_synchronously() {
    let performer = PlayerPerformer::new("definitely-not-a-player-binary", vec![]);
    let (done, mut rx) = completion_pair();

    let result = performer.start("/a.mp3", done).await;
    assert!(matches!(result, Err(PerformError::Spawn { .. })));
    assert!(rx.try_recv().is_err(), "no outcome fires for a failed start");
}

#[tokio::test]
async fn wait_is_idempotent() {
    let performer = PlayerPerformer::new("true", vec![]);
    let (done, mut rx) = completion_pair();

    let mut action = performer.start("/a.mp3", done).await.unwrap();
    let _ = rx.recv().await;
    action.wait().await;
    action.wait().await;
}
