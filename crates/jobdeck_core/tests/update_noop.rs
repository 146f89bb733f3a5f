use jobdeck_core::{update, FeedState, JobPage, Msg};

#[test]
fn stray_results_are_noop() {
    let state = FeedState::new();
    let (next, effects) = update(
        state.clone(),
        Msg::PageLoaded {
            request: 99,
            result: Ok(JobPage::default()),
        },
    );
    assert_eq!(state, next);
    assert!(effects.is_empty());

    let (next, effects) = update(state.clone(), Msg::FetchAbandoned { request: 99 });
    assert_eq!(state, next);
    assert!(effects.is_empty());
}
