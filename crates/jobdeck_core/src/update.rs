use crate::{Effect, FeedState, Msg};

/// Pure update function: applies a message to the feed and returns any effects.
pub fn update(mut state: FeedState, msg: Msg) -> (FeedState, Vec<Effect>) {
    let effects = match msg {
        Msg::LoadMoreRequested => {
            if state.is_disposed() || state.is_loading() || !state.has_more() {
                return (state, Vec::new());
            }
            let (request, page) = state.begin_request(false);
            vec![Effect::FetchPage { request, page }]
        }
        Msg::RefreshRequested => {
            if state.is_disposed() {
                return (state, Vec::new());
            }
            // Supersedes whatever is in flight; its result will no longer match.
            state.reset();
            let (request, page) = state.begin_request(true);
            vec![Effect::FetchPage { request, page }]
        }
        Msg::PageLoaded { request, result } => {
            if state.is_disposed() {
                return (state, Vec::new());
            }
            let Some(page) = state.settle(request) else {
                return (state, Vec::new());
            };
            match result {
                Ok(page) => state.merge_page(page),
                Err(mut error) => {
                    error.page = page;
                    state.fail(error);
                }
            }
            Vec::new()
        }
        Msg::FetchAbandoned { request } => {
            state.settle(request);
            Vec::new()
        }
        Msg::Disposed => {
            state.dispose();
            Vec::new()
        }
    };

    (state, effects)
}
