use crate::{extract_url, parse_lines, AppState, BatchPlan, Effect, Msg, EXPECTED_FORMAT};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::GenerateSubmitted { input, settings } => {
            // One run at a time; the submit control is disabled while generating.
            if state.is_running() {
                return (state, Vec::new());
            }
            state.clear_error();

            match parse_lines(&input) {
                Err(err) => {
                    state.set_error(err.to_string());
                    Vec::new()
                }
                Ok(pairs) if pairs.is_empty() => {
                    state.set_error(format!(
                        "enter at least one URL:KEYWORD line (expected format: {EXPECTED_FORMAT})"
                    ));
                    Vec::new()
                }
                Ok(pairs) => {
                    let plan = BatchPlan::new(pairs, settings.total_count);
                    state.start_run(plan, settings)
                }
            }
        }
        Msg::BatchSucceeded { items } => state.complete_batch(items),
        Msg::BatchFailed { message } => state.abort_run(message),
        Msg::DescribeRequested { input, language } => {
            if state.is_describing() {
                return (state, Vec::new());
            }
            match extract_url(&input) {
                Some(url) => {
                    state.clear_error();
                    state.start_describe();
                    vec![Effect::RequestDescription { url, language }]
                }
                None => {
                    state.set_error(format!(
                        "enter a valid URL first (example: {EXPECTED_FORMAT})"
                    ));
                    Vec::new()
                }
            }
        }
        Msg::DescribeSucceeded { description } => {
            state.finish_describe(Ok(description));
            Vec::new()
        }
        Msg::DescribeFailed { message } => {
            state.finish_describe(Err(message));
            Vec::new()
        }
        Msg::DeleteItem { item_id } => {
            state.store_mut().delete_item(item_id);
            Vec::new()
        }
        Msg::DeleteGroup { group_id } => {
            state.store_mut().delete_group(group_id);
            Vec::new()
        }
        Msg::ClearAll => {
            state.store_mut().clear_all();
            Vec::new()
        }
        Msg::GroupSelected { index } => {
            state.store_mut().set_active(index);
            Vec::new()
        }
        Msg::NextGroup => {
            state.store_mut().select_next();
            Vec::new()
        }
        Msg::PreviousGroup => {
            state.store_mut().select_previous();
            Vec::new()
        }
        Msg::ErrorDismissed => {
            state.clear_error();
            Vec::new()
        }
    };

    (state, effects)
}
