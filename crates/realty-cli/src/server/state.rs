//! Application state for the web server.

use realty::Analyst;

/// Shared application state.
///
/// Cloning is cheap: every clone reads the same immutable dataset.
#[derive(Clone)]
pub struct AppState {
    pub analyst: Analyst,
}

impl AppState {
    pub fn new(analyst: Analyst) -> Self {
        Self { analyst }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realty::{DatasetContext, Frame, Record};

    #[test]
    fn test_clones_share_dataset() {
        let frame = Frame::new(vec![], vec![Record::new("Baner", 2023, vec![])]);
        let state = AppState::new(Analyst::new(DatasetContext::new(frame).unwrap()));
        let copy = state.clone();

        assert!(std::ptr::eq(
            state.analyst.context(),
            copy.analyst.context()
        ));
    }
}
