/// Predicate over lookup keys combining up to three constraints.
///
/// All present constraints are AND-ed; a constraint that was never set is
/// always satisfied, so an empty query matches every key. Blank segments
/// are ignored by the setters.
#[derive(Debug, Default, Clone)]
pub struct ResourceQuery {
    start_segment: Option<String>,
    segments: Vec<String>,
    end_segment: Option<String>,
}

impl ResourceQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require keys to start with `segment`. Setting it again replaces
    /// the previous value.
    pub fn starts_with(mut self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        if !segment.trim().is_empty() {
            self.start_segment = Some(segment);
        }
        self
    }

    /// Require keys to contain `segment` at any position. May be called
    /// repeatedly; every segment given must match.
    pub fn with_segment(mut self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        if !segment.trim().is_empty() && !self.segments.contains(&segment) {
            self.segments.push(segment);
        }
        self
    }

    /// Require keys to end with `segment`. Setting it again replaces the
    /// previous value.
    pub fn ends_with(mut self, segment: impl Into<String>) -> Self {
        let segment = segment.into();
        if !segment.trim().is_empty() {
            self.end_segment = Some(segment);
        }
        self
    }

    pub fn matches(&self, key: &str) -> bool {
        if let Some(start) = &self.start_segment {
            if !key.starts_with(start.as_str()) {
                return false;
            }
        }
        if let Some(end) = &self.end_segment {
            if !key.ends_with(end.as_str()) {
                return false;
            }
        }
        self.segments.iter().all(|segment| key.contains(segment.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_matches_everything() {
        let query = ResourceQuery::new();
        assert!(query.matches("anything/at/all.css"));
        assert!(query.matches(""));
    }

    #[test]
    fn constraints_are_anded() {
        let query = ResourceQuery::new().starts_with("x").ends_with("y");
        assert!(query.matches("x-mid-y"));
        assert!(!query.matches("x-mid-z"));
        assert!(!query.matches("z-mid-y"));
    }

    #[test]
    fn every_segment_must_match() {
        let query = ResourceQuery::new()
            .with_segment("resources")
            .with_segment("css");
        assert!(query.matches("META-INF/resources/css/style.css"));
        assert!(!query.matches("META-INF/resources/js/app.js"));
    }

    #[test]
    fn blank_segments_are_ignored() {
        let query = ResourceQuery::new()
            .starts_with("  ")
            .with_segment("")
            .ends_with("\t");
        assert!(query.matches("whatever"));
    }

    #[test]
    fn setting_again_replaces() {
        let query = ResourceQuery::new().starts_with("a").starts_with("b");
        assert!(query.matches("b-side"));
        assert!(!query.matches("a-side"));
    }
}
