//! Unit tests for cv-scenario.

#[cfg(test)]
mod comments {
    use crate::strip_comments;

    #[test]
    fn removes_closed_comment() {
        assert_eq!(strip_comments("1 🐪 depots 🏜 2"), "1   2");
    }

    #[test]
    fn comment_separates_adjacent_tokens() {
        let s = strip_comments("12🐪x🏜34");
        assert_eq!(s.split_whitespace().collect::<Vec<_>>(), ["12", "34"]);
    }

    #[test]
    fn nested_comments() {
        let s = strip_comments("a 🐪 outer 🐪 inner 🏜 still outer 🏜 b");
        assert_eq!(s.split_whitespace().collect::<Vec<_>>(), ["a", "b"]);
    }

    #[test]
    fn unclosed_opener_is_kept() {
        let s = strip_comments("a 🐪 never closed");
        assert_eq!(s, "a 🐪 never closed");
    }

    #[test]
    fn stray_closer_is_kept() {
        assert_eq!(strip_comments("a 🏜 b"), "a 🏜 b");
    }

    #[test]
    fn multiline() {
        let s = strip_comments("1\n🐪 spans\nlines 🏜\n2");
        assert_eq!(s.split_whitespace().collect::<Vec<_>>(), ["1", "2"]);
    }
}

#[cfg(test)]
mod parse {
    use cv_core::TargetId;
    use crate::{parse_scenario, ScenarioError};

    pub const SINGLE: &str = "\
🐪 depots: x y supply timeout loading 🏜
1
0 0 100 1000 0.1
🐪 targets 🏜
1
10 0
🐪 roads (1-based) 🏜
1
1 2
🐪 courier types 🏜
1
dromedary 5 5 20 20 1 50 1.0
🐪 requests: arrival target goods timeout 🏜
1
0 1 10 100
";

    #[test]
    fn single_route_scenario() {
        let s = parse_scenario(SINGLE).unwrap();
        assert_eq!(s.depots.len(), 1);
        assert_eq!(s.depots[0].supply_amount, 100);
        assert_eq!(s.depots[0].loading_time, 0.1);
        assert_eq!(s.targets.len(), 1);
        assert_eq!(s.vertex_count(), 2);
        assert_eq!(s.roads, vec![(0, 1)]);
        assert_eq!(s.courier_types[0].name, "dromedary");
        assert_eq!(s.courier_types[0].load_capacity, 50);
        assert_eq!(s.requests[0].target, TargetId(0));
        assert_eq!(s.requests[0].goods, 10);
        assert_eq!(s.requests[0].timeout, 100.0);
    }

    #[test]
    fn empty_sections() {
        let s = parse_scenario("0 0 0 0 0").unwrap();
        assert!(s.depots.is_empty());
        assert!(s.requests.is_empty());
    }

    #[test]
    fn missing_token() {
        let err = parse_scenario("1 0 0 100").unwrap_err();
        assert!(matches!(err, ScenarioError::UnexpectedEof { .. }));
        assert!(err.to_string().contains("depot supply timeout"));
    }

    #[test]
    fn bad_number_names_field_and_position() {
        let err = parse_scenario("1 0 zero 100 1000 0.1").unwrap_err();
        match err {
            ScenarioError::InvalidNumber { field, token, position } => {
                assert_eq!(field, "depot y");
                assert_eq!(token, "zero");
                assert_eq!(position, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn integer_field_rejects_fraction() {
        let err = parse_scenario("1 0 0 10.5 1000 0.1").unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidNumber { ref field, .. } if field == "depot supply amount"));
    }

    #[test]
    fn negative_zero_reads_as_zero() {
        let text = SINGLE.replace("\n0 1 10 100\n", "\n-0 1 10 100\n");
        assert_ne!(text, SINGLE);
        let s = parse_scenario(&text).unwrap();
        assert!(s.requests[0].arrival_time.is_sign_positive());
        assert_eq!(s.requests[0].arrival_time, 0.0);
    }

    #[test]
    fn non_finite_real_rejected() {
        let err = parse_scenario("1 0 inf 10 1000 0.1").unwrap_err();
        assert!(matches!(err, ScenarioError::InvalidNumber { .. }));
    }

    #[test]
    fn road_index_out_of_range() {
        let err = parse_scenario("1 0 0 1 1 0.1  1 5 5  1 1 3").unwrap_err();
        assert!(matches!(err, ScenarioError::IndexOutOfRange { index: 3, max: 2, .. }));

        let err = parse_scenario("1 0 0 1 1 0.1  1 5 5  1 0 1").unwrap_err();
        assert!(matches!(err, ScenarioError::IndexOutOfRange { index: 0, .. }));
    }

    #[test]
    fn request_target_is_one_based_over_targets() {
        let text = "1 0 0 1 1 0.1  2 5 5 6 6  0  1 a 1 1 1 1 1 1 1.0  1 0 2 1 10";
        let s = parse_scenario(text).unwrap();
        assert_eq!(s.requests[0].target, TargetId(1));

        let bad = "1 0 0 1 1 0.1  2 5 5 6 6  0  1 a 1 1 1 1 1 1 1.0  1 0 3 1 10";
        assert!(matches!(
            parse_scenario(bad).unwrap_err(),
            ScenarioError::IndexOutOfRange { max: 2, .. }
        ));
    }

    #[test]
    fn trailing_tokens_rejected() {
        let err = parse_scenario("0 0 0 0 0 extra").unwrap_err();
        assert!(matches!(err, ScenarioError::TrailingTokens { count: 1 }));
    }
}

#[cfg(test)]
mod load {
    use std::path::Path;

    use crate::{load_scenario, ScenarioError};

    #[test]
    fn missing_file_is_io_error() {
        let err = load_scenario(Path::new("/definitely/not/here.txt")).unwrap_err();
        assert!(matches!(err, ScenarioError::Io(_)));
    }
}
