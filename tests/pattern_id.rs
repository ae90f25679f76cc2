mod tests {
    use duoring::PatternId;

    #[test]
    fn test_pattern_id_from_raw() {
        assert_eq!(PatternId::from_raw(0), Some(PatternId::Chase));
        assert_eq!(PatternId::from_raw(1), Some(PatternId::Orbit));
        assert_eq!(PatternId::from_raw(2), Some(PatternId::Pulse));
        assert_eq!(PatternId::from_raw(3), Some(PatternId::Sparkle));
    }

    #[test]
    fn test_pattern_id_from_raw_out_of_range() {
        assert_eq!(PatternId::from_raw(4), None);
        assert_eq!(PatternId::from_raw(255), None);
    }

    #[test]
    fn test_pattern_id_as_str() {
        assert_eq!(PatternId::Chase.as_str(), "chase");
        assert_eq!(PatternId::Sparkle.as_str(), "sparkle");
    }

    #[test]
    fn test_pattern_id_parse_from_str() {
        assert_eq!(PatternId::parse_from_str("orbit"), Some(PatternId::Orbit));
        assert_eq!(PatternId::parse_from_str("pulse"), Some(PatternId::Pulse));
        assert_eq!(PatternId::parse_from_str("strobe"), None);
    }

    #[test]
    fn test_to_slot_preserves_id() {
        for raw in 0..4 {
            let id = PatternId::from_raw(raw).unwrap();
            assert_eq!(id.to_slot().id(), id);
        }
    }
}
