mod tests {
    use duoring::protocol::{decode_line, ButtonId, Decoded, LineReader, Notification};
    use duoring::{Instant, PatternId};

    #[test]
    fn test_decode_valid_line() {
        assert_eq!(
            decode_line(br#"{"led":{"pattern":2}}"#),
            Decoded::SelectPattern(PatternId::Pulse)
        );
    }

    #[test]
    fn test_decode_trims_carriage_return() {
        assert_eq!(
            decode_line(b"{\"led\":{\"pattern\":0}}\r"),
            Decoded::SelectPattern(PatternId::Chase)
        );
    }

    #[test]
    fn test_decode_out_of_range_pattern() {
        assert_eq!(
            decode_line(br#"{"led":{"pattern":7}}"#),
            Decoded::Unrecognized
        );
    }

    #[test]
    fn test_decode_wrong_shape() {
        assert_eq!(decode_line(br#"{"pattern":1}"#), Decoded::Unrecognized);
        assert_eq!(
            decode_line(br#"{"led":{"brightness":10}}"#),
            Decoded::Unrecognized
        );
    }

    #[test]
    fn test_decode_malformed_json() {
        assert_eq!(decode_line(b"hello"), Decoded::Unrecognized);
        assert_eq!(decode_line(b""), Decoded::Unrecognized);
        assert_eq!(decode_line(br#"{"led":{"#), Decoded::Unrecognized);
    }

    #[test]
    fn test_line_reader_assembles_lines() {
        let mut reader: LineReader<64> = LineReader::new();
        let mut lines: Vec<Vec<u8>> = Vec::new();

        for &byte in b"{\"a\":1}\n{\"b\":2}\r\n" {
            if let Some(line) = reader.push(byte) {
                lines.push(line.to_vec());
            }
        }

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], b"{\"a\":1}");
        assert_eq!(lines[1], b"{\"b\":2}\r");
    }

    #[test]
    fn test_line_reader_drops_oversized_line() {
        let mut reader: LineReader<8> = LineReader::new();

        for &byte in b"this line is far too long\n" {
            assert_eq!(reader.push(byte), None);
        }

        // Reader resynchronizes on the next line.
        let mut completed = None;
        for &byte in b"ok\n" {
            if let Some(line) = reader.push(byte) {
                completed = Some(line.to_vec());
            }
        }
        assert_eq!(completed.as_deref(), Some(&b"ok"[..]));
    }

    #[test]
    fn test_button_notification_wire_shape() {
        let message = Notification::button(Instant::from_millis(250), ButtonId::Start);
        assert_eq!(
            message.to_json::<128>().unwrap().as_str(),
            r#"{"time":0.25,"event":"button","state":{"button":"start","pressed":true}}"#
        );
    }

    #[test]
    fn test_system_notification_wire_shape() {
        let message = Notification::system(Instant::from_millis(1500), "pattern chase");
        assert_eq!(
            message.to_json::<128>().unwrap().as_str(),
            r#"{"time":1.5,"event":"system","state":{"mesg":"pattern chase"}}"#
        );
    }

    #[test]
    fn test_error_notification_wire_shape() {
        let message = Notification::error(Instant::from_millis(2000), "sink failure");
        assert_eq!(
            message.to_json::<128>().unwrap().as_str(),
            r#"{"time":2.0,"event":"error","state":{"mesg":"sink failure"}}"#
        );
    }
}
