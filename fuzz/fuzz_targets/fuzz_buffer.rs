#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use quotebuf::{Buffer, reference_quote};

#[derive(Arbitrary, Debug)]
enum Op<'a> {
    WriteByte(u8),
    Write(&'a [u8]),
    WriteStr(&'a str),
    Reserve(u16),
    Quote(&'a str, bool),
    Int(i64),
    Trim(u16),
    Resize(u16),
    Reset,
}

/// Control characters JSON requires escaped that the encoder passes through.
fn has_raw_control(s: &str) -> bool {
    s.chars()
        .any(|c| c < '\u{20}' && !matches!(c, '\u{8}' | '\u{c}' | '\n' | '\r' | '\t'))
}

fuzz_target!(|ops: Vec<Op<'_>>| {
    let mut buf = Buffer::new();
    let mut model: Vec<u8> = Vec::new();

    for op in ops {
        let cap_before = buf.cap();
        let may_shrink = matches!(op, Op::Resize(_) | Op::Reset);
        match op {
            Op::WriteByte(c) => {
                buf.write_byte(c);
                model.push(c);
            }
            Op::Write(bytes) => {
                assert_eq!(buf.write(bytes), bytes.len());
                model.extend_from_slice(bytes);
            }
            Op::WriteStr(s) => {
                assert_eq!(buf.write_str(s), s.len());
                model.extend_from_slice(s.as_bytes());
            }
            Op::Reserve(n) => {
                let n = usize::from(n);
                let start = model.len();
                let range = buf.reserve(n);
                assert_eq!(range.len(), n);
                for (i, b) in range.iter_mut().enumerate() {
                    *b = (start + i) as u8;
                }
                model.extend((start..start + n).map(|i| i as u8));
            }
            Op::Quote(s, unicode) => {
                let start = buf.len();
                buf.write_quote(s, unicode);
                let quoted = &buf.as_bytes()[start..];
                assert_eq!(quoted, reference_quote(s, unicode).as_bytes());
                if !has_raw_control(s) {
                    let decoded: String = serde_json::from_slice(quoted).unwrap();
                    assert_eq!(decoded, s);
                }
                model.extend_from_slice(quoted);
            }
            Op::Int(v) => {
                buf.append_int(v, 10);
                model.extend_from_slice(v.to_string().as_bytes());
            }
            Op::Trim(n) => {
                let n = usize::from(n);
                buf.trim(n);
                model.truncate(model.len().saturating_sub(n));
            }
            Op::Resize(n) => {
                let n = usize::from(n);
                buf.resize(n);
                assert!(buf.cap() >= n);
                model.truncate(n);
            }
            Op::Reset => {
                buf.reset();
                model.clear();
            }
        }

        assert_eq!(buf.as_bytes(), model.as_slice());
        assert!(buf.len() <= buf.cap());
        if !may_shrink {
            assert!(buf.cap() >= cap_before);
        }
    }
});
