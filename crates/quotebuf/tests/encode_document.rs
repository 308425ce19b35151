#![expect(missing_docs)]

use insta::{assert_snapshot, assert_yaml_snapshot};
use quotebuf::{Buffer, FloatFormat};
use rstest::rstest;
use serde::Serialize;

/// Small record encoder of the kind the buffer is meant to sit under.
#[derive(Clone, Copy)]
enum Field<'a> {
    Str(&'a str),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

fn encode_object(buf: &mut Buffer, fields: &[(&str, Field<'_>)], unicode: bool) {
    buf.write_byte(b'{');
    for (i, (key, value)) in fields.iter().enumerate() {
        if i > 0 {
            buf.write_byte(b',');
        }
        buf.write_quote(key, unicode);
        buf.write_byte(b':');
        match *value {
            Field::Str(s) => buf.write_quote(s, unicode),
            Field::Int(v) => buf.append_int(v, 10),
            Field::Float(v) => buf.append_float(v, FloatFormat::Shortest),
            Field::Bool(v) => {
                buf.write_str(if v { "true" } else { "false" });
            }
            Field::Null => {
                buf.write_str("null");
            }
        }
    }
    buf.write_byte(b'}');
}

const RECORD: &[(&str, Field<'static>)] = &[
    ("id", Field::Int(-42)),
    ("name", Field::Str("Ada \"Countess\" Lovelace")),
    ("path", Field::Str("C:\\notes/engines")),
    ("greeting", Field::Str("你好\n世界")),
    ("emoji", Field::Str("🦀")),
    ("score", Field::Float(0.1)),
    ("active", Field::Bool(true)),
    ("parent", Field::Null),
];

#[test]
fn snapshot_record_literal_utf8() {
    let mut buf = Buffer::new();
    encode_object(&mut buf, RECORD, false);
    assert_snapshot!(buf.to_string(), @r#"{"id":-42,"name":"Ada \"Countess\" Lovelace","path":"C:\\notes\/engines","greeting":"你好\n世界","emoji":"🦀","score":0.1,"active":true,"parent":null}"#);
}

#[test]
fn snapshot_record_ascii_only() {
    let mut buf = Buffer::new();
    encode_object(&mut buf, RECORD, true);
    assert_snapshot!(buf.to_string(), @r#"{"id":-42,"name":"Ada \"Countess\" Lovelace","path":"C:\\notes\/engines","greeting":"\u4f60\u597d\n\u4e16\u754c","emoji":"\ud83e\udd80","score":0.1,"active":true,"parent":null}"#);
}

#[rstest]
fn encoded_record_parses_back(#[values(false, true)] unicode: bool) {
    let mut buf = Buffer::new();
    encode_object(&mut buf, RECORD, unicode);
    let value: serde_json::Value = serde_json::from_slice(buf.as_bytes()).unwrap();
    assert_eq!(value["name"], "Ada \"Countess\" Lovelace");
    assert_eq!(value["path"], "C:\\notes/engines");
    assert_eq!(value["greeting"], "你好\n世界");
    assert_eq!(value["emoji"], "🦀");
    assert_eq!(value["id"], -42);
    assert_eq!(value["score"], 0.1);
    assert_eq!(value["parent"], serde_json::Value::Null);
}

#[derive(Serialize)]
struct Growth {
    written: usize,
    len: usize,
    cap: usize,
    spilled: bool,
}

#[test]
fn snapshot_growth_steps() {
    let mut buf = Buffer::new();
    let mut steps = vec![];
    for written in [0, 1, 32, 33, 128, 129, 2048, 2049, 4097, 6145, 20_000] {
        let missing = written - buf.len();
        buf.write(&vec![b'.'; missing]);
        steps.push(Growth {
            written,
            len: buf.len(),
            cap: buf.cap(),
            spilled: buf.spilled(),
        });
    }

    assert_yaml_snapshot!(steps, @r"
    - written: 0
      len: 0
      cap: 0
      spilled: false
    - written: 1
      len: 1
      cap: 32
      spilled: false
    - written: 32
      len: 32
      cap: 32
      spilled: false
    - written: 33
      len: 33
      cap: 128
      spilled: true
    - written: 128
      len: 128
      cap: 128
      spilled: true
    - written: 129
      len: 129
      cap: 320
      spilled: true
    - written: 2048
      len: 2048
      cap: 4096
      spilled: true
    - written: 2049
      len: 2049
      cap: 4096
      spilled: true
    - written: 4097
      len: 4097
      cap: 8192
      spilled: true
    - written: 6145
      len: 6145
      cap: 8192
      spilled: true
    - written: 20000
      len: 20000
      cap: 24576
      spilled: true
    ");
}

#[rstest]
#[case::empty("", "")]
#[case::ascii("abc", "abc")]
#[case::multi_byte("aé", "aé")]
fn reset_buffer_is_reusable(#[case] first: &str, #[case] second: &str) {
    let mut buf = Buffer::new();
    buf.write_str(first);
    buf.write(&[0; 100]);
    let cap = buf.cap();
    buf.reset();
    assert_eq!(buf.cap(), cap);
    buf.write_str(second);
    assert_eq!(buf, second);
}
