/// Concatenates string-like values into a `String`, allocating once for the final length.
///
/// Each argument is evaluated twice, so pass variables or literals rather than expensive calls.
#[macro_export]
macro_rules! concat_string {
  () => { String::with_capacity(0) };
  ($($s:expr),+ $(,)?) => {{
    use std::ops::AddAssign;
    let mut len = 0;
    $(len.add_assign(AsRef::<str>::as_ref(&$s).len());)+
    let mut buf = String::with_capacity(len);
    $(buf.push_str(&$s);)+
    buf
  }};
}

#[test]
fn test_concat_string() {
  let name = String::from("vue");
  let quoted = "\"vue\"";
  assert_eq!(concat_string!("require(\"", name, "\")"), "require(\"vue\")");
  assert_eq!(concat_string!("require(", quoted, ")"), "require(\"vue\")");
  assert_eq!(concat_string!(), "");
}
