/// Converts a byte offset into a 1-based `(line, column)` pair. Columns count chars, not bytes.
pub fn line_column(source: &str, offset: usize) -> (usize, usize) {
  let mut offset = offset.min(source.len());
  while !source.is_char_boundary(offset) {
    offset -= 1;
  }
  let before = &source[..offset];
  let line = memchr::memchr_iter(b'\n', before.as_bytes()).count() + 1;
  let line_start = memchr::memrchr(b'\n', before.as_bytes()).map_or(0, |idx| idx + 1);
  let column = before[line_start..].chars().count() + 1;
  (line, column)
}

#[test]
fn test_line_column() {
  let source = "const a = 1;\nconst b = ;\n";
  assert_eq!(line_column(source, 0), (1, 1));
  assert_eq!(line_column(source, 13), (2, 1));
  assert_eq!(line_column(source, 23), (2, 11));
  assert_eq!(line_column(source, 1000), (3, 1));
}
