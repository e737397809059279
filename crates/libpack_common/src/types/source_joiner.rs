use super::source::Source;

/// Collects pieces of an artifact and joins them with `\n`.
#[derive(Default)]
pub struct SourceJoiner<'source> {
  inner: Vec<Box<dyn Source + Send + 'source>>,
}

impl<'source> SourceJoiner<'source> {
  pub fn append_source<T: Source + Send + 'source>(&mut self, source: T) {
    self.inner.push(Box::new(source));
  }

  pub fn join(&self) -> String {
    let size_hint = self.inner.iter().map(|source| source.content().len() + 1).sum::<usize>();
    let mut ret_source = String::with_capacity(size_hint);

    for (index, source) in self.inner.iter().enumerate() {
      if index > 0 {
        ret_source.push('\n');
      }
      ret_source.push_str(source.content());
    }

    ret_source
  }
}

#[test]
fn test_join() {
  let mut joiner = SourceJoiner::default();
  joiner.append_source("a");
  joiner.append_source(String::from("b"));
  assert_eq!(joiner.join(), "a\nb");
  assert_eq!(SourceJoiner::default().join(), "");
}
