/// Glob patterns matched against the `/`-separated module path relative to the project root.
#[derive(Debug, Clone, Default)]
pub struct PluginFilter {
  include: Vec<String>,
}

impl PluginFilter {
  pub fn new(include: impl IntoIterator<Item = impl Into<String>>) -> Self {
    Self { include: include.into_iter().map(Into::into).collect() }
  }

  pub fn matches(&self, stable_id: &str) -> bool {
    self.include.iter().any(|pattern| fast_glob::glob_match(pattern, stable_id))
  }
}

#[test]
fn test_matches() {
  let filter = PluginFilter::new(["**/*.vue"]);
  assert!(filter.matches("src/components/Canvas.vue"));
  assert!(!filter.matches("src/index.ts"));
  assert!(!PluginFilter::default().matches("src/index.ts"));
}
