use crate::OutputFormat;

const NAME: &str = "[name]";
const FORMAT: &str = "[format]";

/// A file name pattern such as `[name].[format].js`.
#[derive(Debug, Clone)]
pub struct FilenameTemplate {
  template: String,
}

impl FilenameTemplate {
  pub fn new(template: String) -> Self {
    Self { template }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  pub fn render(&self, name: &str, format: OutputFormat) -> String {
    self.template.replace(FORMAT, format.as_str()).replace(NAME, name)
  }

  /// Placeholders other than `[name]` and `[format]`, in order of appearance.
  pub fn unknown_placeholders(&self) -> Vec<&str> {
    let mut ret = vec![];
    let mut rest = self.template.as_str();
    while let Some(start) = rest.find('[') {
      let Some(len) = rest[start..].find(']') else { break };
      let placeholder = &rest[start..=start + len];
      if placeholder != NAME && placeholder != FORMAT {
        ret.push(placeholder);
      }
      rest = &rest[start + len + 1..];
    }
    ret
  }
}

impl From<String> for FilenameTemplate {
  fn from(template: String) -> Self {
    Self::new(template)
  }
}

#[test]
fn test_render() {
  let template = FilenameTemplate::new("[name].[format].js".to_string());
  assert_eq!(template.render("widget-lib", OutputFormat::Umd), "widget-lib.umd.js");

  let fixed = FilenameTemplate::new("index.js".to_string());
  assert_eq!(fixed.render("widget-lib", OutputFormat::Es), "index.js");
}

#[test]
fn test_unknown_placeholders() {
  let template = FilenameTemplate::new("[name]-[hash].[format].[ext]".to_string());
  assert_eq!(template.unknown_placeholders(), vec!["[hash]", "[ext]"]);
  assert!(FilenameTemplate::new("[name].js".to_string()).unknown_placeholders().is_empty());
}
