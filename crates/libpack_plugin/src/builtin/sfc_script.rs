use std::sync::LazyLock;

use libpack_common::ModuleType;
use libpack_utils::line_index::line_column;
use regex::Regex;

use crate::{Plugin, PluginError, PluginFilter, TransformArgs, TransformOutput, TransformResult};

static SCRIPT_OPEN_TAG: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"<script\b([^>]*)>").expect("Should be a valid regex"));
static LANG_ATTR: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r#"\blang\s*=\s*["']([A-Za-z]+)["']"#).expect("Should be a valid regex")
});

const SCRIPT_CLOSE_TAG: &str = "</script>";

/// Turns a single-file component into the module its first `<script>` block contains.
///
/// Template and style blocks are left to the component framework's own compiler.
#[derive(Debug, Default)]
pub struct SfcScriptPlugin;

impl Plugin for SfcScriptPlugin {
  fn name(&self) -> &str {
    "libpack:sfc-script"
  }

  fn filter(&self) -> PluginFilter {
    PluginFilter::new(["**/*.vue"])
  }

  fn resolve_extensions(&self) -> &[&str] {
    &[".vue"]
  }

  fn transform(&self, args: &TransformArgs) -> TransformResult {
    let Some(captures) = SCRIPT_OPEN_TAG.captures(args.code) else {
      return Ok(Some(TransformOutput {
        code: "export default {};\n".to_string(),
        module_type: ModuleType::Js,
      }));
    };
    let (Some(open_tag), Some(attrs)) = (captures.get(0), captures.get(1)) else {
      return Err(PluginError::Failed("malformed <script> tag".to_string()));
    };

    let body_start = open_tag.end();
    let Some(body_len) = args.code[body_start..].find(SCRIPT_CLOSE_TAG) else {
      let (line, column) = line_column(args.code, open_tag.start());
      return Err(PluginError::Syntax {
        message: "Unterminated <script> block".to_string(),
        line,
        column,
      });
    };

    let module_type = match LANG_ATTR.captures(attrs.as_str()).and_then(|c| c.get(1)) {
      Some(lang) => match lang.as_str() {
        "ts" => ModuleType::Ts,
        "tsx" => ModuleType::Tsx,
        "jsx" => ModuleType::Jsx,
        "js" => ModuleType::Js,
        other => return Err(PluginError::Failed(format!("unsupported script lang \"{other}\""))),
      },
      None => ModuleType::Js,
    };

    let prefix = &args.code[..body_start];
    let body = &args.code[body_start..body_start + body_len];
    Ok(Some(TransformOutput { code: pad_to_position(prefix, body), module_type }))
  }
}

/// Blanks out everything before the script body so positions in the module match the component.
fn pad_to_position(prefix: &str, body: &str) -> String {
  let last_line = prefix.rfind('\n').map_or(prefix, |idx| &prefix[idx + 1..]);
  let lines = prefix.matches('\n').count();
  let columns = last_line.chars().count();
  let mut code = String::with_capacity(lines + columns + body.len());
  code.extend(std::iter::repeat_n('\n', lines));
  code.extend(std::iter::repeat_n(' ', columns));
  code.push_str(body);
  code
}
