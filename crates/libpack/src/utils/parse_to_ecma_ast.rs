use libpack_common::ModuleType;
use libpack_ecmascript::{EcmaAst, EcmaCompiler};
use libpack_error::{BuildDiagnostic, BuildResult};
use libpack_utils::concat_string;
use oxc::span::SourceType;

use crate::ast_scanner::{SyntaxCheckResult, SyntaxChecker};

/// Turns the loaded (and possibly plugin-transformed) source into a plain JavaScript module AST,
/// together with the warnings found while checking it.
pub fn parse_to_ecma_ast(
  stable_id: &str,
  source: String,
  module_type: ModuleType,
) -> BuildResult<(EcmaAst, Vec<anyhow::Error>)> {
  let source_type = SourceType::default().with_module(true);
  let authored_type = match module_type {
    ModuleType::Json => {
      if let Err(err) = serde_json::from_str::<serde_json::Value>(&source) {
        return Err(
          BuildDiagnostic::syntax(stable_id, err.line(), err.column(), err.to_string()).into(),
        );
      }
      let js = concat_string!("export default ", source.trim(), ";\n");
      return Ok((EcmaCompiler::parse(stable_id, js, source_type)?, vec![]));
    }
    ModuleType::Js => source_type,
    ModuleType::Jsx => source_type.with_jsx(true),
    ModuleType::Ts => source_type.with_typescript(true),
    ModuleType::Tsx => source_type.with_typescript(true).with_jsx(true),
  };

  let ast = EcmaCompiler::parse(stable_id, source, authored_type)?;
  let SyntaxCheckResult { errors, warnings } =
    SyntaxChecker::new(stable_id, ast.source()).check(ast.program());
  if !errors.is_empty() {
    return Err(errors.into());
  }
  if module_type == ModuleType::Js {
    return Ok((ast, warnings));
  }

  let js = EcmaCompiler::transform_to_js(stable_id, ast)?;
  Ok((EcmaCompiler::parse(stable_id, js, source_type)?, warnings))
}

#[test]
fn json_becomes_default_export() {
  let (ast, _) =
    parse_to_ecma_ast("data.json", "{ \"a\": 1 }\n".to_string(), ModuleType::Json).unwrap();
  assert_eq!(ast.source().as_str(), "export default { \"a\": 1 };\n");
}

#[test]
fn invalid_json_is_a_syntax_error() {
  let err = parse_to_ecma_ast("data.json", "{\n  \"a\": }".to_string(), ModuleType::Json).unwrap_err();
  assert!(matches!(&err[0], BuildDiagnostic::Syntax { line: 2, .. }));
}

#[test]
fn typescript_errors_point_into_the_authored_file() {
  let code = "interface Shape {\n  w: number;\n  h: number;\n}\n\n// sizes\nexport const x: number = await Promise.resolve(1);\n";
  let err = parse_to_ecma_ast("src/size.ts", code.to_string(), ModuleType::Ts).unwrap_err();
  assert!(matches!(&err[0], BuildDiagnostic::Syntax { line: 7, column: 26, .. }));
}

#[test]
fn typescript_is_lowered_after_checking() {
  let code = "interface Shape { w: number }\nexport const area = (s: Shape): number => s.w;\n";
  let (ast, warnings) = parse_to_ecma_ast("src/area.ts", code.to_string(), ModuleType::Ts).unwrap();
  assert!(warnings.is_empty());
  assert!(!ast.source().contains("interface"));
  assert!(ast.source().contains("export const area"));
}
