use arcstr::ArcStr;
use libpack_error::{BuildDiagnostic, BuildResult};
use libpack_utils::line_index::line_column;
use oxc::{
  allocator::Allocator,
  codegen::{Codegen, CodegenOptions},
  diagnostics::OxcDiagnostic,
  minifier::{CompressOptions, MangleOptions, Minifier, MinifierOptions},
  parser::Parser,
  semantic::SemanticBuilder,
  span::SourceType,
  transformer::{TransformOptions, Transformer},
};

use crate::ecma_ast::{
  EcmaAst,
  program_cell::{ParsedProgram, ProgramCell, ProgramOwner},
};

pub struct EcmaCompiler;

impl EcmaCompiler {
  /// Parses `source`, reporting the first parse error as a syntax diagnostic against `filename`.
  pub fn parse(
    filename: &str,
    source: impl Into<ArcStr>,
    source_type: SourceType,
  ) -> BuildResult<EcmaAst> {
    let allocator = Allocator::default();
    let owner = ProgramOwner { source: source.into(), allocator };
    let program = ProgramCell::try_new(owner, |owner| {
      let ret = Parser::new(&owner.allocator, &owner.source, source_type).parse();
      match ret.errors.first() {
        None if !ret.panicked => Ok(ParsedProgram(ret.program)),
        first => Err(Self::to_syntax_diagnostic(filename, &owner.source, first)),
      }
    })?;

    Ok(EcmaAst { program, source_type })
  }

  pub fn print(ast: &EcmaAst) -> String {
    Codegen::new().build(ast.program()).code
  }

  /// Strips TypeScript syntax and lowers JSX, returning plain JavaScript.
  pub fn transform_to_js(filename: &str, mut ast: EcmaAst) -> BuildResult<String> {
    let errors = ast.program.with_program_mut(|allocator, program| {
      let scoping = SemanticBuilder::new().build(program).semantic.into_scoping();
      let options = TransformOptions::default();
      Transformer::new(allocator, std::path::Path::new(filename), &options)
        .build_with_scoping(scoping, program)
        .errors
    });
    if let Some(first) = errors.first() {
      return Err(Self::to_syntax_diagnostic(filename, ast.source(), Some(first)).into());
    }
    Ok(Self::print(&ast))
  }

  pub fn minify(filename: &str, source_text: &str, is_module: bool) -> BuildResult<String> {
    let source_type = if is_module { SourceType::mjs() } else { SourceType::cjs() };
    let mut ast = Self::parse(filename, source_text, source_type)?;

    let code = ast.program.with_program_mut(|allocator, program| {
      let ret = Minifier::new(MinifierOptions {
        mangle: Some(MangleOptions::default()),
        compress: Some(CompressOptions::default()),
      })
      .build(allocator, program);

      Codegen::new()
        .with_options(CodegenOptions { minify: true, ..CodegenOptions::default() })
        .with_scoping(ret.scoping)
        .build(program)
        .code
    });

    Ok(code)
  }

  fn to_syntax_diagnostic(
    filename: &str,
    source: &str,
    diagnostic: Option<&OxcDiagnostic>,
  ) -> BuildDiagnostic {
    let Some(diagnostic) = diagnostic else {
      return BuildDiagnostic::syntax(filename, 1, 1, "Unexpected end of input");
    };
    let offset = diagnostic
      .labels
      .as_ref()
      .and_then(|labels| labels.first())
      .map_or(0, |label| label.offset());
    let (line, column) = line_column(source, offset);
    BuildDiagnostic::syntax(filename, line, column, diagnostic.message.to_string())
  }
}

#[test]
fn basic_test() {
  let ast = EcmaCompiler::parse("a.js", "const a = 1;", SourceType::default()).unwrap();
  let code = EcmaCompiler::print(&ast);
  assert_eq!(code, "const a = 1;\n");
}

#[test]
fn syntax_error_reports_location() {
  let err = EcmaCompiler::parse("src/broken.js", "const a = 1;\nconst b = ;\n", SourceType::mjs())
    .unwrap_err();
  match &err[0] {
    BuildDiagnostic::Syntax { file, line, .. } => {
      assert_eq!(file, "src/broken.js");
      assert_eq!(*line, 2);
    }
    other => panic!("unexpected diagnostic {other:?}"),
  }
}

#[test]
fn typescript_is_stripped() {
  let ast = EcmaCompiler::parse(
    "a.ts",
    "export const size: number = 1;\ninterface Shape { w: number }\n",
    SourceType::ts(),
  )
  .unwrap();
  let code = EcmaCompiler::transform_to_js("a.ts", ast).unwrap();
  assert!(code.contains("export const size = 1;"));
  assert!(!code.contains("interface"));
}
