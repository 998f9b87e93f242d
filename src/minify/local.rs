//! In-process minification.
//!
//! Uses oxc for JavaScript and lightningcss for CSS.

use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};
use oxc::allocator::Allocator;
use oxc::codegen::{Codegen, CodegenOptions, CommentOptions};
use oxc::mangler::MangleOptions;
use oxc::minifier::{
    CompressOptions, CompressOptionsUnused, Minifier as OxcMinifier, MinifierOptions,
};
use oxc::parser::Parser;
use oxc::span::SourceType;

use super::{MinifyError, Minifier};
use crate::asset::AssetKind;

/// Minifier backed by oxc (scripts) and lightningcss (styles).
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalMinifier;

impl Minifier for LocalMinifier {
    fn minify(&self, source: &str, kind: AssetKind) -> Result<String, MinifyError> {
        match kind {
            AssetKind::Style => minify_css(source),
            AssetKind::Script => minify_js(source),
        }
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

/// Minify JavaScript source code.
///
/// Each file is minified on its own and later concatenated with others, so
/// top-level names are part of the bundle's interface: they are neither
/// dropped when unused nor mangled.
pub fn minify_js(source: &str) -> Result<String, MinifyError> {
    let allocator = Allocator::default();
    let source_type = SourceType::script();
    let ret = Parser::new(&allocator, source, source_type).parse();
    if let Some(first) = ret.errors.first() {
        return Err(MinifyError::Parse(first.to_string()));
    }
    let mut program = ret.program;
    let options = MinifierOptions {
        mangle: Some(MangleOptions {
            top_level: Some(false),
            ..MangleOptions::default()
        }),
        compress: Some(CompressOptions {
            unused: CompressOptionsUnused::Keep,
            ..CompressOptions::smallest()
        }),
    };
    let ret = OxcMinifier::new(options).minify(&allocator, &mut program);
    let mut code = Codegen::new()
        .with_options(CodegenOptions {
            minify: true,
            comments: CommentOptions::disabled(),
            ..CodegenOptions::default()
        })
        .with_scoping(ret.scoping)
        .build(&program)
        .code;

    // Chunks are concatenated without separator
    code.truncate(code.trim_end().len());
    if !code.is_empty() && !code.ends_with(';') && !code.ends_with('}') {
        code.push(';');
    }
    Ok(code)
}

/// Minify CSS source code.
pub fn minify_css(source: &str) -> Result<String, MinifyError> {
    let stylesheet = StyleSheet::parse(source, ParserOptions::default())
        .map_err(|e| MinifyError::Parse(e.to_string()))?;
    let result = stylesheet
        .to_css(PrinterOptions {
            minify: true,
            ..PrinterOptions::default()
        })
        .map_err(|e| MinifyError::Parse(e.to_string()))?;
    Ok(result.code)
}
