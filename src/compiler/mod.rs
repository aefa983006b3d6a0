//! Drives a document from its layout to a finished [Document].
//!
//! ```
//! use pdf_letterhead::{
//!     layout::{Align, TextOptions}, pagesize, Canvas, DocumentCompiler, DocumentConfig,
//!     InMemoryLayouts, Pt, Result, Stages, StyleRegistry,
//! };
//!
//! struct Greeting;
//!
//! impl Stages for Greeting {
//!     type Row = ();
//!
//!     fn address_field(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
//!         canvas.draw_text("Hello!", Align::Left, TextOptions::default().offset_y(Pt(672.0)));
//!         Ok(())
//!     }
//! }
//!
//! let registry = StyleRegistry::new();
//! let mut layouts = InMemoryLayouts::new();
//! layouts.add_blank("blank", pagesize::A4);
//!
//! let document = DocumentCompiler::run(
//!     &registry,
//!     DocumentConfig::default(),
//!     &layouts,
//!     &mut Greeting,
//!     &[],
//! )
//! .unwrap();
//! assert_eq!(document.page_count(), 1);
//! ```

mod canvas;
mod stages;

pub use canvas::*;
pub use stages::*;

use crate::config::DocumentConfig;
use crate::document::Document;
use crate::source::{Layout, LayoutSource};
use crate::style::StyleRegistry;
use crate::{LetterheadError, Result};
use std::fmt;

/// Where a [DocumentCompiler] is in its lifecycle. Compilers only move forwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompilerState {
    Uninitialized,
    LayoutLoaded,
    PageActive,
    Compiling,
    Compiled,
}

impl CompilerState {
    pub fn name(self) -> &'static str {
        match self {
            CompilerState::Uninitialized => "uninitialized",
            CompilerState::LayoutLoaded => "layout loaded",
            CompilerState::PageActive => "page active",
            CompilerState::Compiling => "compiling",
            CompilerState::Compiled => "compiled",
        }
    }
}

impl fmt::Display for CompilerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Compiles one document: [load_layout](DocumentCompiler::load_layout), then
/// [start](DocumentCompiler::start), then [compile](DocumentCompiler::compile).
/// Calling these out of order is an [InvalidState](LetterheadError::InvalidState) error.
///
/// A compiler only reads from its [StyleRegistry], so any number of compilers can share
/// one registry, across threads too.
#[derive(Debug)]
pub struct DocumentCompiler<'r> {
    registry: &'r StyleRegistry,
    config: DocumentConfig,
    state: CompilerState,
    layout: Option<Layout>,
    canvas: Option<Canvas<'r>>,
}

impl<'r> DocumentCompiler<'r> {
    pub fn new(registry: &'r StyleRegistry, config: DocumentConfig) -> DocumentCompiler<'r> {
        DocumentCompiler {
            registry,
            config,
            state: CompilerState::Uninitialized,
            layout: None,
            canvas: None,
        }
    }

    /// Load, start, and compile in one go
    pub fn run<S: Stages>(
        registry: &'r StyleRegistry,
        config: DocumentConfig,
        source: &dyn LayoutSource,
        stages: &mut S,
        rows: &[S::Row],
    ) -> Result<Document> {
        let mut compiler = DocumentCompiler::new(registry, config);
        compiler.load_layout(source)?;
        compiler.start()?;
        compiler.compile(stages, rows)
    }

    pub fn state(&self) -> CompilerState {
        self.state
    }

    pub fn config(&self) -> &DocumentConfig {
        &self.config
    }

    fn expect_state(&self, expected: CompilerState) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(LetterheadError::InvalidState {
                expected: expected.name(),
                actual: self.state.name(),
            })
        }
    }

    /// Look up the configured layout in `source`
    pub fn load_layout(&mut self, source: &dyn LayoutSource) -> Result<()> {
        self.expect_state(CompilerState::Uninitialized)?;
        log::debug!("Loading layout `{}`", self.config.layout);
        self.layout = Some(source.load(&self.config.layout)?);
        self.state = CompilerState::LayoutLoaded;
        Ok(())
    }

    /// Open the first page. The returned canvas can be drawn on before compiling, e.g.
    /// to add a logo.
    pub fn start(&mut self) -> Result<&mut Canvas<'r>> {
        self.expect_state(CompilerState::LayoutLoaded)?;
        self.config.check_encoding()?;
        let layout = self.layout.take().ok_or(LetterheadError::InvalidState {
            expected: CompilerState::LayoutLoaded.name(),
            actual: self.state.name(),
        })?;
        let canvas = Canvas::new(self.registry, &self.config, layout)?;
        self.state = CompilerState::PageActive;
        Ok(self.canvas.insert(canvas))
    }

    /// The canvas of a started compilation
    pub fn canvas(&mut self) -> Option<&mut Canvas<'r>> {
        self.canvas.as_mut()
    }

    /// Draw all stages of `stages`, with one block row per entry of `rows`. Any error
    /// aborts the compilation; there are no partial documents.
    pub fn compile<S: Stages>(&mut self, stages: &mut S, rows: &[S::Row]) -> Result<Document> {
        self.expect_state(CompilerState::PageActive)?;
        let mut canvas = self.canvas.take().ok_or(LetterheadError::InvalidState {
            expected: CompilerState::PageActive.name(),
            actual: self.state.name(),
        })?;

        self.state = CompilerState::Compiling;
        log::debug!("Compiling document with {} row(s)", rows.len());
        run_stages(stages, &mut canvas, rows, self.config.overflow_threshold)?;

        self.state = CompilerState::Compiled;
        let document = canvas.finish();
        log::debug!("Compiled document with {} page(s)", document.page_count());
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::A4;
    use crate::source::InMemoryLayouts;

    fn layouts() -> InMemoryLayouts {
        let mut layouts = InMemoryLayouts::new();
        layouts.add_blank("blank", A4);
        layouts
    }

    #[test]
    fn walks_through_the_lifecycle() {
        let registry = StyleRegistry::new();
        let mut compiler = DocumentCompiler::new(&registry, DocumentConfig::default());
        assert_eq!(compiler.state(), CompilerState::Uninitialized);

        compiler.load_layout(&layouts()).unwrap();
        assert_eq!(compiler.state(), CompilerState::LayoutLoaded);

        let canvas = compiler.start().unwrap();
        assert_eq!(canvas.page_count(), 1);
        assert_eq!(compiler.state(), CompilerState::PageActive);

        let document = compiler.compile(&mut Blank, &[]).unwrap();
        assert_eq!(compiler.state(), CompilerState::Compiled);
        assert_eq!(document.page_count(), 1);
    }

    #[test]
    fn rejects_steps_out_of_order() {
        let registry = StyleRegistry::new();
        let mut compiler = DocumentCompiler::new(&registry, DocumentConfig::default());

        assert!(matches!(
            compiler.start(),
            Err(LetterheadError::InvalidState { actual: "uninitialized", .. })
        ));
        assert!(matches!(
            compiler.compile(&mut Blank, &[]),
            Err(LetterheadError::InvalidState { expected: "page active", .. })
        ));

        compiler.load_layout(&layouts()).unwrap();
        assert!(matches!(
            compiler.load_layout(&layouts()),
            Err(LetterheadError::InvalidState { .. })
        ));
    }

    #[test]
    fn refuses_to_start_on_other_encodings() {
        let registry = StyleRegistry::new();
        let config = DocumentConfig::builder().encoding("ISO-8859-1").build();
        let mut compiler = DocumentCompiler::new(&registry, config);
        compiler.load_layout(&layouts()).unwrap();

        assert!(matches!(
            compiler.start(),
            Err(LetterheadError::InvalidArgument(_))
        ));
        assert_eq!(compiler.state(), CompilerState::LayoutLoaded);
    }

    #[test]
    fn missing_layouts_are_fatal() {
        let registry = StyleRegistry::new();
        let config = DocumentConfig::builder().layout("shipment").build();
        let mut compiler = DocumentCompiler::new(&registry, config);

        assert!(matches!(
            compiler.load_layout(&layouts()),
            Err(LetterheadError::LayoutNotFound { name, .. }) if name == "shipment"
        ));
        assert_eq!(compiler.state(), CompilerState::Uninitialized);
    }
}
