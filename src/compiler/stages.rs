use super::Canvas;
use crate::Result;
use std::fmt;

/// The steps a document is drawn in, in order
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Stage {
    AddressField,
    TypeLabel,
    Numbers,
    DateAndLocality,
    Subject,
    Salutation,
    Intro,
    BlockHeader,
    BlockRows,
    BlockFooter,
}

impl Stage {
    pub const SEQUENCE: [Stage; 10] = [
        Stage::AddressField,
        Stage::TypeLabel,
        Stage::Numbers,
        Stage::DateAndLocality,
        Stage::Subject,
        Stage::Salutation,
        Stage::Intro,
        Stage::BlockHeader,
        Stage::BlockRows,
        Stage::BlockFooter,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stage::AddressField => "address field",
            Stage::TypeLabel => "type label",
            Stage::Numbers => "numbers",
            Stage::DateAndLocality => "date and locality",
            Stage::Subject => "subject",
            Stage::Salutation => "salutation",
            Stage::Intro => "intro",
            Stage::BlockHeader => "block header",
            Stage::BlockRows => "block rows",
            Stage::BlockFooter => "block footer",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What a kind of document draws at each [Stage].
///
/// Every method defaults to drawing nothing, so a document only implements the stages
/// it has. Stages can also be left out altogether through [includes](Stages::includes);
/// the block header of a left out block is not repeated on new pages either.
///
/// [prepare_page](Stages::prepare_page) is not a stage of its own: it runs for the first
/// page before any stage, and for every page started because the block rows overflowed,
/// right before the block header is drawn again.
pub trait Stages {
    /// One entry of the repeating block, e.g. an invoice position
    type Row;

    fn includes(&self, _stage: Stage) -> bool {
        true
    }

    fn prepare_page(&mut self, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }

    fn address_field(&mut self, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }

    fn type_label(&mut self, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }

    fn numbers(&mut self, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }

    fn date_and_locality(&mut self, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }

    fn subject(&mut self, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }

    fn salutation(&mut self, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }

    fn intro(&mut self, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }

    fn block_header(&mut self, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }

    fn block_row(&mut self, _canvas: &mut Canvas<'_>, _row: &Self::Row) -> Result<()> {
        Ok(())
    }

    fn block_footer(&mut self, _canvas: &mut Canvas<'_>) -> Result<()> {
        Ok(())
    }
}

/// A document that draws nothing but its layout
#[derive(Debug, Default, Copy, Clone)]
pub struct Blank;

impl Stages for Blank {
    type Row = ();
}

/// Run all included stages against `canvas`, starting a new page whenever a block row
/// leaves the cursor at or below `overflow_threshold`
pub(crate) fn run_stages<S: Stages>(
    stages: &mut S,
    canvas: &mut Canvas<'_>,
    rows: &[S::Row],
    overflow_threshold: crate::Pt,
) -> Result<()> {
    stages.prepare_page(canvas)?;

    for stage in Stage::SEQUENCE {
        if !stages.includes(stage) {
            log::debug!("Skipping stage: {stage}");
            continue;
        }
        log::debug!("Running stage: {stage}");

        match stage {
            Stage::AddressField => stages.address_field(canvas)?,
            Stage::TypeLabel => stages.type_label(canvas)?,
            Stage::Numbers => stages.numbers(canvas)?,
            Stage::DateAndLocality => stages.date_and_locality(canvas)?,
            Stage::Subject => stages.subject(canvas)?,
            Stage::Salutation => stages.salutation(canvas)?,
            Stage::Intro => stages.intro(canvas)?,
            Stage::BlockHeader => stages.block_header(canvas)?,
            Stage::BlockRows => {
                for row in rows {
                    stages.block_row(canvas, row)?;
                    if canvas.advance_for_overflow(overflow_threshold) {
                        stages.prepare_page(canvas)?;
                        if stages.includes(Stage::BlockHeader) {
                            stages.block_header(canvas)?;
                        }
                    }
                }
            }
            Stage::BlockFooter => stages.block_footer(canvas)?,
        }
    }

    Ok(())
}
