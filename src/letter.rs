//! A business letter with a table of costs: invoices, and the shipment notes printed on
//! the `shipment` layout.
//!
//! Everything the letter prints is handed in pre-formatted. Amounts, dates, and numbers
//! are text as far as layout is concerned.
//!
//! The letter draws in the built-in styles plus two of its own, which have to be
//! registered with [FinancialLetter::register_styles] before compiling.

use crate::compiler::{Canvas, DocumentCompiler, Stage, Stages};
use crate::config::{DocumentConfig, FieldValue};
use crate::document::Document;
use crate::layout::{normalize_newlines, Align, TextOptions};
use crate::source::LayoutSource;
use crate::style::StyleRegistry;
use crate::units::Pt;
use crate::{LetterheadError, Result};

/// Where the first line of the recipient's address goes
pub const ADDRESS_TOP: Pt = Pt(672.0);
/// Baseline of the type label
pub const TYPE_LABEL_TOP: Pt = Pt(580.0);
/// Baseline of the subject (left) and the date (right)
pub const SUBJECT_TOP: Pt = Pt(550.0);
/// Where the numbers block starts
pub const NUMBERS_TOP: Pt = Pt(528.0);
/// Where the costs table header goes, on every page
pub const TABLE_TOP: Pt = Pt(435.0);

const DESCRIPTION_WIDTH: Pt = Pt(300.0);
const AMOUNT_WIDTH: Pt = Pt(100.0);
const QUANTITY_OFFSET: Pt = Pt(300.0);
const UNIT_PRICE_OFFSET: Pt = Pt(400.0);
const TOTAL_OFFSET: Pt = Pt(500.0);

/// One line item of the costs table
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Position {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub total: String,
}

impl Position {
    pub fn new<D, Q, U, T>(description: D, quantity: Q, unit_price: U, total: T) -> Position
    where
        D: Into<String>,
        Q: Into<String>,
        U: Into<String>,
        T: Into<String>,
    {
        Position {
            description: description.into(),
            quantity: quantity.into(),
            unit_price: unit_price.into(),
            total: total.into(),
        }
    }
}

/// Column headings of the costs table
#[derive(Debug, Clone, PartialEq)]
pub struct TableColumns {
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub total: String,
}

impl Default for TableColumns {
    fn default() -> Self {
        TableColumns {
            description: "Description".to_string(),
            quantity: "Quantity".to_string(),
            unit_price: "Unit Price".to_string(),
            total: "Total".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialLetter {
    /// Name of the sender, used as the document's author and creator
    pub sender: Option<String>,
    /// Postal address, one line per line; the first line is set in bold
    pub recipient: String,
    /// e.g. `Invoice`, printed large above the numbers block when set
    pub document_type: Option<String>,
    /// Client number, invoice number and the like, set in bold
    pub numbers: Vec<String>,
    pub vat_reg_no: Option<String>,
    /// e.g. `Springfield, 19.10.2026`
    pub date_and_locality: String,
    pub subject: Option<String>,
    pub salutation: Option<String>,
    pub intro: Option<String>,
    pub columns: TableColumns,
    pub net_total_label: String,
    pub net_total: String,
    /// `(label, amount)` per tax rate
    pub taxes: Vec<(String, String)>,
    pub grand_total_label: String,
    pub grand_total: String,
    pub tax_note: Option<String>,
    pub terms: Option<String>,
    pub note: Option<String>,
    pub closing: Option<String>,

    numbers_bottom: Option<Pt>,
}

impl Default for FinancialLetter {
    fn default() -> Self {
        FinancialLetter {
            sender: None,
            recipient: String::new(),
            document_type: None,
            numbers: Vec::new(),
            vat_reg_no: None,
            date_and_locality: String::new(),
            subject: None,
            salutation: None,
            intro: None,
            columns: TableColumns::default(),
            net_total_label: "Total (net)".to_string(),
            net_total: String::new(),
            taxes: Vec::new(),
            grand_total_label: "Grand Total".to_string(),
            grand_total: String::new(),
            tax_note: None,
            terms: None,
            note: None,
            closing: Some(
                "This invoice has been automatically generated and is valid even without a \
                 signature."
                    .to_string(),
            ),
            numbers_bottom: None,
        }
    }
}

impl FinancialLetter {
    /// Style of the subject line: Helvetica-Bold 13
    pub const SUBJECT_STYLE: &'static str = "letter-subject";
    /// Style of the table header and grand total: Helvetica-Bold 11
    pub const HEADING_STYLE: &'static str = "letter-heading";

    pub fn builder() -> FinancialLetterBuilder {
        FinancialLetterBuilder::default()
    }

    /// Add the styles letters draw in, besides the built-in ones
    pub fn register_styles(registry: &mut StyleRegistry) {
        let bold = registry.bold_font();
        registry
            .define(Self::SUBJECT_STYLE, bold, Pt(13.0))
            .define(Self::HEADING_STYLE, bold, Pt(11.0));
    }

    /// Compile the letter with one table row per position, and fill in the document's
    /// metadata
    pub fn compile(
        &mut self,
        registry: &StyleRegistry,
        config: DocumentConfig,
        source: &dyn LayoutSource,
        positions: &[Position],
    ) -> Result<Document> {
        let mut document =
            DocumentCompiler::run(registry, config, source, &mut *self, positions)?;
        self.apply_metadata(&mut document);
        Ok(document)
    }

    pub fn apply_metadata(&self, document: &mut Document) {
        if let Some(sender) = &self.sender {
            document.meta_author(sender).meta_creator(sender);
        }
        if let Some(subject) = &self.subject {
            document.meta_subject(subject);
        }
        if let Some(document_type) = &self.document_type {
            document.meta_title(document_type);
        }
    }

    /// Draw `text` left aligned on a line of its own below the cursor
    fn next_line(canvas: &mut Canvas<'_>, lines: f32, text: Option<&str>) {
        let y = canvas.skip_lines(lines);
        canvas.set_cursor(y);
        if let Some(text) = text {
            canvas.draw_text(text, Align::Left, TextOptions::default());
        }
    }

    /// Draw an amount right aligned in the 100pt column at `offset`, on the cursor's line
    fn amount(canvas: &mut Canvas<'_>, text: &str, offset: Pt) {
        canvas.draw_text(
            text,
            Align::Right,
            TextOptions::default().width(AMOUNT_WIDTH).offset_x(offset),
        );
    }

    fn table_row(canvas: &mut Canvas<'_>, cells: [&str; 4]) {
        canvas.draw_text(
            cells[0],
            Align::Left,
            TextOptions::default().width(DESCRIPTION_WIDTH),
        );
        Self::amount(canvas, cells[1], QUANTITY_OFFSET);
        Self::amount(canvas, cells[2], UNIT_PRICE_OFFSET);
        Self::amount(canvas, cells[3], TOTAL_OFFSET);
    }
}

impl Stages for FinancialLetter {
    type Row = Position;

    fn includes(&self, stage: Stage) -> bool {
        match stage {
            Stage::TypeLabel => self.document_type.is_some(),
            Stage::Subject => self.subject.is_some(),
            Stage::Salutation => self.salutation.is_some(),
            Stage::Intro => self.intro.is_some(),
            _ => true,
        }
    }

    fn address_field(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        let address = normalize_newlines(&self.recipient);
        for (i, line) in address.split('\n').enumerate() {
            if i == 0 {
                canvas.use_style(StyleRegistry::BODY_BOLD)?;
                canvas.draw_text(line, Align::Left, TextOptions::default().offset_y(ADDRESS_TOP));
                canvas.use_style(StyleRegistry::BODY)?;
            } else {
                Self::next_line(canvas, 1.0, Some(line));
            }
        }
        Ok(())
    }

    fn type_label(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        if let Some(document_type) = &self.document_type {
            canvas.use_style(StyleRegistry::DISPLAY_BOLD)?;
            canvas.draw_text(
                document_type,
                Align::Left,
                TextOptions::default().offset_y(TYPE_LABEL_TOP),
            );
            canvas.use_style(StyleRegistry::BODY)?;
        }
        Ok(())
    }

    fn numbers(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        // numbers in bold, then the VAT reg. no. in regular, one line each from the top
        let lines = self
            .numbers
            .iter()
            .map(|number| (number.as_str(), StyleRegistry::BODY_BOLD))
            .chain(
                self.vat_reg_no
                    .as_deref()
                    .map(|vat_reg_no| (vat_reg_no, StyleRegistry::BODY)),
            );

        let mut drawn = false;
        for (text, style) in lines {
            canvas.use_style(style)?;
            if drawn {
                Self::next_line(canvas, 1.0, Some(text));
            } else {
                canvas.draw_text(text, Align::Left, TextOptions::default().offset_y(NUMBERS_TOP));
                drawn = true;
            }
        }
        canvas.use_style(StyleRegistry::BODY)?;

        self.numbers_bottom = drawn.then_some(canvas.cursor());
        Ok(())
    }

    fn date_and_locality(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        canvas.draw_text(
            &self.date_and_locality,
            Align::Right,
            TextOptions::default().offset_y(SUBJECT_TOP),
        );
        Ok(())
    }

    fn subject(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        if let Some(subject) = &self.subject {
            canvas.use_style(Self::SUBJECT_STYLE)?;
            canvas.draw_text(subject, Align::Left, TextOptions::default().offset_y(SUBJECT_TOP));
            canvas.use_style(StyleRegistry::BODY)?;
        }
        Ok(())
    }

    fn salutation(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        // below both the subject and the numbers block
        let top = match self.numbers_bottom {
            Some(bottom) => bottom.min(canvas.cursor()),
            None => canvas.cursor(),
        };
        canvas.set_cursor(top);
        Self::next_line(canvas, 2.0, self.salutation.as_deref());
        Ok(())
    }

    fn intro(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        if self.salutation.is_none() {
            if let Some(bottom) = self.numbers_bottom {
                canvas.set_cursor(bottom.min(canvas.cursor()));
            }
        }
        Self::next_line(canvas, 2.0, self.intro.as_deref());
        Ok(())
    }

    fn block_header(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        // an intro running past the table top pushes the table down
        let top = if self.intro.is_some() && canvas.page_count() == 1 {
            TABLE_TOP.min(canvas.skip_lines(2.0))
        } else {
            TABLE_TOP
        };
        canvas.set_cursor(top);

        canvas.use_style(Self::HEADING_STYLE)?;
        let columns = &self.columns;
        Self::table_row(
            canvas,
            [
                &columns.description,
                &columns.quantity,
                &columns.unit_price,
                &columns.total,
            ],
        );
        let y = canvas.skip_lines(1.0);
        canvas.set_cursor(y);

        canvas.use_style(StyleRegistry::BODY)?;
        canvas.draw_rule(Pt(0.5), &[]);
        Ok(())
    }

    fn block_row(&mut self, canvas: &mut Canvas<'_>, row: &Position) -> Result<()> {
        let y = canvas.skip_lines(1.0);
        canvas.set_cursor(y);
        Self::table_row(
            canvas,
            [&row.description, &row.quantity, &row.unit_price, &row.total],
        );
        Ok(())
    }

    fn block_footer(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        canvas.use_style(StyleRegistry::BODY_BOLD)?;
        Self::next_line(canvas, 3.0, None);
        canvas.draw_rule(Pt(0.5), &[]);

        Self::next_line(canvas, 1.0, Some(self.net_total_label.as_str()));
        Self::amount(canvas, &self.net_total, TOTAL_OFFSET);
        for (label, amount) in &self.taxes {
            Self::next_line(canvas, 1.0, Some(label.as_str()));
            Self::amount(canvas, amount, TOTAL_OFFSET);
        }

        canvas.use_style(Self::HEADING_STYLE)?;
        Self::next_line(canvas, 1.5, None);
        canvas.draw_rule(Pt(0.5), &[]);
        Self::next_line(canvas, 1.0, Some(self.grand_total_label.as_str()));
        Self::amount(canvas, &self.grand_total, TOTAL_OFFSET);

        canvas.use_style(StyleRegistry::BODY)?;
        Self::next_line(canvas, 2.5, self.tax_note.as_deref());
        Self::next_line(canvas, 1.0, self.terms.as_deref());
        Self::next_line(canvas, 2.0, self.note.as_deref());
        Self::next_line(canvas, 2.0, self.closing.as_deref());
        Ok(())
    }
}

/// Builds a [FinancialLetter] field by field
#[derive(Debug, Default, Clone)]
pub struct FinancialLetterBuilder {
    letter: FinancialLetter,
}

impl FinancialLetterBuilder {
    pub fn sender<S: Into<String>>(mut self, sender: S) -> Self {
        self.letter.sender = Some(sender.into());
        self
    }

    pub fn recipient<S: Into<String>>(mut self, address: S) -> Self {
        self.letter.recipient = address.into();
        self
    }

    pub fn document_type<S: Into<String>>(mut self, document_type: S) -> Self {
        self.letter.document_type = Some(document_type.into());
        self
    }

    /// Add a line to the numbers block
    pub fn number<S: Into<String>>(mut self, number: S) -> Self {
        self.letter.numbers.push(number.into());
        self
    }

    pub fn vat_reg_no<S: Into<String>>(mut self, vat_reg_no: S) -> Self {
        self.letter.vat_reg_no = Some(vat_reg_no.into());
        self
    }

    pub fn date_and_locality<S: Into<String>>(mut self, text: S) -> Self {
        self.letter.date_and_locality = text.into();
        self
    }

    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.letter.subject = Some(subject.into());
        self
    }

    pub fn salutation<S: Into<String>>(mut self, salutation: S) -> Self {
        self.letter.salutation = Some(salutation.into());
        self
    }

    pub fn intro<S: Into<String>>(mut self, intro: S) -> Self {
        self.letter.intro = Some(intro.into());
        self
    }

    pub fn columns(mut self, columns: TableColumns) -> Self {
        self.letter.columns = columns;
        self
    }

    pub fn net_total<S: Into<String>>(mut self, amount: S) -> Self {
        self.letter.net_total = amount.into();
        self
    }

    pub fn tax<L: Into<String>, A: Into<String>>(mut self, label: L, amount: A) -> Self {
        self.letter.taxes.push((label.into(), amount.into()));
        self
    }

    pub fn grand_total<S: Into<String>>(mut self, amount: S) -> Self {
        self.letter.grand_total = amount.into();
        self
    }

    pub fn tax_note<S: Into<String>>(mut self, note: S) -> Self {
        self.letter.tax_note = Some(note.into());
        self
    }

    pub fn terms<S: Into<String>>(mut self, terms: S) -> Self {
        self.letter.terms = Some(terms.into());
        self
    }

    pub fn note<S: Into<String>>(mut self, note: S) -> Self {
        self.letter.note = Some(note.into());
        self
    }

    /// The sentence the letter ends with. Defaults to a note that the letter was generated.
    pub fn closing<S: Into<String>>(mut self, closing: S) -> Self {
        self.letter.closing = Some(closing.into());
        self
    }

    /// Set a text field by name, for callers that only know fields at runtime. Multi-line
    /// `numbers` are split into one entry per line.
    pub fn set<V: Into<FieldValue>>(self, name: &str, value: V) -> Result<Self> {
        let value = value.into();
        let text = || value.clone().into_text(name);
        Ok(match name {
            "sender" => self.sender(text()?),
            "recipient" => self.recipient(text()?),
            "type" | "document_type" => self.document_type(text()?),
            "numbers" => text()?.lines().fold(self, |builder, line| builder.number(line)),
            "vat_reg_no" => self.vat_reg_no(text()?),
            "date_and_locality" => self.date_and_locality(text()?),
            "subject" => self.subject(text()?),
            "salutation" => self.salutation(text()?),
            "intro" => self.intro(text()?),
            "net_total" => self.net_total(text()?),
            "grand_total" => self.grand_total(text()?),
            "tax_note" => self.tax_note(text()?),
            "terms" => self.terms(text()?),
            "note" => self.note(text()?),
            "closing" => self.closing(text()?),
            _ => return Err(LetterheadError::UnknownField(name.to_string())),
        })
    }

    pub fn build(self) -> FinancialLetter {
        self.letter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_by_name_and_by_method() {
        let by_name = FinancialLetter::builder()
            .set("recipient", "Jane Doe\nMain Street 1")
            .unwrap()
            .set("numbers", "Client No.: 17\nInvoice No.: 2026-001")
            .unwrap()
            .set("subject", "Your invoice")
            .unwrap()
            .build();
        let by_method = FinancialLetter::builder()
            .recipient("Jane Doe\nMain Street 1")
            .number("Client No.: 17")
            .number("Invoice No.: 2026-001")
            .subject("Your invoice")
            .build();
        assert_eq!(by_name, by_method);
    }

    #[test]
    fn rejects_unknown_fields() {
        assert!(matches!(
            FinancialLetter::builder().set("iban", "DE00"),
            Err(LetterheadError::UnknownField(name)) if name == "iban"
        ));
        assert!(matches!(
            FinancialLetter::builder().set("subject", 12.0),
            Err(LetterheadError::InvalidArgument(_))
        ));
    }

    #[test]
    fn optional_stages_follow_the_fields() {
        let letter = FinancialLetter::builder().subject("Hi").build();
        assert!(letter.includes(Stage::Subject));
        assert!(!letter.includes(Stage::TypeLabel));
        assert!(!letter.includes(Stage::Salutation));
        assert!(!letter.includes(Stage::Intro));
        assert!(letter.includes(Stage::BlockRows));
    }

    fn canvas(registry: &StyleRegistry) -> Canvas<'_> {
        let layout = crate::source::Layout::blank(crate::pagesize::A4);
        Canvas::new(registry, &DocumentConfig::default(), layout).unwrap()
    }

    #[test]
    fn trailing_address_lines_take_up_space() {
        let registry = StyleRegistry::new();
        let mut canvas = canvas(&registry);
        let mut letter = FinancialLetter::builder()
            .recipient("Jane Doe\r\nMain Street 1\n")
            .build();

        letter.address_field(&mut canvas).unwrap();
        let lines: Vec<_> = canvas.page().spans().map(|span| span.coords.1).collect();
        assert_eq!(lines, vec![Pt(672.0), Pt(659.0)]);
        assert_eq!(canvas.cursor(), Pt(646.0));
    }

    #[test]
    fn numbers_start_at_the_numbers_top() {
        let mut registry = StyleRegistry::new();
        FinancialLetter::register_styles(&mut registry);
        let mut canvas = canvas(&registry);
        canvas.set_cursor(Pt(300.0));
        let mut letter = FinancialLetter::builder()
            .number("Client No.: 17")
            .vat_reg_no("VAT Reg. No.: DE123")
            .build();

        letter.numbers(&mut canvas).unwrap();
        let spans: Vec<_> = canvas.page().spans().collect();
        assert_eq!(spans[0].coords.1, NUMBERS_TOP);
        assert_eq!(spans[0].font.id, registry.bold_font());
        assert_eq!(spans[1].coords.1, Pt(515.0));
        assert_eq!(spans[1].font.id, registry.regular_font());
        assert_eq!(letter.numbers_bottom, Some(Pt(515.0)));
        assert_eq!(canvas.style(), registry.get(StyleRegistry::BODY).unwrap());

        let mut empty = FinancialLetter::default();
        empty.numbers(&mut canvas).unwrap();
        assert_eq!(empty.numbers_bottom, None);
    }
}
