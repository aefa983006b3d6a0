use pdf_letterhead::layout::{Align, TextOptions};
use pdf_letterhead::{
    pagesize, Canvas, CompilerState, Document, DocumentCompiler, DocumentConfig,
    FinancialLetter, InMemoryLayouts, LetterheadError, Page, Position, Pt, Result, Stage, Stages,
    StyleRegistry,
};

fn registry() -> StyleRegistry {
    let mut registry = StyleRegistry::new();
    FinancialLetter::register_styles(&mut registry);
    registry
}

fn layouts() -> InMemoryLayouts {
    let mut layouts = InMemoryLayouts::new();
    layouts.add_blank("blank", pagesize::A4);
    layouts
}

fn positions(count: usize) -> Vec<Position> {
    (1..=count)
        .map(|i| Position::new(format!("Item {i}"), "1", "10.00 EUR", "10.00 EUR"))
        .collect()
}

fn texts(page: &Page) -> Vec<&str> {
    page.spans().map(|span| span.text.as_str()).collect()
}

fn span_at(page: &Page, text: &str) -> (Pt, Pt) {
    page.spans()
        .find(|span| span.text == text)
        .map(|span| span.coords)
        .unwrap_or_else(|| panic!("`{text}` is not on the page"))
}

fn invoice() -> FinancialLetter {
    FinancialLetter::builder()
        .sender("ACME Ltd.")
        .recipient("Jane Doe\nMain Street 1\n12345 Springfield")
        .number("Client No.: 17")
        .number("Invoice No.: 2026-001")
        .date_and_locality("Springfield, 19.10.2026")
        .subject("Your invoice")
        .net_total("300.00 EUR")
        .tax("Tax (19%)", "57.00 EUR")
        .grand_total("357.00 EUR")
        .terms("Payable within 14 days.")
        .build()
}

#[test]
fn address_starts_at_672_one_line_per_line() {
    let registry = registry();
    let document = invoice()
        .compile(&registry, DocumentConfig::default(), &layouts(), &positions(1))
        .unwrap();

    let page = &document.pages[0];
    assert_eq!(span_at(page, "Jane Doe"), (Pt(80.0), Pt(672.0)));
    assert_eq!(span_at(page, "Main Street 1"), (Pt(80.0), Pt(659.0)));
    assert_eq!(span_at(page, "12345 Springfield"), (Pt(80.0), Pt(646.0)));

    let name = page.spans().find(|span| span.text == "Jane Doe").unwrap();
    let street = page.spans().find(|span| span.text == "Main Street 1").unwrap();
    assert_eq!(name.font.id, registry.bold_font());
    assert_eq!(street.font.id, registry.regular_font());
}

#[test]
fn letter_head_sits_at_fixed_positions() {
    let registry = registry();
    let document = invoice()
        .compile(&registry, DocumentConfig::default(), &layouts(), &positions(1))
        .unwrap();
    let page = &document.pages[0];

    assert_eq!(span_at(page, "Client No.: 17"), (Pt(80.0), Pt(528.0)));
    assert_eq!(span_at(page, "Invoice No.: 2026-001"), (Pt(80.0), Pt(515.0)));
    assert_eq!(span_at(page, "Your invoice").1, Pt(550.0));
    assert_eq!(span_at(page, "Description"), (Pt(80.0), Pt(435.0)));
    assert_eq!(span_at(page, "Item 1"), (Pt(80.0), Pt(409.0)));

    let style = registry.get(StyleRegistry::BODY).unwrap();
    let date = "Springfield, 19.10.2026";
    let (x, y) = span_at(page, date);
    assert_eq!(y, Pt(550.0));
    assert!((x + registry.width_of(date, style) + Pt(55.0) - Pt(595.0)).abs() < 1e-3);

    // the total column ends 5pt left of the page edge
    let heading = registry.get(FinancialLetter::HEADING_STYLE).unwrap();
    let (x, _) = span_at(page, "Total");
    assert!((x + registry.width_of("Total", heading) - Pt(545.0)).abs() < 1e-3);
}

#[test]
fn rows_overflow_onto_new_pages_below_the_threshold() {
    let registry = registry();
    let document = invoice()
        .compile(&registry, DocumentConfig::default(), &layouts(), &positions(30))
        .unwrap();

    // the header leaves the cursor at 422, so the 14th row (at 240) fills a page
    assert_eq!(document.page_count(), 3);

    let first = texts(&document.pages[0]);
    assert!(first.contains(&"Item 14"));
    assert!(!first.contains(&"Item 15"));

    let second = texts(&document.pages[1]);
    assert_eq!(&second[..4], &["Description", "Quantity", "Unit Price", "Total"]);
    assert_eq!(second[4], "Item 15");
    assert_eq!(span_at(&document.pages[1], "Description").1, Pt(435.0));
    assert!(!second.contains(&"Jane Doe"));

    let third = texts(&document.pages[2]);
    assert_eq!(&third[..5], &["Description", "Quantity", "Unit Price", "Total", "Item 29"]);
    assert!(third.contains(&"357.00 EUR"));
}

#[derive(Default)]
struct Recorder {
    calls: Vec<String>,
}

impl Recorder {
    fn record(&mut self, canvas: &Canvas<'_>, name: &str) {
        self.calls.push(format!("{name}@{}", canvas.page_count()));
    }
}

impl Stages for Recorder {
    type Row = u32;

    fn includes(&self, stage: Stage) -> bool {
        stage != Stage::Salutation
    }

    fn prepare_page(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        self.record(canvas, "prepare");
        Ok(())
    }

    fn address_field(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        self.record(canvas, "address");
        Ok(())
    }

    fn type_label(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        self.record(canvas, "type");
        Ok(())
    }

    fn numbers(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        self.record(canvas, "numbers");
        Ok(())
    }

    fn date_and_locality(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        self.record(canvas, "date");
        Ok(())
    }

    fn subject(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        self.record(canvas, "subject");
        Ok(())
    }

    fn salutation(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        self.record(canvas, "salutation");
        Ok(())
    }

    fn intro(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        self.record(canvas, "intro");
        Ok(())
    }

    fn block_header(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        self.record(canvas, "header");
        Ok(())
    }

    fn block_row(&mut self, canvas: &mut Canvas<'_>, row: &u32) -> Result<()> {
        self.record(canvas, &format!("row{row}"));
        Ok(())
    }

    fn block_footer(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        self.record(canvas, "footer");
        Ok(())
    }
}

#[test]
fn stages_run_in_order_and_headers_repeat_after_page_breaks() {
    let registry = StyleRegistry::new();
    // the cursor never gets above 800, so every row fills a page
    let config = DocumentConfig::builder()
        .overflow_threshold(Pt(800.0))
        .build();
    let mut recorder = Recorder::default();

    let document =
        DocumentCompiler::run(&registry, config, &layouts(), &mut recorder, &[1, 2]).unwrap();

    assert_eq!(
        recorder.calls,
        vec![
            "prepare@1", "address@1", "type@1", "numbers@1", "date@1", "subject@1", "intro@1",
            "header@1", "row1@1", "prepare@2", "header@2", "row2@2", "prepare@3", "header@3",
            "footer@3",
        ]
    );
    assert_eq!(document.page_count(), 3);
}

struct Headline;

impl Stages for Headline {
    type Row = ();

    fn subject(&mut self, canvas: &mut Canvas<'_>) -> Result<()> {
        canvas.use_style("headline")?;
        canvas.draw_text("Never drawn", Align::Left, TextOptions::default());
        Ok(())
    }
}

#[test]
fn stage_errors_abort_the_compilation() {
    let registry = StyleRegistry::new();
    let mut compiler = DocumentCompiler::new(&registry, DocumentConfig::default());
    compiler.load_layout(&layouts()).unwrap();
    compiler.start().unwrap();

    let result = compiler.compile(&mut Headline, &[]);
    assert!(matches!(result, Err(LetterheadError::UnknownStyle(name)) if name == "headline"));
    assert_eq!(compiler.state(), CompilerState::Compiling);
    assert!(matches!(
        compiler.compile(&mut Headline, &[]),
        Err(LetterheadError::InvalidState { .. })
    ));
}

#[test]
fn letters_need_their_styles_registered() {
    let registry = StyleRegistry::new();
    let result = invoice().compile(&registry, DocumentConfig::default(), &layouts(), &[]);
    assert!(matches!(
        result,
        Err(LetterheadError::UnknownStyle(name)) if name == FinancialLetter::SUBJECT_STYLE
    ));
}

#[test]
fn drawing_before_compiling_lands_on_the_first_page() {
    let registry = registry();
    let mut compiler = DocumentCompiler::new(&registry, DocumentConfig::default());
    compiler.load_layout(&layouts()).unwrap();

    let canvas = compiler.start().unwrap();
    canvas.use_style(StyleRegistry::CAPTION).unwrap();
    canvas.draw_text(
        "ACME Ltd. - Market Square 3 - Springfield",
        Align::Left,
        TextOptions::default().offset_y(Pt(700.0)),
    );
    canvas.use_style(StyleRegistry::BODY).unwrap();

    let mut letter = invoice();
    let document = compiler.compile(&mut letter, &positions(2)).unwrap();
    let page = &document.pages[0];
    assert_eq!(texts(page)[0], "ACME Ltd. - Market Square 3 - Springfield");
    assert_eq!(page.spans().next().unwrap().font.size, Pt(7.0));
}

#[test]
fn long_intros_push_the_table_down() {
    let registry = registry();
    let mut letter = FinancialLetter::builder()
        .recipient("Jane Doe")
        .number("Invoice No.: 2026-002")
        .salutation("Dear Jane,")
        .intro(lipsum::lipsum(150))
        .build();
    let document = letter
        .compile(&registry, DocumentConfig::default(), &layouts(), &positions(1))
        .unwrap();
    let page = &document.pages[0];

    assert_eq!(span_at(page, "Dear Jane,").1, Pt(528.0 - 26.0));
    let lowest_intro_line = page
        .spans()
        .take_while(|span| span.text != "Description")
        .map(|span| span.coords.1)
        .fold(Pt(f32::MAX), Pt::min);
    let (_, header) = span_at(page, "Description");
    assert!(header < lowest_intro_line);
    assert!(header < Pt(435.0));
}

#[test]
fn metadata_comes_from_the_letter() {
    let registry = registry();
    let document: Document = invoice()
        .compile(&registry, DocumentConfig::default(), &layouts(), &[])
        .unwrap();
    assert_eq!(document.info.author.as_deref(), Some("ACME Ltd."));
    assert_eq!(document.info.creator.as_deref(), Some("ACME Ltd."));
    assert_eq!(document.info.subject.as_deref(), Some("Your invoice"));
    assert_eq!(document.encoding, "UTF-8");
}

#[test]
fn compilations_share_one_registry_across_threads() {
    let registry = registry();
    let layouts = layouts();

    let page_counts: Vec<(String, usize)> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let registry = &registry;
                let layouts = &layouts;
                scope.spawn(move || {
                    let mut letter = FinancialLetter::builder()
                        .recipient(format!("Customer {i}"))
                        .build();
                    let document = letter
                        .compile(registry, DocumentConfig::default(), layouts, &positions(i * 10))
                        .unwrap();
                    let first = document.pages[0].spans().next().unwrap().text.clone();
                    (first, document.page_count())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        page_counts,
        vec![
            ("Customer 1".to_string(), 1),
            ("Customer 2".to_string(), 2),
            ("Customer 3".to_string(), 3),
            ("Customer 4".to_string(), 3),
        ]
    );
}
