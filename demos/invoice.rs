use pdf_letterhead::letter::{FinancialLetter, Position};
use pdf_letterhead::{pagesize, DocumentConfig, InMemoryLayouts, LayoutSearchPath, StyleRegistry};

fn main() {
    // the built-in styles use the standard Helvetica fonts, so there's nothing to embed
    let mut registry = StyleRegistry::new();
    FinancialLetter::register_styles(&mut registry);

    // a layout directory can be passed on the command line, otherwise we draw on blank A4 paper
    let mut blank = InMemoryLayouts::new();
    blank.add_blank("blank", pagesize::A4);
    let search = std::env::args()
        .nth(1)
        .map(|dir| LayoutSearchPath::new().with_dir(dir));

    // enough positions to spill the table onto a second and third page
    let positions: Vec<Position> = (1..=32)
        .map(|i| {
            Position::new(
                format!("Consulting, week {i}"),
                "8",
                "95.00 EUR",
                "760.00 EUR",
            )
        })
        .collect();

    let mut letter = FinancialLetter::builder()
        .sender("ACME Consulting Ltd., Market Square 4, 12345 Springfield")
        .recipient("Jane Doe\nDoe Industries\nMain Street 1\n54321 Shelbyville")
        .document_type("INVOICE")
        .number("Invoice No.: 2026-0042\nCustomer No.: 1007")
        .vat_reg_no("VAT Reg. No.: DE123456789")
        .date_and_locality("Springfield, 19 October 2026")
        .subject("Invoice for consulting services")
        .salutation("Dear Ms Doe,")
        .intro("for our services in the past months we charge you as follows:")
        .net_total("24,320.00 EUR")
        .tax("VAT 19%", "4,620.80 EUR")
        .grand_total("28,940.80 EUR")
        .terms("Payable within 14 days without deduction.")
        .build();

    let document = match &search {
        Some(search) => {
            let config = DocumentConfig::builder().layout("invoice").build();
            letter.compile(&registry, config, search, &positions)
        }
        None => letter.compile(&registry, DocumentConfig::default(), &blank, &positions),
    }
    .expect("can compile the invoice");
    println!("compiled {} page(s)", document.page_count());

    // fonts live in the registry, so they're handed to the document when writing it out
    let out = std::fs::File::create("invoice.pdf").expect("can create invoice.pdf");
    document
        .write(registry.fonts(), out)
        .expect("can write the invoice");
}
