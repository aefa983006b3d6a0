use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Offset, TimeZone, Timelike};
use pdf_writer::{Date as PDate, Pdf, TextStr};

/// Document metadata. Nothing here affects layout; it only ends up in the PDF's
/// information dictionary.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Info {
    pub title: Option<String>,
    pub author: Option<String>,
    pub subject: Option<String>,
    pub keywords: Option<String>,
    /// The application that created the original content. Defaults to this crate.
    pub creator: Option<String>,
}

impl Info {
    /// Create a new info block, with all metadata set to [None]
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: ToString>(&mut self, title: S) -> &mut Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn author<S: ToString>(&mut self, author: S) -> &mut Self {
        self.author = Some(author.to_string());
        self
    }

    pub fn subject<S: ToString>(&mut self, subject: S) -> &mut Self {
        self.subject = Some(subject.to_string());
        self
    }

    /// No prescribed format, though a comma separated list is what most viewers expect
    pub fn keywords<S: ToString>(&mut self, keywords: S) -> &mut Self {
        self.keywords = Some(keywords.to_string());
        self
    }

    pub fn creator<S: ToString>(&mut self, creator: S) -> &mut Self {
        self.creator = Some(creator.to_string());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let id = refs.gen(RefType::Info);
        let mut info = writer.document_info(id);

        if let Some(title) = &self.title {
            info.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            info.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            info.subject(TextStr(subject));
        }
        if let Some(keywords) = &self.keywords {
            info.keywords(TextStr(keywords));
        }
        let producer = concat!(env!("CARGO_PKG_NAME"), " v", env!("CARGO_PKG_VERSION"));
        info.creator(TextStr(self.creator.as_deref().unwrap_or(producer)));
        info.producer(TextStr(producer));

        info.creation_date(pdf_date(Local::now()));
    }
}

/// A timestamp as a PDF date, keeping its UTC offset
fn pdf_date<Tz: TimeZone>(time: DateTime<Tz>) -> PDate {
    let offset = time.offset().fix().local_minus_utc();
    let offset_hours = offset / 3600;
    let offset_minutes = (offset % 3600 / 60).abs();
    PDate::new(time.year() as u16)
        .month(time.month() as u8)
        .day(time.day() as u8)
        .hour(time.hour() as u8)
        .minute(time.minute() as u8)
        .second(time.second() as u8)
        .utc_offset_hour(offset_hours as i8)
        .utc_offset_minute(offset_minutes as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn writes_metadata_and_dates() {
        let mut info = Info::new();
        info.title("Invoice").author("ACME Ltd.");

        let mut refs = ObjectReferences::new();
        let mut pdf = Pdf::new();
        info.write(&mut refs, &mut pdf);
        let bytes = pdf.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Title (Invoice)"));
        assert!(text.contains("/Author (ACME Ltd.)"));
        assert!(text.contains("/Creator (pdf-letterhead v"));

        let tz = FixedOffset::east_opt(-(3 * 3600 + 30 * 60)).unwrap();
        let time = tz.with_ymd_and_hms(2026, 10, 19, 8, 5, 0).unwrap();
        let mut pdf = Pdf::new();
        pdf.document_info(pdf_writer::Ref::new(1))
            .creation_date(pdf_date(time));
        let bytes = pdf.finish();
        assert!(String::from_utf8_lossy(&bytes).contains("(D:20261019080500-03"));
    }
}
