use crate::refs::{ObjectReferences, RefType};
use chrono::{DateTime, Datelike, Local, Offset, Timelike};
use pdf_writer::{Date, Pdf, TextStr};

/// Metadata written into the information dictionary of an exported PDF.
/// Every exported document also records this crate as its creator and the
/// time of export as its creation date.
///
/// ```
/// use simple_surface::{Info, Surface};
///
/// let mut surface = Surface::new(600, 800);
/// surface.set_info(Info::new().title("Quadrants").author("Layout team"));
/// ```
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Info {
    pub title: Option<String>,
    /// No prescribed format
    pub author: Option<String>,
    pub subject: Option<String>,
    /// Free text, conventionally a comma separated list
    pub keywords: Option<String>,
}

impl Info {
    pub fn new() -> Info {
        Info::default()
    }

    pub fn title<S: Into<String>>(mut self, title: S) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn author<S: Into<String>>(mut self, author: S) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn subject<S: Into<String>>(mut self, subject: S) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn keywords<S: Into<String>>(mut self, keywords: S) -> Self {
        self.keywords = Some(keywords.into());
        self
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        let mut dict = writer.document_info(refs.gen(RefType::Info));

        if let Some(title) = &self.title {
            dict.title(TextStr(title));
        }
        if let Some(author) = &self.author {
            dict.author(TextStr(author));
        }
        if let Some(subject) = &self.subject {
            dict.subject(TextStr(subject));
        }
        if let Some(keywords) = &self.keywords {
            dict.keywords(TextStr(keywords));
        }

        dict.creator(TextStr(concat!(
            env!("CARGO_PKG_NAME"),
            " v",
            env!("CARGO_PKG_VERSION")
        )));
        dict.creation_date(pdf_date(Local::now()));
    }
}

/// A PDF date carrying the local UTC offset
fn pdf_date(now: DateTime<Local>) -> Date {
    let offset_minutes = now.offset().fix().local_minus_utc() / 60;
    Date::new(now.year() as u16)
        .month(now.month() as u8)
        .day(now.day() as u8)
        .hour(now.hour() as u8)
        .minute(now.minute() as u8)
        .second(now.second() as u8)
        .utc_offset_hour((offset_minutes / 60) as i8)
        .utc_offset_minute((offset_minutes % 60).unsigned_abs() as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn setters_chain() {
        let info = Info::new()
            .title("Layout")
            .author("Somebody")
            .keywords("text, layout");
        assert_eq!(info.title.as_deref(), Some("Layout"));
        assert_eq!(info.author.as_deref(), Some("Somebody"));
        assert_eq!(info.subject, None);
        assert_eq!(info.keywords.as_deref(), Some("text, layout"));
    }

    #[test]
    fn written_into_the_document() {
        let mut refs = ObjectReferences::new();
        let mut writer = Pdf::new();
        Info::new()
            .subject("Quadrants")
            .write(&mut refs, &mut writer);
        let bytes = writer.finish();
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Subject (Quadrants)"));
        assert!(text.contains("/Creator (simple-surface v"));
        assert!(text.contains("/CreationDate (D:"));
    }
}
