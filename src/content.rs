//! Turns a [Page]'s draw operations into a PDF content stream.

use crate::font::Font;
use crate::page::{ImageLayout, Page, PageContents, RuleLayout, SpanLayout};
use id_arena::Arena;
use std::io::Write;

/// Render the background and all contents of a page, in drawing order.
///
/// Text is encoded according to its font: standard fonts take single WinAnsi bytes,
/// embedded fonts two-byte glyph ids. Characters the font cannot encode are dropped.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(page: &Page, fonts: &Arena<Font>) -> Result<Vec<u8>, std::io::Error> {
    let mut content: Vec<u8> = Vec::default();

    if let Some(background) = &page.background {
        render_image(&mut content, background)?;
    }
    if page.contents.is_empty() {
        return Ok(content);
    }

    // transforms stay in effect until the end of the page
    write!(&mut content, "q\n")?;
    for page_content in page.contents.iter() {
        match page_content {
            PageContents::Text(span) => render_span(&mut content, span, fonts)?,
            PageContents::Rule(rule) => render_rule(&mut content, rule)?,
            PageContents::Image(image) => render_image(&mut content, image)?,
            PageContents::Transform(t) => {
                write!(
                    &mut content,
                    "{} {} {} {} {} {} cm\n",
                    t.a, t.b, t.c, t.d, t.e, t.f
                )?;
            }
        }
    }
    write!(&mut content, "Q\n")?;

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_span(
    content: &mut Vec<u8>,
    span: &SpanLayout,
    fonts: &Arena<Font>,
) -> Result<(), std::io::Error> {
    let Some(font) = fonts.get(span.font.id) else {
        log::warn!("Dropping text `{}` set in an unknown font", span.text);
        return Ok(());
    };

    write!(content, "BT\n")?;
    write!(content, "/F{} {} Tf\n", span.font.id.index(), span.font.size)?;
    write!(content, "{} {} Td\n", span.coords.0, span.coords.1)?;
    let codes = font.encode_str(&span.text);
    if codes.len() < span.text.chars().count() {
        log::warn!("`{}` has characters {} cannot draw, skipping them", span.text, font.name());
    }
    write!(content, "<")?;
    for code in codes {
        match font {
            Font::Standard(_) => write!(content, "{code:02x}")?,
            Font::Embedded(_) => write!(content, "{code:04x}")?,
        }
    }
    write!(content, "> Tj\n")?;
    write!(content, "ET\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_rule(content: &mut Vec<u8>, rule: &RuleLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write!(content, "{} w\n", rule.thickness)?;
    write!(content, "[")?;
    for (i, length) in rule.dash.iter().enumerate() {
        if i > 0 {
            write!(content, " ")?;
        }
        write!(content, "{length}")?;
    }
    write!(content, "] 0 d\n")?;
    write!(content, "{} {} m\n", rule.from.0, rule.from.1)?;
    write!(content, "{} {} l\n", rule.to.0, rule.to.1)?;
    write!(content, "S\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn render_image(content: &mut Vec<u8>, image: &ImageLayout) -> Result<(), std::io::Error> {
    write!(content, "q\n")?;
    write!(
        content,
        "{} 0 0 {} {} {} cm\n",
        image.position.width(),
        image.position.height(),
        image.position.x1,
        image.position.y1
    )?;
    write!(content, "/I{} Do\n", image.image_id.index())?;
    write!(content, "Q\n")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::StandardFont;
    use crate::page::SpanFont;
    use crate::pagesize::A4;
    use crate::units::*;

    #[test]
    fn renders_text_rules_and_rotation() {
        let mut fonts: Arena<Font> = Arena::new();
        let font = fonts.alloc(StandardFont::Helvetica.into());

        let mut page = Page::new(A4);
        page.add_span(SpanLayout {
            text: "Hi".into(),
            font: SpanFont { id: font, size: Pt(10.0) },
            coords: (Pt(80.0), Pt(672.0)),
        });
        page.add_rule(RuleLayout {
            from: (Pt(80.0), Pt(600.0)),
            to: (Pt(545.0), Pt(600.0)),
            thickness: Pt(0.5),
            dash: vec![3.0, 1.0],
        });
        page.rotate(180.0);

        let rendered = String::from_utf8(render_contents(&page, &fonts).unwrap()).unwrap();
        assert!(rendered.contains("/F0 10 Tf\n80 672 Td\n<4869> Tj\n"));
        assert!(rendered.contains("0.5 w\n[3 1] 0 d\n80 600 m\n545 600 l\nS\n"));
        assert!(rendered.trim_end().ends_with("cm\nQ"));
    }

    #[test]
    fn blank_pages_render_nothing() {
        let fonts: Arena<Font> = Arena::new();
        let page = Page::new(A4);
        assert!(render_contents(&page, &fonts).unwrap().is_empty());
    }
}
