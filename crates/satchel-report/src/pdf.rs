//! PDF layout for report cards.
//!
//! One A4 page per student. Column positions are fixed offsets; values are
//! stringified directly with no locale formatting or overflow handling.

use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::card::{PERIODS, ReportCard, SubjectMarks};
use crate::error::{Error, Result};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;

/// Left offsets of the marks-table columns: subject, then the six periods.
const TABLE_COLUMNS: [f32; 7] = [20.0, 80.0, 98.0, 116.0, 134.0, 152.0, 170.0];

const HEADER_Y: f32 = 272.0;
const IDENTITY_TOP_Y: f32 = 250.0;
const TABLE_TOP_Y: f32 = 200.0;
const LINE_STEP: f32 = 8.0;
const SIGNATURE_Y: f32 = 30.0;

/// Render one page per report card and return the document bytes.
pub fn render_pdf(cards: &[ReportCard]) -> Result<Vec<u8>> {
    let first = cards.first().ok_or(Error::NoStudents)?;

    let (doc, page, layer) = PdfDocument::new(
        "Student Report Cards",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "page",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::Pdf(e.to_string()))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| Error::Pdf(e.to_string()))?;

    render_page(&doc.get_page(page).get_layer(layer), first, &font, &bold);

    for card in &cards[1..] {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "page");
        render_page(&doc.get_page(page).get_layer(layer), card, &font, &bold);
    }

    doc.save_to_bytes().map_err(|e| Error::Pdf(e.to_string()))
}

fn render_page(
    layer: &PdfLayerReference,
    card: &ReportCard,
    font: &IndirectFontRef,
    bold: &IndirectFontRef,
) {
    layer.use_text("Student Report Card", 20.0, Mm(70.0), Mm(HEADER_Y), bold);

    let identity = [
        format!("Name: {}", card.name),
        format!("Roll No: {}", card.roll),
        format!("Class: {}", card.class),
        format!("Section: {}", card.section),
        format!("Date of Birth: {}", card.dob),
    ];
    let mut y = IDENTITY_TOP_Y;
    for line in identity {
        layer.use_text(line, 14.0, Mm(20.0), Mm(y), font);
        y -= LINE_STEP;
    }

    let mut y = TABLE_TOP_Y;
    if !card.subjects.is_empty() {
        layer.use_text("Subject", 12.0, Mm(TABLE_COLUMNS[0]), Mm(y), bold);
        for (idx, period) in PERIODS.iter().enumerate() {
            layer.use_text(*period, 12.0, Mm(TABLE_COLUMNS[idx + 1]), Mm(y), bold);
        }
        y -= LINE_STEP;

        for subject in &card.subjects {
            render_subject_row(layer, subject, y, font);
            y -= LINE_STEP;
        }
        y -= LINE_STEP;
    }

    let summary = [
        format!("Total Marks: {}", card.total_marks),
        format!("Percentage: {}%", card.percentage),
        format!("Rank: {}", card.rank.as_deref().unwrap_or("-")),
        format!("Result: {}", card.result.as_deref().unwrap_or("-")),
    ];
    for line in summary {
        layer.use_text(line, 14.0, Mm(20.0), Mm(y), font);
        y -= LINE_STEP;
    }

    for (x, label) in [(20.0, "Class Teacher"), (90.0, "Principal"), (160.0, "Parent")] {
        layer.use_text("_______________", 12.0, Mm(x), Mm(SIGNATURE_Y + 6.0), font);
        layer.use_text(label, 12.0, Mm(x), Mm(SIGNATURE_Y), font);
    }
}

fn render_subject_row(
    layer: &PdfLayerReference,
    subject: &SubjectMarks,
    y: f32,
    font: &IndirectFontRef,
) {
    layer.use_text(subject.subject.as_str(), 12.0, Mm(TABLE_COLUMNS[0]), Mm(y), font);
    for (idx, score) in subject.scores.iter().enumerate() {
        layer.use_text(
            format!("{score}"),
            12.0,
            Mm(TABLE_COLUMNS[idx + 1]),
            Mm(y),
            font,
        );
    }
}
