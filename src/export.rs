use std::path::{Path, PathBuf};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};
use tracing::info;

use crate::report::{self, ReportDocument, APP_NAME, TAGLINE};
use crate::risk::Tone;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;
const PT_TO_MM: f32 = 0.3528;

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to write report to {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to render PDF: {0}")]
    Pdf(#[from] printpdf::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    Pdf,
    Markdown,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Markdown => "md",
        }
    }
}

/// Writes the report into `dir` under its dated export name.
pub fn export_report(
    report: &ReportDocument,
    label: &str,
    dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(report::export_file_name(
        label,
        report.generated_on,
        format.extension(),
    ));

    let bytes = match format {
        ExportFormat::Pdf => render_pdf(report)?,
        ExportFormat::Markdown => report::render_markdown(report).into_bytes(),
    };

    std::fs::write(&path, bytes).map_err(|source| ReportError::Io {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), "report exported");
    Ok(path)
}

pub fn render_pdf(report: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let mut pages = PageWriter::new(report.title)?;

    pages.text(report.title, 22.0, true, ink(), MARGIN);
    pages.text(&format!("{APP_NAME} - {TAGLINE}"), 11.0, false, muted(), MARGIN);
    pages.text(
        &format!("Generated on {}", report.generated_on.format("%B %-d, %Y")),
        11.0,
        false,
        muted(),
        MARGIN,
    );
    pages.gap(6.0);

    pages.boxed(28.0, |pages| {
        pages.text("Overall Health Score", 14.0, true, ink(), MARGIN + 5.0);
        pages.text(
            &format!("{}% - {}", report.overall.score, report.overall.badge),
            18.0,
            true,
            tone_color(report.overall.tone),
            MARGIN + 5.0,
        );
        let assessment = match &report.overall.category {
            Some(category) => format!("Latest assessment: {category} severity"),
            None => "No assessment submitted this session".to_string(),
        };
        pages.text(&assessment, 10.0, false, muted(), MARGIN + 5.0);
    });
    pages.gap(6.0);

    pages.text("Health Metrics", 14.0, true, ink(), MARGIN);
    pages.columns(&[("Metric", MARGIN), ("Value", 80.0), ("Status", 130.0)], 11.0, true, ink());
    for row in report.metrics.iter() {
        pages.columns(&[(row.label, MARGIN), (row.value.as_str(), 80.0)], 11.0, false, ink());
        pages.layer.set_fill_color(tone_color(row.tone));
        pages
            .layer
            .use_text(row.status, 11.0, Mm(130.0), Mm(pages.cursor), &pages.regular);
    }
    pages.gap(6.0);

    pages.text("Weekly Trends", 14.0, true, ink(), MARGIN);
    for trend in report.trends.iter() {
        let tone = if trend.improving { Tone::Positive } else { Tone::Neutral };
        pages.text(
            &format!("{}: {}", trend.metric, trend.detail),
            11.0,
            false,
            tone_color(tone),
            MARGIN + 5.0,
        );
    }
    pages.gap(6.0);

    pages.text("Recommendations", 14.0, true, ink(), MARGIN);
    for line in report.recommendations.iter() {
        pages.text(&format!("- {line}"), 11.0, false, ink(), MARGIN + 5.0);
    }

    Ok(pages.finish()?)
}

struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor: f32,
    pages: usize,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, printpdf::Error> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc.add_builtin_font(BuiltinFont::Helvetica)?;
        let bold = doc.add_builtin_font(BuiltinFont::HelveticaBold)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height >= MARGIN {
            return;
        }
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    fn gap(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn text(&mut self, text: &str, size: f32, bold: bool, color: Color, x: f32) {
        self.columns(&[(text, x)], size, bold, color);
    }

    /// Writes one line with each cell at its own x offset.
    fn columns(&mut self, cells: &[(&str, f32)], size: f32, bold: bool, color: Color) {
        let height = line_height(size);
        self.ensure_space(height);
        self.cursor -= height;

        let font = if bold { &self.bold } else { &self.regular };
        self.layer.set_fill_color(color);
        for (text, x) in cells {
            self.layer.use_text(*text, size, Mm(*x), Mm(self.cursor), font);
        }
    }

    /// Draws an outline around whatever `body` writes, kept on one page.
    fn boxed(&mut self, height: f32, body: impl FnOnce(&mut Self)) {
        self.ensure_space(height);
        let top = self.cursor;
        let bottom = top - height;

        self.layer.set_outline_color(accent());
        self.layer.set_outline_thickness(1.0);
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(MARGIN), Mm(top)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(top)), false),
                (Point::new(Mm(PAGE_WIDTH - MARGIN), Mm(bottom)), false),
                (Point::new(Mm(MARGIN), Mm(bottom)), false),
            ],
            is_closed: true,
        });

        self.cursor -= 2.0;
        body(self);
        self.cursor = bottom;
    }

    fn finish(self) -> Result<Vec<u8>, printpdf::Error> {
        self.doc.save_to_bytes()
    }
}

fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * 1.5
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Color::Rgb(Rgb::new(r, g, b, None))
}

fn ink() -> Color {
    rgb(0.13, 0.13, 0.16)
}

fn muted() -> Color {
    rgb(0.42, 0.42, 0.48)
}

fn accent() -> Color {
    rgb(0.85, 0.45, 0.6)
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Positive => rgb(0.13, 0.6, 0.33),
        Tone::Neutral => rgb(0.85, 0.6, 0.1),
        Tone::Attention => rgb(0.8, 0.2, 0.2),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SeverityCategory, SymptomSnapshot};
    use crate::report::build_report;
    use chrono::NaiveDate;

    fn sample_report() -> ReportDocument {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date");
        build_report(
            &SymptomSnapshot::demo(),
            78,
            Some(&SeverityCategory::Medium),
            date,
        )
    }

    #[test]
    fn renders_a_pdf_document() {
        let bytes = render_pdf(&sample_report()).expect("pdf renders");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn long_content_spills_onto_new_pages() {
        let mut pages = PageWriter::new("overflow").expect("writer");
        for index in 0..120 {
            pages.text(&format!("line {index}"), 11.0, false, ink(), MARGIN);
        }
        assert!(pages.pages > 1);
        assert!(pages.cursor >= MARGIN);
        pages.finish().expect("pdf saves");
    }

    #[test]
    fn exports_pdf_under_dated_name() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = export_report(&sample_report(), "PCOD-Health-Report", dir.path(), ExportFormat::Pdf)
            .expect("export succeeds");

        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("PCOD-Health-Report-10-19-2026.pdf")
        );
        let bytes = std::fs::read(&path).expect("file written");
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn exports_markdown_alongside() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = export_report(&sample_report(), "weekly", dir.path(), ExportFormat::Markdown)
            .expect("export succeeds");

        let written = std::fs::read_to_string(&path).expect("file written");
        assert_eq!(written, report::render_markdown(&sample_report()));
        assert!(path.ends_with("weekly-10-19-2026.md"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope");
        let err = export_report(&sample_report(), "weekly", &missing, ExportFormat::Markdown)
            .expect_err("directory does not exist");
        assert!(matches!(err, ReportError::Io { .. }));
    }
}
