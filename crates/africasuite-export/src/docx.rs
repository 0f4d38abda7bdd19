use std::io::Cursor;

use docx_rs::{
    AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType, Table, TableCell, TableRow,
};

use crate::error::ExportError;
use crate::format::Cell;
use crate::layout::{Block, HeaderBlock, KpiItem, Layout};
use crate::styles::{DocumentStyles, Palette};

/// Generate a DOCX document from a report layout.
///
/// Structure:
/// - themed header: title in the primary color, organization/period lines,
///   a motif band in the accent color
/// - one block per section, each under a Heading 2 in the secondary color
/// - KPI grids and tables as DOCX tables, charts as captioned placeholders,
///   insights as bullet paragraphs
/// - a small centered footer
pub fn generate_docx(layout: &Layout, styles: &DocumentStyles) -> Result<Vec<u8>, ExportError> {
    let palette = &layout.header.palette;
    let mut docx = Docx::new()
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size));

    docx = add_header(docx, &layout.header, styles);

    for block in &layout.blocks {
        docx = docx.add_paragraph(section_heading(block.title(), palette, styles));
        docx = match block {
            Block::KpiGrid { columns, items, .. } => {
                docx.add_table(kpi_table(items, *columns, palette, styles))
            }
            Block::Table { headers, rows, .. } => {
                if rows.is_empty() {
                    docx.add_paragraph(italic_paragraph("No data for this period.", styles))
                } else {
                    docx.add_table(data_table(headers, rows, palette, styles))
                }
            }
            Block::ChartPlaceholder {
                chart_type,
                caption,
                points,
                ..
            } => {
                let label = format!("[{chart_type} chart \u{2022} {points} data points]");
                let docx = docx.add_paragraph(
                    Paragraph::new()
                        .align(AlignmentType::Center)
                        .add_run(text_run(&label, styles).italic().color(&palette.accent)),
                );
                match caption {
                    Some(caption) => docx.add_paragraph(italic_paragraph(caption, styles)),
                    None => docx,
                }
            }
            Block::Insight { paragraphs, .. } => paragraphs
                .iter()
                .fold(docx, |docx, text| docx.add_paragraph(bullet_paragraph(text, styles))),
        };
    }

    docx = docx.add_paragraph(Paragraph::new()).add_paragraph(
        Paragraph::new().align(AlignmentType::Center).add_run(
            text_run(&layout.footer, styles)
                .size(styles.small_size * 2)
                .color(&palette.secondary),
        ),
    );

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Docx(e.to_string()))?;

    Ok(buf.into_inner())
}

fn add_header(docx: Docx, header: &HeaderBlock, styles: &DocumentStyles) -> Docx {
    let palette = &header.palette;
    let band: String = std::iter::repeat_n(styles.motif_glyph, styles.motif_width).collect();

    let mut docx = docx.add_paragraph(
        Paragraph::new().style("Heading1").add_run(
            Run::new()
                .add_text(&header.title)
                .bold()
                .color(&palette.primary)
                .fonts(RunFonts::new().ascii(&styles.heading_font)),
        ),
    );

    for line in [
        header.organization.clone(),
        format!("Period: {}", header.date_range),
        format!("Generated {} by {}", header.generated_at, header.generated_by),
    ] {
        docx = docx.add_paragraph(Paragraph::new().add_run(text_run(&line, styles)));
    }

    docx.add_paragraph(
        Paragraph::new()
            .align(AlignmentType::Center)
            .add_run(Run::new().add_text(&band).color(&palette.accent)),
    )
}

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
}

fn section_heading(text: &str, palette: &Palette, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new().style("Heading2").add_run(
        Run::new()
            .add_text(text)
            .bold()
            .color(&palette.secondary)
            .fonts(RunFonts::new().ascii(&styles.heading_font)),
    )
}

/// KPI items laid out `columns` per row; the last row is padded with blank cells.
fn kpi_table(
    items: &[KpiItem],
    columns: usize,
    palette: &Palette,
    styles: &DocumentStyles,
) -> Table {
    let rows = items
        .chunks(columns)
        .map(|chunk| {
            let mut cells: Vec<TableCell> = chunk
                .iter()
                .map(|item| {
                    TableCell::new()
                        .add_paragraph(
                            Paragraph::new().add_run(
                                text_run(&item.label, styles).size(styles.small_size * 2),
                            ),
                        )
                        .add_paragraph(
                            Paragraph::new().add_run(
                                text_run(&item.value.text, styles)
                                    .bold()
                                    .color(&palette.primary),
                            ),
                        )
                })
                .collect();
            while cells.len() < columns {
                cells.push(TableCell::new().add_paragraph(Paragraph::new()));
            }
            TableRow::new(cells)
        })
        .collect();
    Table::new(rows)
}

fn data_table(
    headers: &[String],
    rows: &[Vec<Cell>],
    palette: &Palette,
    styles: &DocumentStyles,
) -> Table {
    let header_row = TableRow::new(
        headers
            .iter()
            .map(|h| {
                TableCell::new().add_paragraph(
                    Paragraph::new().add_run(text_run(h, styles).bold().color(&palette.primary)),
                )
            })
            .collect(),
    );

    let mut table_rows = Vec::with_capacity(rows.len() + 1);
    table_rows.push(header_row);
    for row in rows {
        table_rows.push(TableRow::new(
            row.iter()
                .map(|cell| {
                    let align = if cell.number.is_some() {
                        AlignmentType::Right
                    } else {
                        AlignmentType::Left
                    };
                    TableCell::new().add_paragraph(
                        Paragraph::new()
                            .align(align)
                            .add_run(text_run(&cell.text, styles)),
                    )
                })
                .collect(),
        ));
    }
    Table::new(table_rows)
}

fn bullet_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    let bullet_run = Run::new()
        .add_text("\u{2022} ")
        .fonts(RunFonts::new().ascii(&styles.body_font));

    let mut para = Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(bullet_run);

    for run in parse_inline(text, styles) {
        para = para.add_run(run);
    }

    para
}

fn italic_paragraph(text: &str, styles: &DocumentStyles) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(text_run(text, styles).italic().size(styles.small_size * 2))
}

fn text_run(text: &str, styles: &DocumentStyles) -> Run {
    Run::new()
        .add_text(text)
        .size(styles.body_size * 2)
        .fonts(RunFonts::new().ascii(&styles.body_font))
}

/// Parse simple inline formatting: **bold** segments.
fn parse_inline(text: &str, styles: &DocumentStyles) -> Vec<Run> {
    let mut runs = Vec::new();
    let mut remaining = text;

    while let Some(start) = remaining.find("**") {
        let before = &remaining[..start];
        if !before.is_empty() {
            runs.push(text_run(before, styles));
        }

        let after_start = &remaining[start + 2..];
        if let Some(end) = after_start.find("**") {
            runs.push(text_run(&after_start[..end], styles).bold());
            remaining = &after_start[end + 2..];
        } else {
            // Unmatched marker: keep it literally.
            runs.push(text_run(&remaining[start..], styles));
            remaining = "";
        }
    }

    if !remaining.is_empty() {
        runs.push(text_run(remaining, styles));
    }

    runs
}
