use std::collections::HashSet;

use rust_xlsxwriter::{Color, Format, Workbook, Worksheet};

use crate::error::ExportError;
use crate::format::Cell;
use crate::layout::{Block, Layout};
use crate::styles::hex_to_rgb;

const SUMMARY_SHEET: &str = "Summary";
const MAX_SHEET_NAME: usize = 31;
/// Excel keeps this name for its own change-tracking sheet.
const RESERVED_SHEET_NAME: &str = "history";

/// Generate an XLSX workbook from a report layout.
///
/// The first sheet, `Summary`, holds key/value rows: report metadata, every
/// KPI grid item and every insight paragraph. Each table block gets a sheet
/// of its own. Chart placeholders have no spreadsheet counterpart.
pub fn generate_xlsx(layout: &Layout) -> Result<Vec<u8>, ExportError> {
    let palette = &layout.header.palette;
    let title_format = Format::new()
        .set_bold()
        .set_font_size(16)
        .set_font_color(Color::RGB(hex_to_rgb(&palette.primary)));
    let heading_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(hex_to_rgb(&palette.secondary)));
    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(hex_to_rgb(&palette.primary)));
    let label_format = Format::new().set_bold();

    let mut workbook = Workbook::new();
    let mut used_names: HashSet<String> = HashSet::new();
    used_names.insert(SUMMARY_SHEET.to_lowercase());

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name(SUMMARY_SHEET)?;
        sheet.set_column_width(0, 32)?;
        sheet.set_column_width(1, 40)?;

        let header = &layout.header;
        sheet.write_string_with_format(0, 0, &header.title, &title_format)?;

        let mut row: u32 = 2;
        for (label, value) in [
            ("Organization", header.organization.as_str()),
            ("Period", header.date_range.as_str()),
            ("Generated at", header.generated_at.as_str()),
            ("Generated by", header.generated_by.as_str()),
            ("Currency", header.currency.as_str()),
        ] {
            sheet.write_string_with_format(row, 0, label, &label_format)?;
            sheet.write_string(row, 1, value)?;
            row += 1;
        }

        for block in &layout.blocks {
            match block {
                Block::KpiGrid { title, items, .. } => {
                    row += 1;
                    sheet.write_string_with_format(row, 0, title, &heading_format)?;
                    row += 1;
                    for item in items {
                        sheet.write_string_with_format(row, 0, &item.label, &label_format)?;
                        write_cell(sheet, row, 1, &item.value)?;
                        row += 1;
                    }
                }
                Block::Insight {
                    title, paragraphs, ..
                } if !paragraphs.is_empty() => {
                    row += 1;
                    sheet.write_string_with_format(row, 0, title, &heading_format)?;
                    row += 1;
                    for text in paragraphs {
                        sheet.write_string(row, 1, text.replace("**", ""))?;
                        row += 1;
                    }
                }
                Block::Insight { .. } | Block::Table { .. } | Block::ChartPlaceholder { .. } => {}
            }
        }
    }

    for block in &layout.blocks {
        if let Block::Table {
            title,
            headers,
            rows,
            ..
        } = block
        {
            let name = unique_sheet_name(title, &mut used_names);
            let sheet = workbook.add_worksheet();
            sheet.set_name(&name)?;

            for (col, label) in headers.iter().enumerate() {
                let col = col as u16;
                sheet.set_column_width(col, 20)?;
                sheet.write_string_with_format(0, col, label, &header_format)?;
            }
            for (r, cells) in rows.iter().enumerate() {
                for (col, cell) in cells.iter().enumerate() {
                    write_cell(sheet, r as u32 + 1, col as u16, cell)?;
                }
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Numeric cells are written as numbers so the workbook can compute with them.
fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, cell: &Cell) -> Result<(), ExportError> {
    match cell.number {
        Some(n) => sheet.write_number(row, col, n)?,
        None => sheet.write_string(row, col, &cell.text)?,
    };
    Ok(())
}

/// Excel sheet names: at most 31 characters, none of `[]:*?/\`, unique
/// ignoring case, never `History`.
pub fn unique_sheet_name(title: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = title
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => ' ',
            other => other,
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('\'').trim();
    let base: String = if cleaned.is_empty() {
        "Sheet".to_string()
    } else {
        cleaned.chars().take(MAX_SHEET_NAME).collect()
    };

    let mut candidate = base.clone();
    let mut n = 2;
    while candidate.eq_ignore_ascii_case(RESERVED_SHEET_NAME)
        || used.contains(&candidate.to_lowercase())
    {
        let suffix = format!(" ({n})");
        let keep = MAX_SHEET_NAME - suffix.chars().count();
        candidate = format!("{}{suffix}", base.chars().take(keep).collect::<String>());
        n += 1;
    }
    used.insert(candidate.to_lowercase());
    candidate
}
