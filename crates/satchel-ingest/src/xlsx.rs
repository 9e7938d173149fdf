//! XLSX first-sheet parsing.
//!
//! An XLSX file is a ZIP container of XML parts: `xl/workbook.xml` lists the
//! sheets, `xl/_rels/workbook.xml.rels` maps each sheet to its worksheet
//! part, and `xl/sharedStrings.xml` holds the string table referenced by
//! string cells. Only the first sheet is read.

use std::collections::HashMap;
use std::io::{Read, Seek};

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use satchel_core::RowRecord;
use serde_json::Value;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{Error, Result};
use crate::rows::{Grid, cell_value, grid_to_records};

/// A sheet entry from `xl/workbook.xml`.
struct SheetDescriptor {
    rel_id: Option<String>,
    sheet_id: Option<u32>,
}

/// Parse the first sheet of an XLSX workbook into row records.
pub(crate) fn parse_first_sheet<R: Read + Seek>(reader: R) -> Result<Vec<RowRecord>> {
    let mut archive = ZipArchive::new(reader).map_err(|e| Error::Zip(e.to_string()))?;

    let shared = match read_part(&mut archive, "xl/sharedStrings.xml") {
        Ok(xml) => parse_shared_strings(&xml)?,
        Err(Error::MissingPart { .. }) => Vec::new(),
        Err(e) => return Err(e),
    };

    let workbook = read_part(&mut archive, "xl/workbook.xml")?;
    let sheets = parse_workbook_xml(&workbook)?;
    let first = sheets.into_iter().next().ok_or(Error::NoSheets)?;

    let rels = match read_part(&mut archive, "xl/_rels/workbook.xml.rels") {
        Ok(xml) => parse_relationships(&xml)?,
        Err(Error::MissingPart { .. }) => HashMap::new(),
        Err(e) => return Err(e),
    };

    let target = resolve_sheet_target(&first, &rels);
    let sheet_xml = read_part(&mut archive, &target)?;
    let grid = parse_sheet_xml(&sheet_xml, &shared)?;
    Ok(grid_to_records(grid))
}

/// Read one part of the container into memory.
fn read_part<R: Read + Seek>(archive: &mut ZipArchive<R>, path: &str) -> Result<Vec<u8>> {
    let mut part = match archive.by_name(path) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => {
            return Err(Error::MissingPart {
                path: path.to_string(),
            });
        }
        Err(e) => return Err(Error::Zip(e.to_string())),
    };
    let mut buf = Vec::new();
    part.read_to_end(&mut buf)?;
    Ok(buf)
}

/// Parse `xl/sharedStrings.xml` into the string table.
fn parse_shared_strings(xml: &[u8]) -> Result<Vec<String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_si = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"si" => {
                current.clear();
                in_si = true;
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" && in_si => {
                let text = reader.read_text(e.name()).map_err(to_xml_err)?.into_owned();
                current.push_str(&text);
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"si" => {
                strings.push(current.clone());
                in_si = false;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(strings)
}

/// Parse `xl/workbook.xml` into sheet descriptors, in declaration order.
fn parse_workbook_xml(xml: &[u8]) -> Result<Vec<SheetDescriptor>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"sheet" => {
                let sheet_id = get_attr(&e, b"sheetId")?.and_then(|v| v.parse().ok());
                let rel_id = get_attr(&e, b"r:id")?;
                sheets.push(SheetDescriptor { rel_id, sheet_id });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Parse `xl/_rels/workbook.xml.rels` into an Id → Target map for worksheets.
fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();
    let mut map = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"Relationship" => {
                let id = get_attr(&e, b"Id")?;
                let target = get_attr(&e, b"Target")?;
                let rel_type = get_attr(&e, b"Type")?;
                if let (Some(id), Some(target), Some(rel_type)) = (id, target, rel_type)
                    && rel_type.contains("worksheet")
                {
                    map.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(map)
}

/// Resolve the container path of a sheet's worksheet part.
fn resolve_sheet_target(sheet: &SheetDescriptor, relationships: &HashMap<String, String>) -> String {
    if let Some(rel_id) = &sheet.rel_id
        && let Some(target) = relationships.get(rel_id)
    {
        return normalize_target(target);
    }

    let guessed = sheet
        .sheet_id
        .map(|id| format!("xl/worksheets/sheet{id}.xml"))
        .unwrap_or_else(|| "xl/worksheets/sheet1.xml".to_string());
    normalize_target(&guessed)
}

fn normalize_target(target: &str) -> String {
    let trimmed = target.trim_start_matches('/');
    if trimmed.starts_with("xl/") {
        trimmed.to_string()
    } else {
        format!("xl/{trimmed}")
    }
}

/// Parse a worksheet part into a dense grid.
fn parse_sheet_xml(xml: &[u8], shared: &[String]) -> Result<Grid> {
    let mut reader = Reader::from_reader(xml);
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut cells: Vec<(u32, u32, Value)> = Vec::new();
    let mut max_row = 0u32;
    let mut max_col = 0u32;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"c" => {
                let start = e.into_owned();
                buf.clear();
                if let Some((row, col, value)) = parse_cell(&mut reader, &start, shared)? {
                    max_row = max_row.max(row);
                    max_col = max_col.max(col);
                    cells.push((row, col, value));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if cells.is_empty() {
        return Ok(Grid::new());
    }

    let mut grid: Grid = (0..=max_row)
        .map(|_| vec![None; max_col as usize + 1])
        .collect();
    for (row, col, value) in cells {
        grid[row as usize][col as usize] = Some(value);
    }
    Ok(grid)
}

/// Parse one `<c>` element. Returns `None` for valueless cells.
fn parse_cell(
    reader: &mut Reader<&[u8]>,
    start: &BytesStart,
    shared: &[String],
) -> Result<Option<(u32, u32, Value)>> {
    let address = get_attr(start, b"r")?
        .ok_or_else(|| Error::Xml("cell missing address".into()))?;
    let (row, col) =
        address_to_index(&address).ok_or_else(|| Error::InvalidAddress(address.clone()))?;
    let cell_type = get_attr(start, b"t")?;

    let mut value_text: Option<String> = None;
    let mut inline_text: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) if e.name().as_ref() == b"v" => {
                value_text = Some(reader.read_text(e.name()).map_err(to_xml_err)?.into_owned());
            }
            Ok(Event::Start(e)) if e.name().as_ref() == b"t" => {
                let text = reader.read_text(e.name()).map_err(to_xml_err)?.into_owned();
                inline_text = Some(match inline_text.take() {
                    Some(mut acc) => {
                        acc.push_str(&text);
                        acc
                    }
                    None => text,
                });
            }
            Ok(Event::End(e)) if e.name().as_ref() == b"c" => break,
            Ok(Event::Eof) => return Err(Error::Xml("unterminated cell element".into())),
            Err(e) => return Err(Error::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    let value = match cell_type.as_deref() {
        Some("s") => {
            let raw = match value_text {
                Some(v) => v,
                None => return Ok(None),
            };
            let index: usize = raw
                .trim()
                .parse()
                .map_err(|_| Error::Xml(format!("bad shared string reference '{raw}'")))?;
            let text = shared
                .get(index)
                .ok_or(Error::SharedStringOutOfBounds(index))?;
            if text.is_empty() {
                return Ok(None);
            }
            Value::String(text.clone())
        }
        Some("inlineStr") => match inline_text {
            Some(text) if !text.is_empty() => Value::String(text),
            _ => return Ok(None),
        },
        Some("str") => match value_text {
            Some(text) if !text.trim().is_empty() => Value::String(text.trim().to_string()),
            _ => return Ok(None),
        },
        Some("b") => match value_text.as_deref().map(str::trim) {
            Some("0") => Value::Bool(false),
            Some(_) => Value::Bool(true),
            None => return Ok(None),
        },
        _ => match value_text.as_deref().and_then(cell_value) {
            Some(v) => v,
            None => return Ok(None),
        },
    };

    Ok(Some((row, col, value)))
}

/// Convert an `A1`-style address into 0-based (row, col) indices.
fn address_to_index(address: &str) -> Option<(u32, u32)> {
    let split = address.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = address.split_at(split);
    if letters.is_empty() {
        return None;
    }

    let mut col: u32 = 0;
    for c in letters.chars() {
        let c = c.to_ascii_uppercase();
        if !c.is_ascii_uppercase() {
            return None;
        }
        col = col.checked_mul(26)?.checked_add(c as u32 - 'A' as u32 + 1)?;
    }

    let row: u32 = digits.parse().ok()?;
    if row == 0 {
        return None;
    }
    Some((row - 1, col - 1))
}

fn get_attr(e: &BytesStart, key: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| Error::Xml(e.to_string()))?;
        if attr.key.as_ref() == key {
            return Ok(Some(
                attr.unescape_value().map_err(to_xml_err)?.into_owned(),
            ));
        }
    }
    Ok(None)
}

fn to_xml_err(e: quick_xml::Error) -> Error {
    Error::Xml(e.to_string())
}
