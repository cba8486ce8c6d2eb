//! Output renderers for decoded programs.

use crate::args::OutputFormat;
use anyhow::Result;
use microkorg_prg::{DecodedProgram, Program, Section};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A successfully decoded file.
pub struct Decoded {
    /// Path as given on the command line.
    pub path: PathBuf,
    /// Decoder output.
    pub decoded: DecodedProgram,
}

/// Section groups of a program in display order, skipping empty ones.
fn groups(program: &Program) -> Vec<(&'static str, &[Section])> {
    [
        ("general", program.general_sections()),
        ("timbre1", program.timbre1_sections()),
        ("timbre2", program.timbre2_sections()),
        ("vocoder", program.vocoder_sections()),
    ]
    .into_iter()
    .filter(|(_, sections)| !sections.is_empty())
    .collect()
}

/// Write every decoded file in the requested format.
pub fn render<W: Write>(
    format: OutputFormat,
    entries: &[Decoded],
    pretty: bool,
    out: W,
) -> Result<()> {
    match format {
        OutputFormat::Text => render_text(entries, out),
        OutputFormat::Json => render_json(entries, pretty, out),
        OutputFormat::Csv => render_csv(entries, out),
    }
}

fn render_text<W: Write>(entries: &[Decoded], mut out: W) -> Result<()> {
    for (i, entry) in entries.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        let decoded = &entry.decoded;
        writeln!(out, "== {} ==", entry.path.display())?;
        writeln!(out, "{}", decoded.program)?;
        writeln!(out, "Device: {} ({})", decoded.variant, decoded.container)?;
        for warning in &decoded.warnings {
            writeln!(out, "Warning: {warning}")?;
        }

        for (group, sections) in groups(&decoded.program) {
            writeln!(out)?;
            writeln!(out, "[{}]", group.to_ascii_uppercase())?;
            for section in sections {
                writeln!(out, "{}", section.name())?;
                for param in section.iter() {
                    writeln!(out, "  {}: {}", param.name, param.value)?;
                }
            }
        }
    }
    out.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    file: &'a Path,
    #[serde(flatten)]
    decoded: &'a DecodedProgram,
}

fn render_json<W: Write>(entries: &[Decoded], pretty: bool, mut out: W) -> Result<()> {
    let documents: Vec<JsonEntry<'_>> = entries
        .iter()
        .map(|entry| JsonEntry {
            file: &entry.path,
            decoded: &entry.decoded,
        })
        .collect();
    if pretty {
        serde_json::to_writer_pretty(&mut out, &documents)?;
    } else {
        serde_json::to_writer(&mut out, &documents)?;
    }
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[derive(Serialize)]
struct CsvRow<'a> {
    file: String,
    program: &'a str,
    group: &'static str,
    section: &'static str,
    slot: usize,
    param: &'static str,
    value: String,
}

fn render_csv<W: Write>(entries: &[Decoded], out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    for entry in entries {
        let program = &entry.decoded.program;
        for (group, sections) in groups(program) {
            for section in sections {
                for (slot, param) in section.slots().iter().enumerate() {
                    let Some(param) = param else { continue };
                    writer.serialize(CsvRow {
                        file: entry.path.display().to_string(),
                        program: program.name(),
                        group,
                        section: section.name(),
                        slot: slot + 1,
                        param: param.name,
                        value: param.value.to_string(),
                    })?;
                }
            }
        }
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use microkorg_prg::frame::{pack_chunk, CHUNK_DATA_LEN};
    use microkorg_prg::record::RECORD_LEN;
    use microkorg_prg::{load_bytes, ContainerKind};

    fn entry(voice_byte: u8) -> Decoded {
        let mut record = [0u8; RECORD_LEN];
        record[..12].copy_from_slice(b"INIT PROG   ");
        record[16] = voice_byte;
        let mut data = vec![0xF0, 0x42, 0x30, 0x58, 0x40];
        for block in record.chunks_exact(CHUNK_DATA_LEN) {
            data.extend_from_slice(&pack_chunk(block.try_into().unwrap()));
        }
        data.extend_from_slice(&[0x00, 0x00, 0x00, 0xF7]);
        Decoded {
            path: PathBuf::from("init.syx"),
            decoded: load_bytes(&data, ContainerKind::Bare).unwrap(),
        }
    }

    fn rendered(format: OutputFormat, entries: &[Decoded]) -> String {
        let mut out = Vec::new();
        render(format, entries, false, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn text_lists_sections_in_order() {
        let text = rendered(OutputFormat::Text, &[entry(0x00)]);
        assert!(text.starts_with("== init.syx =="));
        assert!(text.contains("Name: INIT PROG"));
        assert!(text.contains("Device: microKORG (SYX)"));
        let general = text.find("[GENERAL]").unwrap();
        let timbre = text.find("[TIMBRE1]").unwrap();
        assert!(general < timbre);
        assert!(!text.contains("[TIMBRE2]"));
        assert!(text.contains("  TYPE: Flanger/Chorus"));
    }

    #[test]
    fn json_keeps_argument_order() {
        let json = rendered(OutputFormat::Json, &[entry(0x00), entry(0x30)]);
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let docs = value.as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["file"], "init.syx");
        assert_eq!(docs[0]["program"]["voice_mode"], "Single");
        assert_eq!(docs[1]["program"]["voice_mode"], "Vocoder");
        assert_eq!(docs[1]["variant"], "classic");
        assert_eq!(docs[1]["container"], "bare");
    }

    #[test]
    fn csv_has_one_row_per_parameter() {
        let decoded = entry(0x00);
        let params: usize = groups(&decoded.decoded.program)
            .iter()
            .flat_map(|(_, sections)| sections.iter())
            .map(|section| section.iter().count())
            .sum();
        let csv = rendered(OutputFormat::Csv, &[decoded]);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some("file,program,group,section,slot,param,value")
        );
        assert_eq!(lines.count(), params);
        assert!(csv.contains("init.syx,INIT PROG,general,MOD FX,1,TYPE,Flanger/Chorus"));
    }
}
