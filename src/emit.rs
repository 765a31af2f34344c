// src/emit.rs
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::options::{JsonLayout, OutputOptions};
use crate::error::EmitError;
use crate::file::create_truncating;
use crate::record::Record;
use crate::tsv::write_line;

/// Structured output file: one JSON object per record, appended and flushed as we go.
pub struct JsonSink {
    path: PathBuf,
    out: BufWriter<File>,
    layout: JsonLayout,
}

impl JsonSink {
    /// Opens (truncating) `path`.
    pub fn create(path: &Path, layout: JsonLayout) -> Result<Self, EmitError> {
        let file = create_truncating(path)?;
        logf!(path = %path.display(), ?layout, "json output opened");
        Ok(Self { path: path.to_path_buf(), out: BufWriter::new(file), layout })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&mut self, rec: &Record) -> Result<(), EmitError> {
        serde_json::to_writer(&mut self.out, rec)?;
        if self.layout == JsonLayout::Lines {
            self.out.write_all(b"\n")?;
        }
        self.out.flush()?;
        Ok(())
    }

    pub fn close(mut self) -> Result<(), EmitError> {
        self.out.flush()?;
        self.out.get_ref().sync_all()?;
        Ok(())
    }
}

/// Writes each record to the flat stream (always), the JSON sink (if any),
/// and the verbose dump (if asked).
pub struct Emitter<O: Write> {
    out: O,
    json: Option<JsonSink>,
    verbose: bool,
    written: usize,
}

impl<O: Write> Emitter<O> {
    pub fn new(out: O, json: Option<JsonSink>, verbose: bool) -> Self {
        Self { out, json, verbose, written: 0 }
    }

    /// Build from options, opening the JSON file if one is configured.
    pub fn from_options(out: O, opts: &OutputOptions) -> Result<Self, EmitError> {
        let json = match &opts.json_path {
            Some(p) => Some(JsonSink::create(p, opts.json_layout)?),
            None => None,
        };
        Ok(Self::new(out, json, opts.verbose))
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn emit(&mut self, rec: &Record) -> Result<(), EmitError> {
        if self.verbose {
            self.dump(rec)?;
        }
        if let Some(json) = self.json.as_mut() {
            json.write(rec)?;
        }
        write_line(&mut self.out, &rec.flat_cells())?;
        self.out.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Flush everything and close the JSON file. Returns the flat writer.
    pub fn finish(mut self) -> Result<O, EmitError> {
        self.out.flush()?;
        if let Some(json) = self.json.take() {
            json.close()?;
        }
        Ok(self.out)
    }

    fn dump(&mut self, rec: &Record) -> Result<(), EmitError> {
        let w = &mut self.out;
        writeln!(w, "{}", tabbed!("search_address:", &rec.searched))?;
        writeln!(w, "{}", tabbed!("howmany_results:", &rec.howmany))?;
        writeln!(w, "{}", tabbed!("zipcode:", &rec.zipcode))?;
        for (label, lines) in [
            ("new_eng", &rec.new_eng),
            ("old_eng", &rec.old_eng),
            ("new_kor", &rec.new_kor),
            ("old_kor", &rec.old_kor),
            ("coords", &rec.positions),
        ] {
            for (i, line) in lines.iter().enumerate() {
                writeln!(w, "{}", tabbed!(format!("{label}-{}:", i + 1), line))?;
            }
        }
        let num = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_default();
        writeln!(w, "{}", tabbed!("longitude:", num(rec.longitude)))?;
        writeln!(w, "{}", tabbed!("latitude:", num(rec.latitude)))?;
        if let Some(e) = &rec.error {
            writeln!(w, "{}", tabbed!("error:", e))?;
        }
        Ok(())
    }
}
