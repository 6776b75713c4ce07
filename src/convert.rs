use crate::{NumberFormat, OwnerDirectory};
use std::path::{Path, PathBuf};

/// The extension of all written reports.
pub const OUTPUT_EXTENSION: &str = "html";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not read input file at '{}'", path.display())]
    ReadInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not list input directory at '{}'", path.display())]
    ListInput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not create output directory at '{}'", path.display())]
    CreateOutputDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Could not write report to '{}'", path.display())]
    WriteOutput {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Parse(#[from] crate::parse::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Clone, Debug, Default)]
pub struct Options {
    pub number_format: NumberFormat,
    pub owners: OwnerDirectory,
}

/// What happened when converting one input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    /// The amount of sections written.
    pub sections: usize,
    /// The amount of records written.
    pub records: usize,
    /// The amount of records dropped because their amounts could not be computed.
    pub skipped_records: usize,
}

/// Decode the raw bytes of an export, which are UTF-16 little endian with optional BOM.
pub fn decode_input(bytes: &[u8]) -> String {
    let (text, had_errors) = encoding_rs::UTF_16LE.decode_with_bom_removal(bytes);
    if had_errors {
        tracing::warn!("Input contained malformed UTF-16, affected characters were replaced");
    }
    text.into_owned()
}

/// The path of the report for the input file named `file_name` within `output_dir`.
pub fn output_path(output_dir: &Path, file_name: &Path) -> PathBuf {
    output_dir.join(file_name).with_extension(OUTPUT_EXTENSION)
}

pub(crate) mod function {
    use super::{decode_input, output_path, Error, Options, Outcome};
    use crate::{compute, parse, write_html};
    use std::path::{Path, PathBuf};

    /// Turn the decoded export `text` into an HTML report written to `out`.
    pub fn convert(
        text: &str,
        out: impl std::io::Write,
        Options {
            number_format,
            owners,
        }: &Options,
    ) -> Result<Outcome, Error> {
        let mut document = parse(text)?;
        let skipped_records = compute(&mut document, number_format);
        write_html(&document, owners, out)?;
        Ok(Outcome {
            sections: document.sections.len(),
            records: document.records().count(),
            skipped_records,
        })
    }

    /// Convert the export at `input` into a report at `output`.
    pub fn convert_file(input: &Path, output: &Path, options: &Options) -> Result<Outcome, Error> {
        let bytes = std::fs::read(input).map_err(|err| Error::ReadInput {
            path: input.to_owned(),
            source: err,
        })?;
        let text = decode_input(&bytes);
        let write_err = |err| Error::WriteOutput {
            path: output.to_owned(),
            source: err,
        };
        let file = std::fs::File::create(output).map_err(write_err)?;
        match convert(&text, std::io::BufWriter::new(file), options) {
            Err(Error::Io(err)) => Err(write_err(err)),
            res => res,
        }
    }

    /// Convert every file directly within `input_dir` into a report of the same name in
    /// `output_dir`, which is created if needed. Returns the paths of all written reports.
    ///
    /// Nothing is created if `input_dir` contains no files.
    pub fn convert_directory(
        input_dir: &Path,
        output_dir: &Path,
        options: &Options,
    ) -> Result<Vec<PathBuf>, Error> {
        let file_names = files_in(input_dir)?;
        if file_names.is_empty() {
            tracing::info!("No input files found in '{}'", input_dir.display());
            return Ok(Vec::new());
        }
        std::fs::create_dir_all(output_dir).map_err(|err| Error::CreateOutputDir {
            path: output_dir.to_owned(),
            source: err,
        })?;

        let mut written = Vec::with_capacity(file_names.len());
        for file_name in file_names {
            let input = input_dir.join(&file_name);
            let output = output_path(output_dir, Path::new(&file_name));
            let outcome = convert_file(&input, &output, options)?;
            tracing::info!(
                "Wrote {} records in {} sections to '{}'",
                outcome.records,
                outcome.sections,
                output.display()
            );
            written.push(output);
        }
        Ok(written)
    }

    /// Names of the regular files in `dir`, sorted, without descending into subdirectories.
    fn files_in(dir: &Path) -> Result<Vec<std::ffi::OsString>, Error> {
        let list_err = |err| Error::ListInput {
            path: dir.to_owned(),
            source: err,
        };
        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir).map_err(list_err)? {
            let entry = entry.map_err(list_err)?;
            if entry.path().is_file() {
                names.push(entry.file_name());
            }
        }
        names.sort();
        Ok(names)
    }
}
